//! The maze generator service client.

use std::future::Future;

use mazeway_protocol::{Compressor, Lz4Compressor, Maze, MazeDimensions, WireCodec};

use crate::exchange::round_trip;
use crate::{ClientConfig, ClientError, ServiceEndpoint};

/// Something that can produce a fresh maze of a given size.
///
/// [`MazeServiceClient`] implements this over the network. The session
/// layer only depends on the trait, so tests can substitute an in-process
/// generator.
pub trait MazeGenerator: Send + Sync + 'static {
    /// Produces a maze with exactly the requested dimensions.
    ///
    /// # Errors
    /// Any [`ClientError`]. On error no maze was produced.
    fn request_maze(
        &self,
        dims: MazeDimensions,
    ) -> impl Future<Output = Result<Maze, ClientError>> + Send;
}

/// Client for the remote maze generator.
///
/// Each call opens a connection, sends `[rows, cols]`, reads one
/// compressed maze, and closes the connection. No pipelining, no retry.
#[derive(Debug, Clone)]
pub struct MazeServiceClient<C: Compressor = Lz4Compressor> {
    endpoint: ServiceEndpoint,
    config: ClientConfig,
    wire: WireCodec<C>,
}

impl MazeServiceClient {
    /// A client for the generator at `endpoint`.
    pub fn new(endpoint: ServiceEndpoint, config: ClientConfig) -> Self {
        Self::with_wire(endpoint, config, WireCodec::new())
    }
}

impl<C: Compressor> MazeServiceClient<C> {
    /// A client with a custom wire codec.
    pub fn with_wire(endpoint: ServiceEndpoint, config: ClientConfig, wire: WireCodec<C>) -> Self {
        Self {
            endpoint,
            config,
            wire,
        }
    }

    /// The service address.
    pub fn endpoint(&self) -> &ServiceEndpoint {
        &self.endpoint
    }
}

impl<C: Compressor> MazeGenerator for MazeServiceClient<C> {
    async fn request_maze(&self, dims: MazeDimensions) -> Result<Maze, ClientError> {
        let request = self.wire.encode_dimensions_request(dims)?;
        let response = round_trip(&self.endpoint, &self.config, &request).await?;
        let maze = self.wire.decode_maze_payload(&response, dims)?;

        tracing::info!(
            endpoint = %self.endpoint,
            %dims,
            compressed_bytes = response.len(),
            "received maze"
        );
        Ok(maze)
    }
}
