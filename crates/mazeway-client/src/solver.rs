//! The maze solver service client.

use std::future::Future;

use mazeway_protocol::{Maze, SolutionPath, WireCodec};

use crate::exchange::round_trip;
use crate::{ClientConfig, ClientError, ServiceEndpoint};

/// Something that can find a path through a maze.
pub trait MazeSolver: Send + Sync + 'static {
    /// Computes a path for `maze`.
    ///
    /// The returned path is a step-by-step walk; whether it actually joins
    /// start and goal is for the caller to check.
    ///
    /// # Errors
    /// Any [`ClientError`]. On error no path was produced.
    fn request_solution(
        &self,
        maze: &Maze,
    ) -> impl Future<Output = Result<SolutionPath, ClientError>> + Send;
}

/// Client for the remote maze solver.
///
/// Same single-shot discipline as
/// [`MazeServiceClient`](crate::MazeServiceClient): one connection, one
/// JSON maze out, one JSON solution container back.
#[derive(Debug, Clone)]
pub struct SolverServiceClient {
    endpoint: ServiceEndpoint,
    config: ClientConfig,
    wire: WireCodec,
}

impl SolverServiceClient {
    /// A client for the solver at `endpoint`.
    pub fn new(endpoint: ServiceEndpoint, config: ClientConfig) -> Self {
        Self {
            endpoint,
            config,
            wire: WireCodec::new(),
        }
    }

    /// The service address.
    pub fn endpoint(&self) -> &ServiceEndpoint {
        &self.endpoint
    }
}

impl MazeSolver for SolverServiceClient {
    async fn request_solution(&self, maze: &Maze) -> Result<SolutionPath, ClientError> {
        let request = self.wire.encode_maze_for_solve(maze)?;
        let response = round_trip(&self.endpoint, &self.config, &request).await?;
        let path = self.wire.decode_solution_payload(&response)?;

        tracing::info!(
            endpoint = %self.endpoint,
            dims = %maze.dimensions(),
            steps = path.len(),
            "received solution"
        );
        Ok(path)
    }
}
