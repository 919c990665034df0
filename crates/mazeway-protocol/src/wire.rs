//! Request and response payloads for the two remote services.
//!
//! ```text
//! generator:  [rows, cols] (JSON)        →  compressed canonical maze
//! solver:     {"grid", "start", "goal"}  →  {"path": [{"position": ..}, ..]}
//! ```
//!
//! [`WireCodec`] bundles the structured codec and the compressor so both
//! the client side and the test stub servers speak the same bytes.

use crate::layout::{self, LAYOUT_SLACK};
use crate::{
    Codec, Compressor, JsonCodec, Lz4Compressor, Maze, MazeDimensions, ProtocolError,
    SolutionContainer, SolutionPath,
};

/// Encodes and decodes every payload exchanged with the services.
#[derive(Debug, Clone, Default)]
pub struct WireCodec<C: Compressor = Lz4Compressor> {
    codec: JsonCodec,
    compressor: C,
}

impl WireCodec {
    /// A codec using the services' LZ4 compression.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Compressor> WireCodec<C> {
    /// A codec using a custom compressor.
    pub fn with_compressor(compressor: C) -> Self {
        Self {
            codec: JsonCodec,
            compressor,
        }
    }

    /// The compressor in use.
    pub fn compressor(&self) -> &C {
        &self.compressor
    }

    /// Generator request: the vector `[rows, cols]`.
    pub fn encode_dimensions_request(
        &self,
        dims: MazeDimensions,
    ) -> Result<Vec<u8>, ProtocolError> {
        self.codec.encode(&dims)
    }

    /// Server side of [`encode_dimensions_request`](Self::encode_dimensions_request).
    pub fn decode_dimensions_request(&self, bytes: &[u8]) -> Result<MazeDimensions, ProtocolError> {
        self.codec.decode(bytes)
    }

    /// Compresses the canonical layout of `maze`.
    ///
    /// This is the generator's response body and the saved-file format.
    pub fn encode_maze_payload(&self, maze: &Maze) -> Vec<u8> {
        self.compressor.compress(&layout::encode_maze(maze))
    }

    /// Decompresses a generator response and rebuilds the maze.
    ///
    /// The maze must have exactly the requested dimensions.
    ///
    /// # Errors
    /// - [`ProtocolError::Compression`] if the blob is empty, truncated,
    ///   corrupt, or inflates beyond `rows*cols` plus layout slack.
    /// - Any other [`ProtocolError`] if the inflated bytes are not a valid
    ///   maze of the requested size.
    pub fn decode_maze_payload(
        &self,
        bytes: &[u8],
        dims: MazeDimensions,
    ) -> Result<Maze, ProtocolError> {
        let raw = self.compressor.decompress(bytes, dims.cells() + LAYOUT_SLACK)?;
        let maze = layout::decode_maze(&raw)?;
        if maze.dimensions() != dims {
            return Err(ProtocolError::InvalidMessage(format!(
                "requested a {dims} maze, received {}",
                maze.dimensions()
            )));
        }
        Ok(maze)
    }

    /// Like [`decode_maze_payload`](Self::decode_maze_payload) when the size
    /// is not known up front (loading a saved maze).
    pub fn decode_stored_maze(&self, bytes: &[u8]) -> Result<Maze, ProtocolError> {
        let raw = self
            .compressor
            .decompress(bytes, crate::MAX_CELLS + LAYOUT_SLACK)?;
        layout::decode_maze(&raw)
    }

    /// Solver request: the full maze as a structured object. Not compressed.
    pub fn encode_maze_for_solve(&self, maze: &Maze) -> Result<Vec<u8>, ProtocolError> {
        self.codec.encode(maze)
    }

    /// Server side of [`encode_maze_for_solve`](Self::encode_maze_for_solve).
    pub fn decode_maze_for_solve(&self, bytes: &[u8]) -> Result<Maze, ProtocolError> {
        self.codec.decode(bytes)
    }

    /// Solver response body for `path`.
    pub fn encode_solution_payload(&self, path: &SolutionPath) -> Result<Vec<u8>, ProtocolError> {
        self.codec.encode(&SolutionContainer::from(path))
    }

    /// Extracts the ordered positions from a solver response.
    ///
    /// # Errors
    /// - [`ProtocolError::Decode`] if the container is malformed.
    /// - [`ProtocolError::InvalidMessage`] if a state carries no position.
    /// - [`ProtocolError::InvalidSolution`] if the positions are not a
    ///   step-by-step walk.
    pub fn decode_solution_payload(&self, bytes: &[u8]) -> Result<SolutionPath, ProtocolError> {
        let container: SolutionContainer = self.codec.decode(bytes)?;
        let steps = container
            .path
            .into_iter()
            .enumerate()
            .map(|(i, state)| {
                state.position.ok_or_else(|| {
                    ProtocolError::InvalidMessage(format!("solution state {i} has no position"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        SolutionPath::new(steps)
    }
}
