//! Wire protocol for Mazeway.
//!
//! This crate defines the values the client exchanges with the maze
//! generator and maze solver services, and how they become bytes:
//!
//! - **Types** ([`Position`], [`Direction`], [`Maze`], [`MazeDimensions`],
//!   [`SolutionPath`], [`SolutionContainer`]).
//! - **Layout** ([`layout`]) — the canonical binary form of a maze.
//! - **Compression** ([`Compressor`], [`Lz4Compressor`]).
//! - **Codec** ([`Codec`], [`JsonCodec`]) — structured payloads.
//! - **Wire** ([`WireCodec`]) — the four request/response payloads.
//! - **Errors** ([`ProtocolError`], [`CodecError`]).
//!
//! # Architecture
//!
//! ```text
//! Transport (frames) → Protocol (Maze, SolutionPath) → Client (round trips)
//! ```

mod codec;
mod compression;
mod error;
pub mod layout;
mod types;
mod wire;

pub use codec::{Codec, JsonCodec};
pub use compression::{Compressor, Lz4Compressor};
pub use error::{CodecError, ProtocolError};
pub use types::{
    Direction, Maze, MazeDimensions, Position, SearchState, SolutionContainer, SolutionPath,
    MAX_CELLS, MIN_SIDE, OPEN, WALL,
};
pub use wire::WireCodec;
