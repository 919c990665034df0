//! Error types for the protocol layer.
//!
//! Each Mazeway crate defines its own error enum. A `ProtocolError` means
//! the bytes arrived but could not be turned into a valid value: bad JSON,
//! a maze that breaks its invariants, a solution that jumps cells, or a
//! compressed blob that will not inflate.

/// Errors produced while encoding or decoding wire payloads.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust value into bytes).
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed: malformed JSON, missing fields, wrong types.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The payload decoded but is wrong at the protocol level, e.g. the
    /// generator answered with a maze of a different size than requested.
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// Maze dimensions below the 2x2 minimum or above the cell limit.
    #[error("invalid maze dimensions {rows}x{cols}")]
    InvalidDimensions {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },

    /// A maze payload violates a maze invariant.
    #[error("invalid maze: {0}")]
    InvalidMaze(String),

    /// A solution payload violates a path invariant.
    #[error("invalid solution: {0}")]
    InvalidSolution(String),

    /// The compressed payload could not be decompressed.
    #[error(transparent)]
    Compression(#[from] CodecError),
}

/// Errors from the byte-compression codec.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// No bytes at all.
    #[error("compressed payload is empty")]
    Empty,

    /// Too short to even hold the size prefix.
    #[error("compressed payload truncated ({len} bytes)")]
    Truncated {
        /// Number of bytes received.
        len: usize,
    },

    /// The announced decompressed size exceeds what the caller allows.
    #[error("decompressed size {size} exceeds limit {max}")]
    TooLarge {
        /// Size announced by the payload.
        size: usize,
        /// Caller-supplied limit.
        max: usize,
    },

    /// The compressed stream itself is corrupt.
    #[error("malformed compressed payload: {0}")]
    Malformed(String),
}
