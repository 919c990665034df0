//! Error types for the session layer.

use std::io;

use mazeway_client::ClientError;
use mazeway_protocol::{CodecError, ProtocolError};

/// Errors returned by [`MazeSession`](crate::MazeSession) operations.
///
/// Every failed operation leaves the session exactly as it was: no state
/// change and no event.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The operation needs a loaded maze and there is none.
    #[error("no active maze")]
    NoActiveMaze,

    /// A save name that cannot be used as a single file name.
    #[error("invalid maze name {0:?}")]
    InvalidName(String),

    /// Reading or writing a saved maze failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// A generator or solver round trip failed.
    #[error(transparent)]
    Remote(#[from] ClientError),

    /// A saved maze or a solver answer is structurally wrong.
    #[error("protocol error: {0}")]
    Protocol(#[source] ProtocolError),

    /// A saved maze could not be decompressed.
    #[error("codec error: {0}")]
    Codec(#[source] CodecError),

    /// A new maze was installed while the solver was working on the old
    /// one. The stale solution was dropped.
    #[error("maze was replaced while it was being solved")]
    MazeReplaced,
}

impl From<ProtocolError> for SessionError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::Compression(codec) => Self::Codec(codec),
            other => Self::Protocol(other),
        }
    }
}
