//! Error types for the client layer.

use std::time::Duration;

use mazeway_protocol::{CodecError, ProtocolError};
use mazeway_transport::TransportError;

/// Errors from a single request/response round trip.
///
/// None of these are retried. The caller decides what a failed round trip
/// means; the session layer treats every one of them as "nothing changed".
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Connecting, writing, or reading failed: the host is unreachable,
    /// refused the connection, or reset it.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(#[source] TransportError),

    /// The service accepted the connection but did not answer in time.
    #[error("{endpoint} did not answer within {after:?}")]
    TimedOut {
        /// The `host:port` that was called.
        endpoint: String,
        /// The configured request timeout.
        after: Duration,
    },

    /// A response arrived but is not a valid payload.
    #[error("protocol error: {0}")]
    Protocol(#[source] ProtocolError),

    /// A compressed response could not be decompressed.
    #[error("codec error: {0}")]
    Codec(#[source] CodecError),
}

/// Decompression failures surface as [`ClientError::Codec`]; everything
/// else as [`ClientError::Protocol`].
impl From<ProtocolError> for ClientError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::Compression(codec) => Self::Codec(codec),
            other => Self::Protocol(other),
        }
    }
}
