//! Unified error type for Mazeway.

use mazeway_client::ClientError;
use mazeway_protocol::{CodecError, ProtocolError};
use mazeway_session::SessionError;
use mazeway_transport::TransportError;

use crate::ConfigError;

/// Top-level error that wraps all crate-specific errors.
///
/// Applications using the `mazeway` meta-crate can return this one type
/// and let `?` convert whatever a sub-crate produced.
#[derive(Debug, thiserror::Error)]
pub enum MazewayError {
    /// A framing or socket error.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A payload that could not be encoded or decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A compressed blob that would not inflate.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A failed generator or solver round trip.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A rejected or failed session operation.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The configuration file could not be read or written.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
