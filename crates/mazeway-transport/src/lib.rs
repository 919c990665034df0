//! Transport layer for Mazeway.
//!
//! Provides the [`Connection`] trait and its TCP implementation. Every
//! remote service call is a single round trip over a fresh connection:
//! connect, send one frame, receive one frame, close.
//!
//! Framing is length-prefixed (see [`frame`]).

#![allow(async_fn_in_trait)]

mod error;
pub mod frame;
mod tcp;

pub use error::TransportError;
pub use frame::FrameConfig;
pub use tcp::TcpConnection;

use std::fmt;

/// Opaque identifier for a connection, used in log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// A single connection that exchanges whole frames with a remote peer.
pub trait Connection: Send + 'static {
    /// The error type for connection operations.
    type Error: std::error::Error + Send + Sync;

    /// Sends one frame and flushes it.
    async fn send(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Receives the next frame.
    ///
    /// Returns `Ok(None)` when the peer closed the connection cleanly
    /// without sending anything.
    async fn recv(&mut self) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Closes the write side of the connection.
    async fn close(&mut self) -> Result<(), Self::Error>;

    /// Returns the unique identifier for this connection.
    fn id(&self) -> ConnectionId;
}
