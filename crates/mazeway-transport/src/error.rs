/// Errors that can occur in the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Resolving or connecting to the remote service failed.
    #[error("connect to {addr} failed: {source}")]
    ConnectFailed {
        /// The `host:port` we tried to reach.
        addr: String,
        /// The underlying I/O error (refused, unreachable, timed out...).
        #[source]
        source: std::io::Error,
    },

    /// Sending data failed.
    #[error("send failed: {0}")]
    SendFailed(#[source] std::io::Error),

    /// Receiving data failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] std::io::Error),

    /// The peer closed the connection in the middle of a frame.
    #[error("connection closed: {0}")]
    ConnectionClosed(String),

    /// A frame exceeded the configured size limit.
    #[error("frame of {size} bytes exceeds limit of {max} bytes")]
    FrameTooLarge {
        /// Size announced by (or requested for) the frame.
        size: u64,
        /// The configured maximum.
        max: u32,
    },
}
