//! TCP implementation of [`Connection`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::frame::{read_frame, write_frame, FrameConfig};
use crate::{Connection, ConnectionId, TransportError};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// A framed TCP connection to a remote service.
///
/// One connection carries one request/response exchange. It is never
/// reused: the caller closes it (or drops it, which closes the socket)
/// once the response has been read.
pub struct TcpConnection {
    id: ConnectionId,
    stream: TcpStream,
    frames: FrameConfig,
}

impl TcpConnection {
    /// Connects to `host:port`, giving up after `connect_timeout`.
    ///
    /// `host` may be a name (resolved through the system resolver) or
    /// a literal address.
    pub async fn connect(
        host: &str,
        port: u16,
        connect_timeout: Duration,
        frames: FrameConfig,
    ) -> Result<Self, TransportError> {
        let addr = format!("{host}:{port}");
        let stream = match tokio::time::timeout(
            connect_timeout,
            TcpStream::connect((host, port)),
        )
        .await
        {
            Ok(Ok(stream)) => stream,
            Ok(Err(source)) => {
                return Err(TransportError::ConnectFailed { addr, source });
            }
            Err(_) => {
                return Err(TransportError::ConnectFailed {
                    addr,
                    source: std::io::Error::new(
                        std::io::ErrorKind::TimedOut,
                        format!("no connection within {connect_timeout:?}"),
                    ),
                });
            }
        };
        stream.set_nodelay(true).map_err(|source| {
            TransportError::ConnectFailed {
                addr: addr.clone(),
                source,
            }
        })?;

        let id = ConnectionId::new(
            NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed),
        );
        tracing::debug!(%id, %addr, "connected");

        Ok(Self { id, stream, frames })
    }
}

impl Connection for TcpConnection {
    type Error = TransportError;

    async fn send(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        write_frame(&mut self.stream, data, &self.frames).await
    }

    async fn recv(&mut self) -> Result<Option<Vec<u8>>, Self::Error> {
        read_frame(&mut self.stream, &self.frames).await
    }

    async fn close(&mut self) -> Result<(), Self::Error> {
        tracing::debug!(id = %self.id, "closing connection");
        self.stream
            .shutdown()
            .await
            .map_err(TransportError::SendFailed)
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}
