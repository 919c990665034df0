//! Length-prefixed framing.
//!
//! Every request and every response is exactly one frame:
//!
//! ```text
//! +--------------------+---------------------+
//! | length (4 bytes)   | payload             |
//! | u32 big-endian     | (length bytes)      |
//! +--------------------+---------------------+
//! ```
//!
//! The length does not include the prefix itself.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::TransportError;

/// Default frame size limit: 16 MiB.
pub const DEFAULT_MAX_FRAME_BYTES: u32 = 16 * 1024 * 1024;

/// Limits applied by the framing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameConfig {
    /// Largest payload accepted or produced, in bytes.
    pub max_frame_bytes: u32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
        }
    }
}

/// Reads one frame.
///
/// Returns `Ok(None)` if the peer closed the stream cleanly before the
/// first byte of the length prefix. A close anywhere after that is
/// [`TransportError::ConnectionClosed`].
pub async fn read_frame<R: AsyncRead + Unpin>(
    reader: &mut R,
    config: &FrameConfig,
) -> Result<Option<Vec<u8>>, TransportError> {
    let mut len_buf = [0u8; 4];

    // Read the first byte on its own so a clean EOF can be told apart
    // from a truncated prefix.
    let n = reader
        .read(&mut len_buf[..1])
        .await
        .map_err(TransportError::ReceiveFailed)?;
    if n == 0 {
        return Ok(None);
    }
    read_exact_or_closed(reader, &mut len_buf[1..], "length prefix").await?;

    let len = u32::from_be_bytes(len_buf);
    if len > config.max_frame_bytes {
        return Err(TransportError::FrameTooLarge {
            size: u64::from(len),
            max: config.max_frame_bytes,
        });
    }

    let mut payload = vec![0u8; len as usize];
    read_exact_or_closed(reader, &mut payload, "payload").await?;
    Ok(Some(payload))
}

/// Writes one frame and flushes the stream.
pub async fn write_frame<W: AsyncWrite + Unpin>(
    writer: &mut W,
    payload: &[u8],
    config: &FrameConfig,
) -> Result<(), TransportError> {
    let len = u32::try_from(payload.len())
        .ok()
        .filter(|len| *len <= config.max_frame_bytes)
        .ok_or(TransportError::FrameTooLarge {
            size: payload.len() as u64,
            max: config.max_frame_bytes,
        })?;

    writer
        .write_all(&len.to_be_bytes())
        .await
        .map_err(TransportError::SendFailed)?;
    writer
        .write_all(payload)
        .await
        .map_err(TransportError::SendFailed)?;
    writer.flush().await.map_err(TransportError::SendFailed)?;
    Ok(())
}

async fn read_exact_or_closed<R: AsyncRead + Unpin>(
    reader: &mut R,
    buf: &mut [u8],
    what: &str,
) -> Result<(), TransportError> {
    match reader.read_exact(buf).await {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            Err(TransportError::ConnectionClosed(format!(
                "peer closed during {what}"
            )))
        }
        Err(e) => Err(TransportError::ReceiveFailed(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::duplex;

    #[tokio::test]
    async fn test_write_then_read_returns_same_payload() {
        let (mut client, mut server) = duplex(1024);
        let config = FrameConfig::default();

        write_frame(&mut client, b"[5,5]", &config).await.unwrap();
        let frame = read_frame(&mut server, &config).await.unwrap();

        assert_eq!(frame.as_deref(), Some(&b"[5,5]"[..]));
    }

    #[tokio::test]
    async fn test_write_frame_prefixes_big_endian_length() {
        let (mut client, mut server) = duplex(1024);
        write_frame(&mut client, &[9, 9, 9], &FrameConfig::default())
            .await
            .unwrap();
        drop(client);

        let mut raw = Vec::new();
        server.read_to_end(&mut raw).await.unwrap();
        assert_eq!(raw, vec![0, 0, 0, 3, 9, 9, 9]);
    }

    #[tokio::test]
    async fn test_read_frame_empty_payload_is_valid() {
        let (mut client, mut server) = duplex(64);
        let config = FrameConfig::default();
        write_frame(&mut client, &[], &config).await.unwrap();

        let frame = read_frame(&mut server, &config).await.unwrap();
        assert_eq!(frame, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_read_frame_clean_eof_returns_none() {
        let (client, mut server) = duplex(64);
        drop(client);

        let frame = read_frame(&mut server, &FrameConfig::default())
            .await
            .unwrap();
        assert!(frame.is_none());
    }

    #[tokio::test]
    async fn test_read_frame_truncated_payload_is_connection_closed() {
        let (mut client, mut server) = duplex(64);
        // Announce 10 bytes, deliver 2, then hang up.
        client.write_all(&[0, 0, 0, 10, 1, 2]).await.unwrap();
        drop(client);

        let result = read_frame(&mut server, &FrameConfig::default()).await;
        assert!(matches!(result, Err(TransportError::ConnectionClosed(_))));
    }

    #[tokio::test]
    async fn test_read_frame_truncated_prefix_is_connection_closed() {
        let (mut client, mut server) = duplex(64);
        client.write_all(&[0, 0]).await.unwrap();
        drop(client);

        let result = read_frame(&mut server, &FrameConfig::default()).await;
        assert!(matches!(result, Err(TransportError::ConnectionClosed(_))));
    }

    #[tokio::test]
    async fn test_read_frame_over_limit_is_rejected() {
        let (mut client, mut server) = duplex(64);
        let config = FrameConfig { max_frame_bytes: 4 };
        client.write_all(&[0, 0, 0, 5]).await.unwrap();

        let result = read_frame(&mut server, &config).await;
        assert!(matches!(
            result,
            Err(TransportError::FrameTooLarge { size: 5, max: 4 })
        ));
    }

    #[tokio::test]
    async fn test_write_frame_over_limit_is_rejected() {
        let (mut client, _server) = duplex(64);
        let config = FrameConfig { max_frame_bytes: 2 };

        let result = write_frame(&mut client, &[1, 2, 3], &config).await;
        assert!(matches!(result, Err(TransportError::FrameTooLarge { .. })));
    }
}
