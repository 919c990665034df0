//! One request, one response, one connection.

use std::time::Instant;

use mazeway_protocol::ProtocolError;
use mazeway_transport::{Connection, TcpConnection, TransportError};

use crate::{ClientConfig, ClientError, ServiceEndpoint};

/// Connects to `endpoint`, sends `request` as one frame, and returns the
/// single response frame.
///
/// The connection is closed before returning on every path, including
/// timeouts and errors.
pub(crate) async fn round_trip(
    endpoint: &ServiceEndpoint,
    config: &ClientConfig,
    request: &[u8],
) -> Result<Vec<u8>, ClientError> {
    let started = Instant::now();
    let mut conn = TcpConnection::connect(
        &endpoint.host,
        endpoint.port,
        config.connect_timeout,
        config.frames,
    )
    .await
    .map_err(ClientError::ServiceUnavailable)?;
    let conn_id = conn.id();

    let outcome =
        tokio::time::timeout(config.request_timeout, exchange(&mut conn, request)).await;

    if let Err(e) = conn.close().await {
        tracing::debug!(%conn_id, error = %e, "close after exchange failed");
    }

    let response = match outcome {
        Ok(result) => result?,
        Err(_) => {
            return Err(ClientError::TimedOut {
                endpoint: endpoint.to_string(),
                after: config.request_timeout,
            });
        }
    };

    tracing::debug!(
        %conn_id,
        %endpoint,
        request_bytes = request.len(),
        response_bytes = response.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "round trip complete"
    );
    Ok(response)
}

async fn exchange<C>(conn: &mut C, request: &[u8]) -> Result<Vec<u8>, ClientError>
where
    C: Connection<Error = TransportError>,
{
    conn.send(request)
        .await
        .map_err(ClientError::ServiceUnavailable)?;

    match conn.recv().await {
        Ok(Some(response)) => Ok(response),
        Ok(None) => Err(ClientError::ServiceUnavailable(
            TransportError::ConnectionClosed("closed without a response".into()),
        )),
        // The stream is fine; the answer is just not something we accept.
        Err(e @ TransportError::FrameTooLarge { .. }) => Err(ClientError::Protocol(
            ProtocolError::InvalidMessage(e.to_string()),
        )),
        Err(e) => Err(ClientError::ServiceUnavailable(e)),
    }
}
