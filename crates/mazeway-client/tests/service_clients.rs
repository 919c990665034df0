//! Integration tests for the generator and solver clients.
//!
//! Each test binds a stub service to an OS-assigned port on 127.0.0.1 and
//! points a real client at it, so the full connect → write → read →
//! decode path runs over an actual socket.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use mazeway_client::{
    ClientConfig, ClientError, MazeGenerator, MazeServiceClient, MazeSolver, ServiceEndpoint,
    SolverServiceClient,
};
use mazeway_protocol::{Maze, MazeDimensions, Position, SolutionPath, WireCodec};
use mazeway_transport::frame::{read_frame, write_frame};
use mazeway_transport::FrameConfig;
use tokio::net::TcpListener;

// =========================================================================
// Fixtures
// =========================================================================

/// ```text
/// S . # . .
/// # . # . #
/// . . . . .
/// . # # # .
/// . . . # G
/// ```
fn maze_5x5() -> Maze {
    Maze::from_grid(
        vec![
            vec![0, 0, 1, 0, 0],
            vec![1, 0, 1, 0, 1],
            vec![0, 0, 0, 0, 0],
            vec![0, 1, 1, 1, 0],
            vec![0, 0, 0, 1, 0],
        ],
        Position::new(0, 0),
        Position::new(4, 4),
    )
    .unwrap()
}

fn path_5x5() -> SolutionPath {
    let steps = [(0, 0), (0, 1), (1, 1), (2, 1), (2, 2), (2, 3), (2, 4), (3, 4), (4, 4)];
    SolutionPath::new(steps.iter().map(|&(r, c)| Position::new(r, c)).collect()).unwrap()
}

fn dims(rows: usize, cols: usize) -> MazeDimensions {
    MazeDimensions::new(rows, cols).unwrap()
}

fn fast_config() -> ClientConfig {
    ClientConfig {
        connect_timeout: Duration::from_secs(2),
        request_timeout: Duration::from_secs(2),
        ..ClientConfig::default()
    }
}

fn local(port: u16) -> ServiceEndpoint {
    ServiceEndpoint::new("127.0.0.1", port)
}

/// Starts a stub service that handles `connections` connections.
///
/// For each one it reads a single request frame and passes it to
/// `respond`; a `Some` reply is written back as one frame, `None` means
/// hang up without answering. Returns the port and a counter of accepted
/// connections.
async fn stub_service<F>(connections: usize, respond: F) -> (u16, Arc<AtomicUsize>)
where
    F: Fn(Vec<u8>) -> Option<Vec<u8>> + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let accepted = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&accepted);

    tokio::spawn(async move {
        let config = FrameConfig::default();
        for _ in 0..connections {
            let (mut stream, _) = listener.accept().await.unwrap();
            counter.fetch_add(1, Ordering::SeqCst);
            let Ok(Some(request)) = read_frame(&mut stream, &config).await else {
                continue;
            };
            if let Some(reply) = respond(request) {
                let _ = write_frame(&mut stream, &reply, &config).await;
            }
        }
    });

    (port, accepted)
}

/// A port with nothing listening on it.
async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

// =========================================================================
// Generator
// =========================================================================

#[tokio::test]
async fn test_request_maze_returns_decoded_maze() {
    let (port, _) = stub_service(1, |request| {
        assert_eq!(request, b"[5,5]", "generator expects [rows, cols]");
        Some(WireCodec::new().encode_maze_payload(&maze_5x5()))
    })
    .await;

    let client = MazeServiceClient::new(local(port), fast_config());
    let maze = client.request_maze(dims(5, 5)).await.expect("should succeed");

    assert_eq!(maze, maze_5x5());
}

#[tokio::test]
async fn test_request_maze_uses_a_fresh_connection_per_call() {
    let (port, accepted) = stub_service(2, |_| {
        Some(WireCodec::new().encode_maze_payload(&maze_5x5()))
    })
    .await;
    let client = MazeServiceClient::new(local(port), fast_config());

    client.request_maze(dims(5, 5)).await.unwrap();
    client.request_maze(dims(5, 5)).await.unwrap();

    assert_eq!(accepted.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_request_maze_connection_refused_is_service_unavailable() {
    let client = MazeServiceClient::new(local(closed_port().await), fast_config());

    let result = client.request_maze(dims(5, 5)).await;
    assert!(matches!(result, Err(ClientError::ServiceUnavailable(_))));
}

#[tokio::test]
async fn test_request_maze_hang_up_without_reply_is_service_unavailable() {
    let (port, _) = stub_service(1, |_| None).await;
    let client = MazeServiceClient::new(local(port), fast_config());

    let result = client.request_maze(dims(5, 5)).await;
    assert!(matches!(result, Err(ClientError::ServiceUnavailable(_))));
}

#[tokio::test]
async fn test_request_maze_corrupt_blob_is_codec_error() {
    let (port, _) = stub_service(1, |_| Some(vec![0xAB, 0xCD])).await;
    let client = MazeServiceClient::new(local(port), fast_config());

    let result = client.request_maze(dims(5, 5)).await;
    assert!(matches!(result, Err(ClientError::Codec(_))));
}

#[tokio::test]
async fn test_request_maze_wrong_size_is_protocol_error() {
    let (port, _) = stub_service(1, |_| {
        Some(WireCodec::new().encode_maze_payload(&maze_5x5()))
    })
    .await;
    let client = MazeServiceClient::new(local(port), fast_config());

    let result = client.request_maze(dims(6, 6)).await;
    assert!(matches!(result, Err(ClientError::Protocol(_))));
}

#[tokio::test]
async fn test_request_maze_silent_service_times_out() {
    // Accepts, reads the request, then never answers.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let _ = read_frame(&mut stream, &FrameConfig::default()).await;
        tokio::time::sleep(Duration::from_secs(30)).await;
        drop(stream);
    });

    let config = ClientConfig {
        request_timeout: Duration::from_millis(100),
        ..fast_config()
    };
    let client = MazeServiceClient::new(local(port), config);

    let result = client.request_maze(dims(5, 5)).await;
    match result {
        Err(ClientError::TimedOut { after, .. }) => {
            assert_eq!(after, Duration::from_millis(100));
        }
        other => panic!("expected TimedOut, got {other:?}"),
    }
}

// =========================================================================
// Solver
// =========================================================================

#[tokio::test]
async fn test_request_solution_returns_ordered_positions() {
    let (port, _) = stub_service(1, |request| {
        let wire = WireCodec::new();
        let maze = wire.decode_maze_for_solve(&request).expect("solver gets a maze");
        assert_eq!(maze, maze_5x5());
        Some(wire.encode_solution_payload(&path_5x5()).unwrap())
    })
    .await;

    let client = SolverServiceClient::new(local(port), fast_config());
    let path = client
        .request_solution(&maze_5x5())
        .await
        .expect("should succeed");

    assert_eq!(path, path_5x5());
    assert!(path.connects(&maze_5x5()));
}

#[tokio::test]
async fn test_request_solution_state_without_position_is_protocol_error() {
    let (port, _) = stub_service(1, |_| {
        Some(br#"{"path":[{"position":{"row":0,"col":0}},{"visited":true}]}"#.to_vec())
    })
    .await;
    let client = SolverServiceClient::new(local(port), fast_config());

    let result = client.request_solution(&maze_5x5()).await;
    assert!(matches!(result, Err(ClientError::Protocol(_))));
}

#[tokio::test]
async fn test_request_solution_connection_refused_is_service_unavailable() {
    let client = SolverServiceClient::new(local(closed_port().await), fast_config());

    let result = client.request_solution(&maze_5x5()).await;
    assert!(matches!(result, Err(ClientError::ServiceUnavailable(_))));
}
