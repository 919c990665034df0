//! Where the services live and how long to wait for them.

use std::fmt;
use std::time::Duration;

use mazeway_transport::FrameConfig;

/// Port the maze generator listens on by default.
pub const DEFAULT_GENERATOR_PORT: u16 = 5400;

/// Port the maze solver listens on by default.
pub const DEFAULT_SOLVER_PORT: u16 = 5401;

/// Host both services run on by default.
pub const DEFAULT_HOST: &str = "localhost";

/// Network address of one remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    /// Host name or literal address.
    pub host: String,
    /// TCP port.
    pub port: u16,
}

impl ServiceEndpoint {
    /// Creates an endpoint.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// The generator service on [`DEFAULT_HOST`].
    pub fn default_generator() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_GENERATOR_PORT)
    }

    /// The solver service on [`DEFAULT_HOST`].
    pub fn default_solver() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_SOLVER_PORT)
    }
}

impl fmt::Display for ServiceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Timeouts and limits applied to every round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// Upper bound on establishing the TCP connection.
    pub connect_timeout: Duration,
    /// Upper bound on writing the request and reading the response.
    pub request_timeout: Duration,
    /// Frame size limits.
    pub frames: FrameConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
            frames: FrameConfig::default(),
        }
    }
}
