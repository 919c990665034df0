//! Remote service clients for Mazeway.
//!
//! Two services sit behind plain TCP:
//!
//! - the **generator** ([`MazeServiceClient`], port 5400 by default) turns
//!   `[rows, cols]` into a compressed maze;
//! - the **solver** ([`SolverServiceClient`], port 5401 by default) turns a
//!   maze into a path from start to goal.
//!
//! Each call is one round trip on a fresh connection, bounded by the
//! timeouts in [`ClientConfig`]. The [`MazeGenerator`] and [`MazeSolver`]
//! traits are what the session layer depends on.

mod config;
mod error;
mod exchange;
mod generator;
mod solver;

pub use config::{
    ClientConfig, ServiceEndpoint, DEFAULT_GENERATOR_PORT, DEFAULT_HOST, DEFAULT_SOLVER_PORT,
};
pub use error::ClientError;
pub use generator::{MazeGenerator, MazeServiceClient};
pub use solver::{MazeSolver, SolverServiceClient};
