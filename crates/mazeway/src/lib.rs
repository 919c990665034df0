//! # Mazeway
//!
//! Client core for a networked maze game.
//!
//! A maze comes from a remote generator service, a solution from a remote
//! solver service, and the player walks the maze locally. Mazeway owns the
//! state in between: it talks to both services over a small framed TCP
//! protocol, validates every move against the wall grid, saves and loads
//! mazes, and tells subscribers about every change.
//!
//! ## Crates
//!
//! - `mazeway-transport`: framed TCP connections.
//! - `mazeway-protocol`: maze types, binary layout, LZ4, JSON payloads.
//! - `mazeway-client`: one-shot generator and solver round trips.
//! - `mazeway-session`: the session, the player, notification, saves.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use mazeway::prelude::*;
//!
//! # async fn run() -> Result<(), MazewayError> {
//! let config = MazewayConfig::load_or_default(Path::new("mazeway.json"))?;
//! init_tracing(&config.log_level);
//!
//! let session = MazewayBuilder::new()
//!     .config(config)
//!     .subscribe(|event: &SessionEvent| println!("{event:?}"))
//!     .build();
//!
//! session.generate(MazeDimensions::new(5, 5)?).await?;
//! let path = session.solve().await?;
//! println!("{} steps", path.len());
//! # Ok(())
//! # }
//! ```

mod builder;
mod config;
mod error;
mod logging;

pub use builder::{MazewayBuilder, MazewaySession};
pub use config::{ConfigError, MazewayConfig};
pub use error::MazewayError;
pub use logging::{init_tracing, DEFAULT_LOG_FILTER};

pub use mazeway_client as client;
pub use mazeway_protocol as protocol;
pub use mazeway_session as session;
pub use mazeway_transport as transport;

/// Everything an application usually needs.
pub mod prelude {
    pub use crate::{
        init_tracing, ConfigError, MazewayBuilder, MazewayConfig, MazewayError, MazewaySession,
    };
    pub use mazeway_client::{
        ClientConfig, ClientError, MazeGenerator, MazeServiceClient, MazeSolver, ServiceEndpoint,
        SolverServiceClient,
    };
    pub use mazeway_protocol::{
        CodecError, Direction, Maze, MazeDimensions, Position, ProtocolError, SolutionPath,
    };
    pub use mazeway_session::{
        ChangeNotifier, ChannelSubscriber, MazeSession, MazeStore, MoveOutcome, SessionError,
        SessionEvent, SessionSnapshot, Subscriber,
    };
}
