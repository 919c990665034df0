//! Maze session state for Mazeway.
//!
//! This crate owns everything the player can change:
//!
//! 1. **Player movement** ([`PlayerStateMachine`]): one position, moved
//!    only onto open cells.
//! 2. **The session** ([`MazeSession`]): the active maze, its solution and
//!    the player, changed only through generate, solve, move, restart,
//!    save and load.
//! 3. **Notification** ([`ChangeNotifier`], [`Subscriber`]): every accepted
//!    change is announced to every subscriber, in order.
//! 4. **Saved mazes** ([`MazeStore`]): one compressed file per name.
//!
//! # How it fits in the stack
//!
//! ```text
//! Presentation (above)  ← reads snapshots, receives SessionEvents
//!     ↕
//! Session Layer (this crate)  ← the single source of truth
//!     ↕
//! Client Layer (below)  ← generator and solver round trips
//! ```

mod config;
mod error;
mod notifier;
mod player;
mod session;
mod store;

pub use config::{SessionConfig, DEFAULT_SAVE_DIR};
pub use error::SessionError;
pub use notifier::{ChangeNotifier, ChannelSubscriber, SessionEvent, Subscriber};
pub use player::{MoveOutcome, PlayerStateMachine};
pub use session::{MazeSession, SessionSnapshot};
pub use store::MazeStore;
