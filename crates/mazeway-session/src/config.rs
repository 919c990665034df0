//! Session configuration.

use std::path::PathBuf;

/// Directory saved mazes go to when nothing else is configured.
pub const DEFAULT_SAVE_DIR: &str = "Saved_Mazes";

/// Configuration for a [`MazeSession`](crate::MazeSession).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Where [`save`](crate::MazeSession::save) and
    /// [`load`](crate::MazeSession::load) keep one file per maze name.
    ///
    /// Default: `Saved_Mazes`, relative to the working directory.
    pub save_dir: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from(DEFAULT_SAVE_DIR),
        }
    }
}
