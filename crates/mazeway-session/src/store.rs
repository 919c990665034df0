//! Saved mazes on disk.
//!
//! One file per name inside a single directory. The file holds the
//! compressed canonical layout, the same bytes the generator sends, with
//! no header or version. Each save writes its own uniquely named hidden
//! temporary file in the same directory and renames it over the target, so
//! a reader never sees a half-written file and concurrent saves of one name
//! do not collide.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use mazeway_protocol::{Compressor, Lz4Compressor, Maze, WireCodec};

use crate::SessionError;

/// Reads and writes saved mazes under one directory.
#[derive(Debug, Clone)]
pub struct MazeStore<C: Compressor = Lz4Compressor> {
    dir: PathBuf,
    wire: WireCodec<C>,
}

impl MazeStore {
    /// A store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_wire(dir, WireCodec::new())
    }
}

impl<C: Compressor> MazeStore<C> {
    /// A store with a custom wire codec.
    pub fn with_wire(dir: impl Into<PathBuf>, wire: WireCodec<C>) -> Self {
        Self {
            dir: dir.into(),
            wire,
        }
    }

    /// The save directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where `name` is stored.
    ///
    /// # Errors
    /// [`SessionError::InvalidName`] if `name` is not a plain file name.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, SessionError> {
        validate_name(name)?;
        Ok(self.dir.join(name))
    }

    /// Writes `maze` under `name`, replacing any earlier save.
    ///
    /// # Errors
    /// [`SessionError::InvalidName`] for a bad name, [`SessionError::Io`]
    /// if the directory or file cannot be written.
    pub async fn save(&self, name: &str, maze: &Maze) -> Result<PathBuf, SessionError> {
        let path = self.path_for(name)?;
        let bytes = self.wire.encode_maze_payload(maze);
        let len = bytes.len();

        tokio::fs::create_dir_all(&self.dir).await?;
        let (dir, target) = (self.dir.clone(), path.clone());
        tokio::task::spawn_blocking(move || write_then_persist(&dir, &target, &bytes))
            .await
            .map_err(io::Error::other)??;

        tracing::info!(path = %path.display(), bytes = len, "maze saved");
        Ok(path)
    }

    /// Reads the maze saved under `name`.
    ///
    /// # Errors
    /// - [`SessionError::InvalidName`] for a bad name.
    /// - [`SessionError::Io`] if the file is missing or unreadable.
    /// - [`SessionError::Codec`] / [`SessionError::Protocol`] if the file
    ///   does not hold a valid maze.
    pub async fn load(&self, name: &str) -> Result<Maze, SessionError> {
        let path = self.path_for(name)?;
        let bytes = tokio::fs::read(&path).await?;
        let maze = self.wire.decode_stored_maze(&bytes)?;

        tracing::info!(path = %path.display(), dims = %maze.dimensions(), "maze loaded");
        Ok(maze)
    }

    /// Names of all saved mazes, sorted.
    ///
    /// A save directory that does not exist yet holds no mazes.
    ///
    /// # Errors
    /// [`SessionError::Io`] if the directory cannot be read.
    pub async fn list(&self) -> Result<Vec<String>, SessionError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if validate_name(name).is_ok() {
                    names.push(name.to_owned());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

fn write_then_persist(dir: &Path, path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    if let Err(e) = tmp.persist(path) {
        let tmp_path = e.file.path().to_path_buf();
        if let Err(cleanup) = e.file.close() {
            tracing::debug!(tmp = %tmp_path.display(), error = %cleanup, "temp save cleanup failed");
        }
        return Err(e.error);
    }
    Ok(())
}

/// A name must map to exactly one visible file inside the save directory.
fn validate_name(name: &str) -> Result<(), SessionError> {
    let bad = name.is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\', '\0']);
    if bad {
        return Err(SessionError::InvalidName(name.to_owned()));
    }
    Ok(())
}
