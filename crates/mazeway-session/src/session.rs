//! The maze session: the one owner of game state.
//!
//! A session holds the active maze, its solution (if one was fetched), and
//! the player's position. Every change goes through a method here, and
//! every accepted change is announced through the [`ChangeNotifier`]
//! before that method returns.
//!
//! # Locking
//!
//! State sits behind a `tokio::sync::Mutex`. Remote round trips and file
//! I/O run with the lock released; the result is installed under the lock
//! together with its event, so observers never see a change without its
//! notification or the other way round. A failed operation never touches
//! the state.

use std::path::PathBuf;
use std::sync::Arc;

use mazeway_client::{MazeGenerator, MazeSolver};
use mazeway_protocol::{Direction, Maze, MazeDimensions, Position, ProtocolError, SolutionPath};
use tokio::sync::{Mutex, MutexGuard};

use crate::{
    ChangeNotifier, MazeStore, MoveOutcome, PlayerStateMachine, SessionConfig, SessionError,
    SessionEvent,
};

/// The loaded maze and everything that depends on it.
#[derive(Debug)]
struct ActiveMaze {
    player: PlayerStateMachine,
    solution: Option<SolutionPath>,
}

impl ActiveMaze {
    fn maze(&self) -> &Arc<Maze> {
        self.player.maze()
    }
}

/// A read-only copy of the session state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// The active maze, if any.
    pub maze: Option<Arc<Maze>>,
    /// The solution for the active maze, if one was fetched.
    pub solution: Option<SolutionPath>,
    /// The player's position. `Some` exactly when `maze` is.
    pub player: Option<Position>,
}

impl SessionSnapshot {
    /// `true` if the player stands on the active maze's goal.
    pub fn at_goal(&self) -> bool {
        match (&self.maze, self.player) {
            (Some(maze), Some(pos)) => pos == maze.goal(),
            _ => false,
        }
    }
}

/// Orchestrates the generator, the solver, the player and saved mazes.
///
/// `G` and `S` are usually [`MazeServiceClient`](mazeway_client::MazeServiceClient)
/// and [`SolverServiceClient`](mazeway_client::SolverServiceClient).
#[derive(Debug)]
pub struct MazeSession<G, S> {
    generator: G,
    solver: S,
    store: MazeStore,
    notifier: ChangeNotifier,
    state: Mutex<Option<ActiveMaze>>,
}

impl<G: MazeGenerator, S: MazeSolver> MazeSession<G, S> {
    /// A session with no maze loaded, saving under `config.save_dir`.
    pub fn new(generator: G, solver: S, notifier: ChangeNotifier, config: SessionConfig) -> Self {
        Self::with_store(generator, solver, MazeStore::new(config.save_dir), notifier)
    }

    /// A session using an existing store.
    pub fn with_store(generator: G, solver: S, store: MazeStore, notifier: ChangeNotifier) -> Self {
        Self {
            generator,
            solver,
            store,
            notifier,
            state: Mutex::new(None),
        }
    }

    /// The saved-maze store.
    pub fn store(&self) -> &MazeStore {
        &self.store
    }

    /// Fetches a new maze and makes it the active one.
    ///
    /// On success the solution is cleared, the player is put on the new
    /// start cell, and [`SessionEvent::MazeGenerated`] is published.
    ///
    /// # Errors
    /// [`SessionError::Remote`] if the round trip fails. The previous maze,
    /// if any, stays active.
    pub async fn generate(&self, dims: MazeDimensions) -> Result<Arc<Maze>, SessionError> {
        let maze = self
            .generator
            .request_maze(dims)
            .await
            .inspect_err(|e| tracing::warn!(%dims, error = %e, "maze generation failed"))?;

        let mut state = self.state.lock().await;
        Ok(self.install(&mut state, maze))
    }

    /// Fetches a solution for the active maze and stores it.
    ///
    /// Publishes [`SessionEvent::MazeSolved`] on success.
    ///
    /// # Errors
    /// - [`SessionError::NoActiveMaze`] if nothing is loaded.
    /// - [`SessionError::Remote`] if the round trip fails.
    /// - [`SessionError::Protocol`] if the path does not lead from start
    ///   to goal through open cells.
    /// - [`SessionError::MazeReplaced`] if another maze was installed
    ///   while the solver was working.
    ///
    /// The stored solution is unchanged on every error.
    pub async fn solve(&self) -> Result<SolutionPath, SessionError> {
        let maze = {
            let state = self.state.lock().await;
            let active = state.as_ref().ok_or(SessionError::NoActiveMaze)?;
            Arc::clone(active.maze())
        };

        let path = self
            .solver
            .request_solution(&maze)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "maze solving failed"))?;
        if !path.connects(&maze) {
            tracing::warn!(steps = path.len(), "solver path does not solve the maze");
            return Err(ProtocolError::InvalidSolution(format!(
                "path does not lead from {} to {} through open cells",
                maze.start(),
                maze.goal()
            ))
            .into());
        }

        let mut state = self.state.lock().await;
        let active = state.as_mut().ok_or(SessionError::NoActiveMaze)?;
        if !Arc::ptr_eq(active.maze(), &maze) {
            tracing::warn!("maze replaced during solve, dropping solution");
            return Err(SessionError::MazeReplaced);
        }

        let steps = path.len();
        active.solution = Some(path.clone());
        tracing::info!(steps, "maze solved");
        self.notifier.publish(&SessionEvent::MazeSolved { steps });
        Ok(path)
    }

    /// Moves the player one cell.
    ///
    /// An accepted move publishes [`SessionEvent::PlayerMoved`]; a rejected
    /// one changes nothing and publishes nothing.
    ///
    /// # Errors
    /// [`SessionError::NoActiveMaze`] if nothing is loaded.
    pub async fn move_player(&self, direction: Direction) -> Result<MoveOutcome, SessionError> {
        let mut state = self.state.lock().await;
        let active = state.as_mut().ok_or(SessionError::NoActiveMaze)?;

        let Some(position) = active.player.try_move(direction) else {
            tracing::debug!(%direction, at = %active.player.position(), "move rejected");
            return Ok(MoveOutcome::Rejected);
        };

        tracing::debug!(%direction, to = %position, "player moved");
        self.notifier.publish(&SessionEvent::PlayerMoved { position });

        if active.player.at_goal() {
            tracing::info!(%position, "goal reached");
            Ok(MoveOutcome::ReachedGoal { position })
        } else {
            Ok(MoveOutcome::Moved { position })
        }
    }

    /// Puts the player back on the start cell.
    ///
    /// Publishes [`SessionEvent::PlayerMoved`] only if the player was
    /// somewhere else.
    ///
    /// # Errors
    /// [`SessionError::NoActiveMaze`] if nothing is loaded.
    pub async fn restart(&self) -> Result<Position, SessionError> {
        let mut state = self.state.lock().await;
        let active = state.as_mut().ok_or(SessionError::NoActiveMaze)?;

        let position = active.maze().start();
        if active.player.reset() {
            tracing::info!(%position, "player restarted");
            self.notifier.publish(&SessionEvent::PlayerMoved { position });
        }
        Ok(position)
    }

    /// Saves the active maze under `name`.
    ///
    /// # Errors
    /// - [`SessionError::InvalidName`] if `name` is empty or not a plain
    ///   file name.
    /// - [`SessionError::NoActiveMaze`] if nothing is loaded.
    /// - [`SessionError::Io`] if the file cannot be written.
    pub async fn save(&self, name: &str) -> Result<PathBuf, SessionError> {
        self.store.path_for(name)?;
        let maze = {
            let state = self.state.lock().await;
            let active = state.as_ref().ok_or(SessionError::NoActiveMaze)?;
            Arc::clone(active.maze())
        };

        self.store
            .save(name, &maze)
            .await
            .inspect_err(|e| tracing::warn!(name, error = %e, "save failed"))
    }

    /// Loads the maze saved under `name` and makes it the active one,
    /// exactly as [`generate`](Self::generate) would.
    ///
    /// # Errors
    /// [`SessionError::InvalidName`], [`SessionError::Io`],
    /// [`SessionError::Codec`] or [`SessionError::Protocol`] from the
    /// store. The previous maze, if any, stays active.
    pub async fn load(&self, name: &str) -> Result<Arc<Maze>, SessionError> {
        let maze = self
            .store
            .load(name)
            .await
            .inspect_err(|e| tracing::warn!(name, error = %e, "load failed"))?;

        let mut state = self.state.lock().await;
        Ok(self.install(&mut state, maze))
    }

    /// Names of the saved mazes, sorted.
    ///
    /// # Errors
    /// [`SessionError::Io`] if the save directory cannot be read.
    pub async fn saved_mazes(&self) -> Result<Vec<String>, SessionError> {
        self.store.list().await
    }

    /// A copy of the current state.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock().await;
        match state.as_ref() {
            Some(active) => SessionSnapshot {
                maze: Some(Arc::clone(active.maze())),
                solution: active.solution.clone(),
                player: Some(active.player.position()),
            },
            None => SessionSnapshot::default(),
        }
    }

    /// The player's position, if a maze is loaded.
    pub async fn player_position(&self) -> Option<Position> {
        let state = self.state.lock().await;
        state.as_ref().map(|active| active.player.position())
    }

    fn install(&self, state: &mut MutexGuard<'_, Option<ActiveMaze>>, maze: Maze) -> Arc<Maze> {
        let maze = Arc::new(maze);
        let (rows, cols) = (maze.rows(), maze.cols());
        **state = Some(ActiveMaze {
            player: PlayerStateMachine::new(Arc::clone(&maze)),
            solution: None,
        });

        tracing::info!(rows, cols, start = %maze.start(), goal = %maze.goal(), "maze installed");
        self.notifier.publish(&SessionEvent::MazeGenerated { rows, cols });
        maze
    }
}
