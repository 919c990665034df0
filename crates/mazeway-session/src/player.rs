//! The player position state machine.
//!
//! There is one state, the current position, and it is always an open
//! cell of the maze the machine was built for:
//!
//! ```text
//!   (r, c) ──try_move(dir)──→ (r', c')   if the neighbour is inside and open
//!   (r, c) ──try_move(dir)──→ (r, c)     otherwise, untouched
//!   (r, c) ──reset()────────→ start
//! ```
//!
//! Reaching the goal is not a state of its own. The session compares the
//! new position with the goal after each accepted move.

use std::sync::Arc;

use mazeway_protocol::{Direction, Maze, Position};

/// What a call to [`MazeSession::move_player`](crate::MazeSession::move_player)
/// did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move would have left the grid or entered a wall. Nothing changed.
    Rejected,
    /// The player is now at `position`.
    Moved {
        /// The new position.
        position: Position,
    },
    /// The player is now at `position`, which is the goal.
    ReachedGoal {
        /// The new position, equal to the maze's goal.
        position: Position,
    },
}

impl MoveOutcome {
    /// `true` unless the move was rejected.
    pub fn is_accepted(self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

/// Tracks the player's position on one maze.
#[derive(Debug, Clone)]
pub struct PlayerStateMachine {
    maze: Arc<Maze>,
    position: Position,
}

impl PlayerStateMachine {
    /// A player standing on `maze`'s start cell.
    pub fn new(maze: Arc<Maze>) -> Self {
        let position = maze.start();
        Self { maze, position }
    }

    /// The maze this player walks on.
    pub fn maze(&self) -> &Arc<Maze> {
        &self.maze
    }

    /// Current position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Attempts one step in `direction`.
    ///
    /// Returns the new position if the target cell is inside the grid and
    /// open. Otherwise returns `None` and the position is unchanged.
    pub fn try_move(&mut self, direction: Direction) -> Option<Position> {
        let target = self
            .position
            .step(direction)
            .filter(|&p| self.maze.is_open(p))?;
        self.position = target;
        Some(target)
    }

    /// Puts the player back on the start cell.
    ///
    /// Returns `true` if the position changed.
    pub fn reset(&mut self) -> bool {
        let start = self.maze.start();
        let moved = self.position != start;
        self.position = start;
        moved
    }

    /// `true` if the player stands on the goal.
    pub fn at_goal(&self) -> bool {
        self.position == self.maze.goal()
    }
}

#[cfg(test)]
mod tests {
    //! Naming: `test_{function}_{scenario}_{expected}`.

    use super::*;

    /// ```text
    /// S . #
    /// # . #
    /// # . G
    /// ```
    fn corridor() -> Arc<Maze> {
        Arc::new(
            Maze::from_grid(
                vec![vec![0, 0, 1], vec![1, 0, 1], vec![1, 0, 0]],
                Position::new(0, 0),
                Position::new(2, 2),
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_new_starts_at_maze_start() {
        let player = PlayerStateMachine::new(corridor());
        assert_eq!(player.position(), Position::new(0, 0));
        assert!(!player.at_goal());
    }

    #[test]
    fn test_try_move_into_open_cell_moves() {
        let mut player = PlayerStateMachine::new(corridor());
        assert_eq!(player.try_move(Direction::Right), Some(Position::new(0, 1)));
        assert_eq!(player.position(), Position::new(0, 1));
    }

    #[test]
    fn test_try_move_off_top_edge_is_rejected() {
        let mut player = PlayerStateMachine::new(corridor());
        assert_eq!(player.try_move(Direction::Up), None);
        assert_eq!(player.try_move(Direction::Left), None);
        assert_eq!(player.position(), Position::new(0, 0));
    }

    #[test]
    fn test_try_move_into_wall_is_rejected() {
        let mut player = PlayerStateMachine::new(corridor());
        assert_eq!(player.try_move(Direction::Down), None);
        assert_eq!(player.position(), Position::new(0, 0));
    }

    #[test]
    fn test_try_move_off_bottom_right_edges_is_rejected() {
        let mut player = PlayerStateMachine::new(corridor());
        for dir in [Direction::Right, Direction::Down, Direction::Down, Direction::Right] {
            assert!(player.try_move(dir).is_some());
        }
        assert!(player.at_goal());
        assert_eq!(player.try_move(Direction::Down), None);
        assert_eq!(player.try_move(Direction::Right), None);
        assert_eq!(player.position(), Position::new(2, 2));
    }

    #[test]
    fn test_try_move_accepted_changes_one_axis_by_one() {
        let maze = corridor();
        let mut player = PlayerStateMachine::new(Arc::clone(&maze));
        // Walk every direction from every reachable cell a few times over.
        for _ in 0..4 {
            for dir in Direction::ALL {
                let before = player.position();
                match player.try_move(dir) {
                    Some(after) => {
                        assert!(before.is_adjacent(after));
                        assert!(maze.is_open(after));
                    }
                    None => assert_eq!(player.position(), before),
                }
            }
        }
    }

    #[test]
    fn test_reset_returns_to_start() {
        let mut player = PlayerStateMachine::new(corridor());
        player.try_move(Direction::Right);
        assert!(player.reset());
        assert_eq!(player.position(), Position::new(0, 0));
    }

    #[test]
    fn test_reset_at_start_reports_no_change() {
        let mut player = PlayerStateMachine::new(corridor());
        assert!(!player.reset());
    }
}
