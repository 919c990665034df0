//! Core maze types.
//!
//! These are the values that cross the wire to and from the generator and
//! solver services, and the values the session layer holds as its state.
//! Every constructor validates its invariants, so a `Maze` or
//! `SolutionPath` that exists is always well-formed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

/// Cell value for an open (walkable) cell.
pub const OPEN: u8 = 0;

/// Cell value for a wall.
pub const WALL: u8 = 1;

// ---------------------------------------------------------------------------
// Position & Direction
// ---------------------------------------------------------------------------

/// A cell coordinate: 0-indexed row and column.
///
/// Serializes as `{"row": r, "col": c}`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    /// Row index, counted from the top.
    pub row: usize,
    /// Column index, counted from the left.
    pub col: usize,
}

impl Position {
    /// Creates a position.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighbouring position one step in `direction`.
    ///
    /// Returns `None` only when the step would leave the non-negative
    /// quadrant. Upper bounds belong to the maze, see [`Maze::contains`].
    pub fn step(self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::Up => self.row.checked_sub(1).map(|row| Self { row, ..self }),
            Direction::Down => self.row.checked_add(1).map(|row| Self { row, ..self }),
            Direction::Left => self.col.checked_sub(1).map(|col| Self { col, ..self }),
            Direction::Right => self.col.checked_add(1).map(|col| Self { col, ..self }),
        }
    }

    /// `true` if `other` is exactly one orthogonal step away.
    pub fn is_adjacent(self, other: Self) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
}

impl Direction {
    /// All four directions, in a fixed order.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

// ---------------------------------------------------------------------------
// MazeDimensions
// ---------------------------------------------------------------------------

/// Smallest allowed side length.
pub const MIN_SIDE: usize = 2;

/// Upper bound on `rows * cols`.
///
/// Keeps every size in the canonical layout representable as `u32` and
/// bounds the buffers allocated while decoding untrusted payloads.
pub const MAX_CELLS: usize = 1 << 22;

/// Validated maze size: at least 2x2, at most [`MAX_CELLS`] cells.
///
/// This is the explicit board-size value passed to `generate`. On the wire
/// it is the two-element vector `[rows, cols]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "[usize; 2]", try_from = "[usize; 2]")]
pub struct MazeDimensions {
    rows: usize,
    cols: usize,
}

impl MazeDimensions {
    /// Validates and creates a dimensions value.
    ///
    /// # Errors
    /// [`ProtocolError::InvalidDimensions`] if either side is below
    /// [`MIN_SIDE`] or the cell count exceeds [`MAX_CELLS`].
    pub fn new(rows: usize, cols: usize) -> Result<Self, ProtocolError> {
        let too_big = rows.checked_mul(cols).is_none_or(|cells| cells > MAX_CELLS);
        if rows < MIN_SIDE || cols < MIN_SIDE || too_big {
            return Err(ProtocolError::InvalidDimensions { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Number of rows.
    pub fn rows(self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn cells(self) -> usize {
        self.rows * self.cols
    }
}

impl From<MazeDimensions> for [usize; 2] {
    fn from(dims: MazeDimensions) -> Self {
        [dims.rows, dims.cols]
    }
}

impl TryFrom<[usize; 2]> for MazeDimensions {
    type Error = ProtocolError;

    fn try_from([rows, cols]: [usize; 2]) -> Result<Self, Self::Error> {
        Self::new(rows, cols)
    }
}

impl fmt::Display for MazeDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

// ---------------------------------------------------------------------------
// Maze
// ---------------------------------------------------------------------------

/// An immutable rectangular grid of open/wall cells with a start and a goal.
///
/// Invariants, checked by every constructor:
/// - at least 2x2 (see [`MazeDimensions`]);
/// - every cell is [`OPEN`] or [`WALL`];
/// - `start` and `goal` are open cells inside the grid;
/// - `start != goal`.
///
/// Serializes as `{"grid": [[..], ..], "start": {..}, "goal": {..}}`, the
/// structure the solver service expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "MazeRepr", try_from = "MazeRepr")]
pub struct Maze {
    dims: MazeDimensions,
    /// Row-major cell values.
    cells: Vec<u8>,
    start: Position,
    goal: Position,
}

impl Maze {
    /// Builds a maze from row-major cells.
    ///
    /// # Errors
    /// [`ProtocolError::InvalidMaze`] if any invariant is violated.
    pub fn new(
        dims: MazeDimensions,
        cells: Vec<u8>,
        start: Position,
        goal: Position,
    ) -> Result<Self, ProtocolError> {
        if cells.len() != dims.cells() {
            return Err(ProtocolError::InvalidMaze(format!(
                "{dims} maze needs {} cells, got {}",
                dims.cells(),
                cells.len()
            )));
        }
        if let Some(index) = cells.iter().position(|&c| c != OPEN && c != WALL) {
            return Err(ProtocolError::InvalidMaze(format!(
                "cell {index} has value {}",
                cells[index]
            )));
        }

        let maze = Self {
            dims,
            cells,
            start,
            goal,
        };
        maze.check_endpoint(start, "start")?;
        maze.check_endpoint(goal, "goal")?;
        if start == goal {
            return Err(ProtocolError::InvalidMaze(format!(
                "start and goal are both {start}"
            )));
        }
        Ok(maze)
    }

    /// Builds a maze from a grid of rows.
    ///
    /// # Errors
    /// [`ProtocolError::InvalidMaze`] if the grid is ragged or violates a
    /// maze invariant, [`ProtocolError::InvalidDimensions`] if it is too
    /// small or too large.
    pub fn from_grid(
        grid: Vec<Vec<u8>>,
        start: Position,
        goal: Position,
    ) -> Result<Self, ProtocolError> {
        let rows = grid.len();
        let cols = grid.first().map_or(0, Vec::len);
        if grid.iter().any(|row| row.len() != cols) {
            return Err(ProtocolError::InvalidMaze("grid is not rectangular".into()));
        }
        let dims = MazeDimensions::new(rows, cols)?;
        let cells = grid.into_iter().flatten().collect();
        Self::new(dims, cells, start, goal)
    }

    fn check_endpoint(&self, pos: Position, name: &str) -> Result<(), ProtocolError> {
        match self.cell(pos) {
            Some(OPEN) => Ok(()),
            Some(_) => Err(ProtocolError::InvalidMaze(format!("{name} {pos} is a wall"))),
            None => Err(ProtocolError::InvalidMaze(format!(
                "{name} {pos} is outside the {} grid",
                self.dims
            ))),
        }
    }

    /// The maze size.
    pub fn dimensions(&self) -> MazeDimensions {
        self.dims
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.dims.rows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.dims.cols()
    }

    /// The start cell.
    pub fn start(&self) -> Position {
        self.start
    }

    /// The goal cell.
    pub fn goal(&self) -> Position {
        self.goal
    }

    /// `true` if `pos` lies inside the grid.
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows() && pos.col < self.cols()
    }

    /// The value of the cell at `pos`, or `None` outside the grid.
    pub fn cell(&self, pos: Position) -> Option<u8> {
        self.contains(pos)
            .then(|| self.cells[pos.row * self.cols() + pos.col])
    }

    /// `true` if `pos` is inside the grid and open.
    pub fn is_open(&self, pos: Position) -> bool {
        self.cell(pos) == Some(OPEN)
    }

    /// Row-major cell values.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Iterates the grid one row at a time.
    pub fn grid_rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.cols())
    }
}

/// Serde shape of [`Maze`].
#[derive(Serialize, Deserialize)]
struct MazeRepr {
    grid: Vec<Vec<u8>>,
    start: Position,
    goal: Position,
}

impl From<Maze> for MazeRepr {
    fn from(maze: Maze) -> Self {
        Self {
            grid: maze.grid_rows().map(<[u8]>::to_vec).collect(),
            start: maze.start,
            goal: maze.goal,
        }
    }
}

impl TryFrom<MazeRepr> for Maze {
    type Error = ProtocolError;

    fn try_from(repr: MazeRepr) -> Result<Self, Self::Error> {
        Self::from_grid(repr.grid, repr.start, repr.goal)
    }
}

// ---------------------------------------------------------------------------
// SolutionPath
// ---------------------------------------------------------------------------

/// An ordered walk through a maze, one orthogonal step at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolutionPath {
    steps: Vec<Position>,
}

impl SolutionPath {
    /// Creates a path, checking that consecutive positions are adjacent.
    ///
    /// # Errors
    /// [`ProtocolError::InvalidSolution`] on a diagonal step, a jump, or a
    /// repeated position.
    pub fn new(steps: Vec<Position>) -> Result<Self, ProtocolError> {
        if let Some(i) = steps.windows(2).position(|w| !w[0].is_adjacent(w[1])) {
            return Err(ProtocolError::InvalidSolution(format!(
                "step {} goes from {} to {}",
                i + 1,
                steps[i],
                steps[i + 1]
            )));
        }
        Ok(Self { steps })
    }

    /// The positions, in walking order.
    pub fn positions(&self) -> &[Position] {
        &self.steps
    }

    /// Number of positions on the path (start and goal included).
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `true` if the path has no positions.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// First position, if any.
    pub fn first(&self) -> Option<Position> {
        self.steps.first().copied()
    }

    /// Last position, if any.
    pub fn last(&self) -> Option<Position> {
        self.steps.last().copied()
    }

    /// `true` if the path runs from `maze.start()` to `maze.goal()`
    /// through open cells only.
    pub fn connects(&self, maze: &Maze) -> bool {
        self.first() == Some(maze.start())
            && self.last() == Some(maze.goal())
            && self.steps.iter().all(|&p| maze.is_open(p))
    }
}

// ---------------------------------------------------------------------------
// Solver response
// ---------------------------------------------------------------------------

/// The solver's response: the states it visited along the solution.
///
/// `{"path": [{"position": {"row": 0, "col": 0}}, ...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionContainer {
    /// Visited states, start first.
    pub path: Vec<SearchState>,
}

/// One visited search state.
///
/// Only the position is read. Any other per-state fields the solver sends
/// (cost, visit order) are ignored during decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    /// The cell this state stands for. A state without one is malformed.
    #[serde(default)]
    pub position: Option<Position>,
}

impl From<&SolutionPath> for SolutionContainer {
    fn from(path: &SolutionPath) -> Self {
        Self {
            path: path
                .positions()
                .iter()
                .map(|&p| SearchState { position: Some(p) })
                .collect(),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// ```text
    /// S . #
    /// # . #
    /// # . G
    /// ```
    fn small_maze() -> Maze {
        Maze::from_grid(
            vec![vec![0, 0, 1], vec![1, 0, 1], vec![1, 0, 0]],
            Position::new(0, 0),
            Position::new(2, 2),
        )
        .unwrap()
    }

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    // =====================================================================
    // Position
    // =====================================================================

    #[test]
    fn test_position_step_moves_one_cell() {
        let origin = p(3, 3);
        assert_eq!(origin.step(Direction::Up), Some(p(2, 3)));
        assert_eq!(origin.step(Direction::Down), Some(p(4, 3)));
        assert_eq!(origin.step(Direction::Left), Some(p(3, 2)));
        assert_eq!(origin.step(Direction::Right), Some(p(3, 4)));
    }

    #[test]
    fn test_position_step_past_zero_is_none() {
        assert_eq!(p(0, 4).step(Direction::Up), None);
        assert_eq!(p(4, 0).step(Direction::Left), None);
    }

    #[test]
    fn test_position_is_adjacent_rejects_diagonals_and_self() {
        assert!(p(1, 1).is_adjacent(p(1, 2)));
        assert!(p(1, 1).is_adjacent(p(0, 1)));
        assert!(!p(1, 1).is_adjacent(p(2, 2)));
        assert!(!p(1, 1).is_adjacent(p(1, 1)));
        assert!(!p(1, 1).is_adjacent(p(1, 3)));
    }

    #[test]
    fn test_position_json_shape() {
        let json = serde_json::to_value(p(4, 7)).unwrap();
        assert_eq!(json, serde_json::json!({"row": 4, "col": 7}));
    }

    // =====================================================================
    // MazeDimensions
    // =====================================================================

    #[test]
    fn test_dimensions_minimum_is_two_by_two() {
        assert!(MazeDimensions::new(2, 2).is_ok());
        assert!(matches!(
            MazeDimensions::new(1, 5),
            Err(ProtocolError::InvalidDimensions { rows: 1, cols: 5 })
        ));
        assert!(MazeDimensions::new(5, 0).is_err());
    }

    #[test]
    fn test_dimensions_too_many_cells_is_rejected() {
        assert!(MazeDimensions::new(MAX_CELLS, 2).is_err());
        assert!(MazeDimensions::new(usize::MAX, usize::MAX).is_err());
    }

    #[test]
    fn test_dimensions_serialize_as_two_element_vector() {
        let dims = MazeDimensions::new(5, 7).unwrap();
        assert_eq!(serde_json::to_string(&dims).unwrap(), "[5,7]");
    }

    #[test]
    fn test_dimensions_deserialize_validates() {
        let ok: MazeDimensions = serde_json::from_str("[3,4]").unwrap();
        assert_eq!((ok.rows(), ok.cols()), (3, 4));

        let bad: Result<MazeDimensions, _> = serde_json::from_str("[1,4]");
        assert!(bad.is_err());
    }

    // =====================================================================
    // Maze
    // =====================================================================

    #[test]
    fn test_maze_accessors() {
        let maze = small_maze();
        assert_eq!(maze.rows(), 3);
        assert_eq!(maze.cols(), 3);
        assert_eq!(maze.start(), p(0, 0));
        assert_eq!(maze.goal(), p(2, 2));
        assert_eq!(maze.cell(p(1, 0)), Some(WALL));
        assert!(maze.is_open(p(1, 1)));
        assert!(!maze.is_open(p(3, 1)));
        assert_eq!(maze.cell(p(0, 3)), None);
    }

    #[test]
    fn test_maze_grid_rows_are_row_major() {
        let maze = small_maze();
        let rows: Vec<&[u8]> = maze.grid_rows().collect();
        assert_eq!(rows, vec![&[0, 0, 1][..], &[1, 0, 1][..], &[1, 0, 0][..]]);
    }

    #[test]
    fn test_maze_new_wrong_cell_count_is_rejected() {
        let dims = MazeDimensions::new(2, 2).unwrap();
        let result = Maze::new(dims, vec![0, 0, 0], p(0, 0), p(1, 1));
        assert!(matches!(result, Err(ProtocolError::InvalidMaze(_))));
    }

    #[test]
    fn test_maze_new_bad_cell_value_is_rejected() {
        let dims = MazeDimensions::new(2, 2).unwrap();
        let result = Maze::new(dims, vec![0, 2, 0, 0], p(0, 0), p(1, 1));
        assert!(matches!(result, Err(ProtocolError::InvalidMaze(_))));
    }

    #[test]
    fn test_maze_new_start_on_wall_is_rejected() {
        let dims = MazeDimensions::new(2, 2).unwrap();
        let result = Maze::new(dims, vec![1, 0, 0, 0], p(0, 0), p(1, 1));
        assert!(matches!(result, Err(ProtocolError::InvalidMaze(_))));
    }

    #[test]
    fn test_maze_new_goal_out_of_bounds_is_rejected() {
        let dims = MazeDimensions::new(2, 2).unwrap();
        let result = Maze::new(dims, vec![0; 4], p(0, 0), p(2, 0));
        assert!(matches!(result, Err(ProtocolError::InvalidMaze(_))));
    }

    #[test]
    fn test_maze_new_start_equal_goal_is_rejected() {
        let dims = MazeDimensions::new(2, 2).unwrap();
        let result = Maze::new(dims, vec![0; 4], p(1, 1), p(1, 1));
        assert!(matches!(result, Err(ProtocolError::InvalidMaze(_))));
    }

    #[test]
    fn test_maze_from_grid_ragged_is_rejected() {
        let result = Maze::from_grid(vec![vec![0, 0], vec![0]], p(0, 0), p(0, 1));
        assert!(matches!(result, Err(ProtocolError::InvalidMaze(_))));
    }

    #[test]
    fn test_maze_json_shape() {
        let json = serde_json::to_value(small_maze()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "grid": [[0, 0, 1], [1, 0, 1], [1, 0, 0]],
                "start": {"row": 0, "col": 0},
                "goal": {"row": 2, "col": 2},
            })
        );
    }

    #[test]
    fn test_maze_deserialize_enforces_invariants() {
        // Goal sits on a wall.
        let json = r#"{"grid":[[0,1],[0,0]],"start":{"row":0,"col":0},"goal":{"row":0,"col":1}}"#;
        let result: Result<Maze, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    // =====================================================================
    // SolutionPath
    // =====================================================================

    #[test]
    fn test_solution_path_accepts_orthogonal_steps() {
        let path = SolutionPath::new(vec![p(0, 0), p(0, 1), p(1, 1)]).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.first(), Some(p(0, 0)));
        assert_eq!(path.last(), Some(p(1, 1)));
    }

    #[test]
    fn test_solution_path_rejects_diagonal_step() {
        let result = SolutionPath::new(vec![p(0, 0), p(1, 1)]);
        assert!(matches!(result, Err(ProtocolError::InvalidSolution(_))));
    }

    #[test]
    fn test_solution_path_rejects_skipped_cell() {
        let result = SolutionPath::new(vec![p(0, 0), p(0, 2)]);
        assert!(matches!(result, Err(ProtocolError::InvalidSolution(_))));
    }

    #[test]
    fn test_solution_path_connects_checks_endpoints_and_walls() {
        let maze = small_maze();
        let good = SolutionPath::new(vec![p(0, 0), p(0, 1), p(1, 1), p(2, 1), p(2, 2)])
            .unwrap();
        assert!(good.connects(&maze));

        let short = SolutionPath::new(vec![p(0, 0), p(0, 1)]).unwrap();
        assert!(!short.connects(&maze));

        let through_wall =
            SolutionPath::new(vec![p(0, 0), p(1, 0), p(2, 0), p(2, 1), p(2, 2)]).unwrap();
        assert!(!through_wall.connects(&maze));

        assert!(!SolutionPath::default().connects(&maze));
    }

    #[test]
    fn test_solution_container_from_path() {
        let path = SolutionPath::new(vec![p(0, 0), p(0, 1)]).unwrap();
        let container = SolutionContainer::from(&path);
        assert_eq!(
            container.path,
            vec![
                SearchState { position: Some(p(0, 0)) },
                SearchState { position: Some(p(0, 1)) },
            ]
        );
    }
}
