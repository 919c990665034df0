//! Canonical binary layout of a maze.
//!
//! This is the byte form the generator service compresses and sends, and
//! the byte form saved mazes are stored in (after compression). All
//! integers are `u32` big-endian:
//!
//! ```text
//! +------+------+---------------------------+-----------+-----------+----------+----------+
//! | rows | cols | rows*cols cells, row-major| start_row | start_col | goal_row | goal_col |
//! |  4B  |  4B  | 1 byte each, 0=open 1=wall|    4B     |    4B     |    4B    |    4B    |
//! +------+------+---------------------------+-----------+-----------+----------+----------+
//! ```

use crate::{Maze, MazeDimensions, Position, ProtocolError};

/// Bytes before the cell bitmap.
pub const HEADER_BYTES: usize = 8;

/// Bytes after the cell bitmap.
pub const FOOTER_BYTES: usize = 16;

/// Extra room allowed on top of the cell count when inflating a payload.
///
/// Covers header and footer with plenty to spare.
pub const LAYOUT_SLACK: usize = 100;

/// Exact encoded length of a maze of the given size.
pub fn encoded_len(dims: MazeDimensions) -> usize {
    HEADER_BYTES + dims.cells() + FOOTER_BYTES
}

/// Encodes a maze into its canonical bytes.
pub fn encode_maze(maze: &Maze) -> Vec<u8> {
    let mut buf = Vec::with_capacity(encoded_len(maze.dimensions()));
    // MAX_CELLS keeps every value here within u32.
    put_u32(&mut buf, maze.rows());
    put_u32(&mut buf, maze.cols());
    buf.extend_from_slice(maze.cells());
    for pos in [maze.start(), maze.goal()] {
        put_u32(&mut buf, pos.row);
        put_u32(&mut buf, pos.col);
    }
    buf
}

/// Decodes canonical bytes back into a maze.
///
/// # Errors
/// [`ProtocolError::InvalidMaze`] if the buffer length disagrees with its
/// header, [`ProtocolError::InvalidDimensions`] for an out-of-range header,
/// or any maze-invariant error from [`Maze::new`].
pub fn decode_maze(bytes: &[u8]) -> Result<Maze, ProtocolError> {
    let mut reader = Reader { bytes, offset: 0 };
    let rows = reader.u32()?;
    let cols = reader.u32()?;
    let dims = MazeDimensions::new(rows, cols)?;

    if bytes.len() != encoded_len(dims) {
        return Err(ProtocolError::InvalidMaze(format!(
            "{dims} maze layout is {} bytes, got {}",
            encoded_len(dims),
            bytes.len()
        )));
    }

    let cells = reader.take(dims.cells())?.to_vec();
    let start = Position::new(reader.u32()?, reader.u32()?);
    let goal = Position::new(reader.u32()?, reader.u32()?);
    Maze::new(dims, cells, start, goal)
}

fn put_u32(buf: &mut Vec<u8>, value: usize) {
    buf.extend_from_slice(&(value as u32).to_be_bytes());
}

/// Cursor over the layout bytes.
struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], ProtocolError> {
        let end = self.offset + n;
        let slice = self.bytes.get(self.offset..end).ok_or_else(|| {
            ProtocolError::InvalidMaze(format!(
                "layout truncated at byte {} of {}",
                self.bytes.len(),
                end
            ))
        })?;
        self.offset = end;
        Ok(slice)
    }

    fn u32(&mut self) -> Result<usize, ProtocolError> {
        let raw = self.take(4)?;
        Ok(u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]) as usize)
    }
}
