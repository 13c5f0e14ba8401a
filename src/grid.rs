//! The square board and the projection of placed pieces onto it.
//!
//! The board is represented as a flat row-major array of booleans, `size`
//! cells per side. It is never stored as game state: it is derived from the
//! placed pieces every time it is needed.

use std::fmt;

use crate::pieces::PlacedPiece;

/// Converts board coordinates to a linear cell index.
///
/// Index order is row-major: `idx = y * size + x`. Returns `None` when the
/// coordinates fall outside the board.
#[inline(always)]
pub fn cell_index(size: usize, x: i32, y: i32) -> Option<usize> {
    let x = usize::try_from(x).ok()?;
    let y = usize::try_from(y).ok()?;
    (x < size && y < size).then_some(y * size + x)
}

/// An N x N binary occupancy grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<bool>,
}

/// Reasons a textual board cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardParseError {
    #[display("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[display("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("unexpected {found:?} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, found: char },
}

impl Board {
    /// Creates an all-empty board.
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    /// Parses a board from `size` rows of `size` characters each, where `#`
    /// marks a filled cell and `.` an empty one.
    ///
    /// # Errors
    ///
    /// Returns [`BoardParseError`] if the dimensions are wrong or a row
    /// contains any other character.
    pub fn from_ascii(size: usize, rows: &[&str]) -> Result<Self, BoardParseError> {
        if rows.len() != size {
            return Err(BoardParseError::RowCount {
                expected: size,
                found: rows.len(),
            });
        }

        let mut board = Self::empty(size);
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != size {
                return Err(BoardParseError::RowLength {
                    row,
                    expected: size,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    '#' => board.cells[row * size + col] = true,
                    '.' => {}
                    _ => return Err(BoardParseError::InvalidCell { row, col, found: ch }),
                }
            }
        }
        Ok(board)
    }

    /// Side length of the board.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns whether `(x, y)` lies on the board.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        cell_index(self.size, x, y).is_some()
    }

    /// Returns whether the cell at column `x`, row `y` is filled, or `None`
    /// when it lies outside the board.
    pub fn get(&self, x: i32, y: i32) -> Option<bool> {
        cell_index(self.size, x, y).map(|idx| self.cells[idx])
    }

    /// Marks a cell as filled. Cells outside the board are ignored.
    fn fill(&mut self, x: i32, y: i32) {
        if let Some(idx) = cell_index(self.size, x, y) {
            self.cells[idx] = true;
        }
    }

    /// Number of filled cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&filled| filled).count()
    }

    /// Returns the board as rows of 0/1 values.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.size.max(1))
            .map(|row| row.iter().map(|&filled| u8::from(filled)).collect())
            .collect()
    }
}

impl fmt::Display for Board {
    /// Renders filled cells as `#` and empty cells as `.`, one line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size.max(1)) {
            for &filled in row {
                f.write_str(if filled { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Rasterizes placed pieces onto an empty `size` x `size` board.
///
/// Every filled pattern cell `(i, j)` of a piece anchored at `(x, y)` marks
/// board cell `(x + j, y + i)`. Cells landing outside the board are dropped.
/// Overlapping pieces OR their footprints together, so the result does not
/// depend on iteration order.
pub fn project<'a>(size: usize, placed: impl IntoIterator<Item = &'a PlacedPiece>) -> Board {
    let mut board = Board::empty(size);
    for piece in placed {
        for (x, y) in piece.footprint() {
            board.fill(x, y);
        }
    }
    board
}

/// Formats placed pieces as a human-readable grid.
///
/// Each cell shows the id of the piece covering it (`0`-`9`, then `A`-`Z`,
/// and `?` past `Z`), `*` where pieces overlap, and `.` where the cell is
/// empty.
pub fn format_placed(size: usize, placed: &[PlacedPiece]) -> String {
    // None = empty, Some(Some(id)) = single piece, Some(None) = overlap
    let mut owners: Vec<Option<Option<usize>>> = vec![None; size * size];
    for piece in placed {
        for (x, y) in piece.footprint() {
            if let Some(idx) = cell_index(size, x, y) {
                owners[idx] = match owners[idx] {
                    None => Some(Some(piece.id().0)),
                    Some(_) => Some(None),
                };
            }
        }
    }

    let mut output = String::with_capacity(size * (size + 1));
    for row in owners.chunks(size.max(1)) {
        for owner in row {
            let display_char = match owner {
                None => '.',
                Some(None) => '*',
                Some(Some(id)) => u32::try_from(*id)
                    .ok()
                    .and_then(|id| char::from_digit(id, 36))
                    .map_or('?', |c| c.to_ascii_uppercase()),
            };
            output.push(display_char);
        }
        output.push('\n');
    }
    output
}
