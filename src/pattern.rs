//! Cell patterns and the quarter-turn rotation applied to them.
//!
//! A pattern is a rectangular occupancy matrix stored row-major, where each
//! cell is either filled or empty. Rotating 90 degrees clockwise swaps the row
//! and column counts, so a pattern is never rotated in place: every rotation
//! produces a new value.

use std::fmt;

/// A cell offset within a pattern, as `(row, col)`.
pub type Offset = (usize, usize);

/// A rectangular, non-empty binary occupancy matrix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

/// Reasons a set of rows cannot form a [`Pattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PatternError {
    /// No rows, or rows without any cells.
    #[display("pattern must have at least one row and one column")]
    Empty,
    /// A row whose length differs from the first row.
    #[display("row {row} has {len} cells, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },
    /// A cell value other than 0 or 1.
    #[display("cell ({row}, {col}) holds {value}, expected 0 or 1")]
    NonBinary { row: usize, col: usize, value: u8 },
}

impl Pattern {
    /// Builds a pattern from rows of 0/1 cell values.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if there are no cells, if the rows have
    /// differing lengths, or if any value is not 0 or 1.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, PatternError> {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        if cols == 0 {
            return Err(PatternError::Empty);
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(PatternError::Ragged {
                    row: row_index,
                    len: row.len(),
                    expected: cols,
                });
            }
            for (col_index, &value) in row.iter().enumerate() {
                match value {
                    0 => cells.push(false),
                    1 => cells.push(true),
                    _ => {
                        return Err(PatternError::NonBinary {
                            row: row_index,
                            col: col_index,
                            value,
                        })
                    }
                }
            }
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// Number of rows (the height of the bounding box).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (the width of the bounding box).
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns whether the cell at `(row, col)` is filled, or `None` when the
    /// offset lies outside the pattern.
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        (row < self.rows && col < self.cols).then(|| self.cells[row * self.cols + col])
    }

    /// Iterates the offsets of all filled cells in row-major order.
    pub fn filled_cells(&self) -> impl Iterator<Item = Offset> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &filled)| filled)
            .map(move |(index, _)| (index / cols, index % cols))
    }

    /// Number of filled cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&filled| filled).count()
    }

    /// Returns the pattern as rows of 0/1 values.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|&filled| u8::from(filled)).collect())
            .collect()
    }

    /// Returns this pattern rotated clockwise by `quarter_turns` * 90 degrees.
    pub fn rotated(&self, quarter_turns: u8) -> Self {
        let mut pattern = self.clone();
        for _ in 0..quarter_turns % 4 {
            pattern = rotate_clockwise(&pattern);
        }
        pattern
    }
}

/// Rotates a pattern 90 degrees clockwise.
///
/// An `R x C` pattern becomes `C x R`, with output cell `(j, R - 1 - i)` taken
/// from input cell `(i, j)`. Four applications return the original pattern.
pub fn rotate_clockwise(pattern: &Pattern) -> Pattern {
    let (rows, cols) = (pattern.rows, pattern.cols);
    let mut cells = vec![false; rows * cols];

    for i in 0..rows {
        for j in 0..cols {
            // output has `rows` columns
            cells[j * rows + (rows - 1 - i)] = pattern.cells[i * cols + j];
        }
    }

    Pattern {
        rows: cols,
        cols: rows,
        cells,
    }
}

impl fmt::Display for Pattern {
    /// Renders filled cells as `#` and empty cells as `.`, one line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            for &filled in row {
                f.write_str(if filled { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
