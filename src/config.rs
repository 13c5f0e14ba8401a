//! Board dimensions and the pointer-to-cell mapping.

/// Default number of cells per board side.
pub const DEFAULT_BOARD_SIZE: usize = 20;

/// Largest board side accepted from the command line.
pub const MAX_BOARD_SIZE: usize = 256;

/// Default rendered size of one cell, in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 30;

/// Engine configuration supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Cells per board side (N).
    pub board_size: usize,
    /// Pixels per cell, used to map pointer positions onto the board.
    pub cell_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

impl Config {
    /// Maps a pointer position, relative to the board's top-left corner, to
    /// the `(x, y)` cell under it.
    ///
    /// Positions left of or above the board map to negative cells; the result
    /// is not clamped to the board.
    pub fn cell_at(&self, px: f64, py: f64) -> (i32, i32) {
        let cell = f64::from(self.cell_size.max(1));
        ((px / cell).floor() as i32, (py / cell).floor() as i32)
    }
}
