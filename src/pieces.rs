//! Piece definitions and the master shape catalog.
//!
//! Each catalog entry is a cell pattern plus a display color. Pieces are
//! created from the catalog with ids taken from their position in it, so a
//! piece's id stays the same for its whole lifecycle.

use rustc_hash::FxHashSet;

use crate::pattern::{rotate_clockwise, Pattern, PatternError};

/// Identifier of a piece: its index in the master shape catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub struct PieceId(pub usize);

/// Opaque display tag for a piece. The engine never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Color {
    #[display("yellow")]
    Yellow,
    #[display("red")]
    Red,
    #[display("blue")]
    Blue,
    #[display("green")]
    Green,
    #[display("orange")]
    Orange,
    #[display("cyan")]
    Cyan,
    #[display("lime")]
    Lime,
    #[display("rose")]
    Rose,
    #[display("gray")]
    Gray,
    #[display("emerald")]
    Emerald,
    #[display("fuchsia")]
    Fuchsia,
    #[display("amber")]
    Amber,
}

/// Clockwise rotation of a piece relative to its catalog orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// The rotation in degrees: 0, 90, 180 or 270.
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// The rotation after one more clockwise quarter turn (mod 360).
    pub const fn next(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }
}

/// A piece: a pattern with a color and its current rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub id: PieceId,
    pub pattern: Pattern,
    pub color: Color,
    pub rotation: Rotation,
}

impl Piece {
    /// Rotates the piece a quarter turn clockwise. Id and color are untouched.
    pub fn rotate_clockwise(&mut self) {
        self.pattern = rotate_clockwise(&self.pattern);
        self.rotation = self.rotation.next();
    }
}

/// A piece anchored on the board.
///
/// `(x, y)` is the board cell of the top-left corner of the pattern's
/// bounding box; `x` is the column and `y` the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedPiece {
    pub piece: Piece,
    pub x: i32,
    pub y: i32,
}

impl PlacedPiece {
    #[inline]
    pub fn id(&self) -> PieceId {
        self.piece.id
    }

    /// Absolute `(x, y)` board coordinates of every filled cell, including
    /// cells that fall outside the board. Cells whose coordinates do not fit
    /// in an `i32` are skipped.
    pub fn footprint(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.piece.pattern.filled_cells().filter_map(|(row, col)| {
            let x = self.x.checked_add(i32::try_from(col).ok()?)?;
            let y = self.y.checked_add(i32::try_from(row).ok()?)?;
            Some((x, y))
        })
    }
}

/// A master catalog entry: a pattern in its initial orientation plus a color.
#[derive(Debug, Clone, Copy)]
pub struct ShapeDef {
    pub pattern: &'static [&'static [u8]],
    pub color: Color,
}

/// A catalog entry that does not describe a valid pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("shape {index} is invalid")]
pub struct ShapeError {
    pub index: usize,
    pub source: PatternError,
}

/// The twelve pieces offered to the player, in display order.
pub const SHAPES: &[ShapeDef] = &[
    // long bar (5 cells)
    ShapeDef {
        pattern: &[&[1], &[1], &[1], &[1], &[1]],
        color: Color::Yellow,
    },
    // big corner (5 cells)
    ShapeDef {
        pattern: &[&[1, 1, 1], &[0, 0, 1], &[0, 0, 1]],
        color: Color::Red,
    },
    // P shape (5 cells)
    ShapeDef {
        pattern: &[&[1, 1], &[1, 1], &[0, 1]],
        color: Color::Blue,
    },
    // 2x3 block (6 cells)
    ShapeDef {
        pattern: &[&[1, 1, 1], &[1, 1, 1]],
        color: Color::Green,
    },
    // tall T (5 cells)
    ShapeDef {
        pattern: &[&[1, 1, 1], &[0, 1, 0], &[0, 1, 0]],
        color: Color::Orange,
    },
    // N shape (5 cells)
    ShapeDef {
        pattern: &[&[0, 1], &[1, 1], &[1, 0], &[1, 0]],
        color: Color::Cyan,
    },
    // second 2x3 block (6 cells)
    ShapeDef {
        pattern: &[&[1, 1, 1], &[1, 1, 1]],
        color: Color::Lime,
    },
    // plus (5 cells)
    ShapeDef {
        pattern: &[&[0, 1, 0], &[1, 1, 1], &[0, 1, 0]],
        color: Color::Rose,
    },
    // square (4 cells)
    ShapeDef {
        pattern: &[&[1, 1], &[1, 1]],
        color: Color::Gray,
    },
    // short bar (4 cells)
    ShapeDef {
        pattern: &[&[1], &[1], &[1], &[1]],
        color: Color::Emerald,
    },
    // S shape (4 cells)
    ShapeDef {
        pattern: &[&[1, 0], &[1, 1], &[0, 1]],
        color: Color::Fuchsia,
    },
    // L shape (4 cells)
    ShapeDef {
        pattern: &[&[1, 1, 1], &[1, 0, 0]],
        color: Color::Amber,
    },
];

/// Builds the initial pieces for a catalog: rotation 0, ids from position.
///
/// # Errors
///
/// Returns [`ShapeError`] naming the first entry whose pattern is invalid.
pub fn build_catalog(shapes: &[ShapeDef]) -> Result<Vec<Piece>, ShapeError> {
    shapes
        .iter()
        .enumerate()
        .map(|(index, shape)| {
            let pattern = Pattern::from_rows(shape.pattern)
                .map_err(|source| ShapeError { index, source })?;
            Ok(Piece {
                id: PieceId(index),
                pattern,
                color: shape.color,
                rotation: Rotation::Deg0,
            })
        })
        .collect()
}

/// Returns whether every id yielded by `ids` is distinct.
pub(crate) fn ids_are_unique(ids: impl IntoIterator<Item = PieceId>) -> bool {
    let mut seen = FxHashSet::default();
    ids.into_iter().all(|id| seen.insert(id))
}
