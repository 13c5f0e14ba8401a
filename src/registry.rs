//! The available and placed piece collections.
//!
//! Every catalog piece lives in exactly one of the two collections. The
//! registry keeps a pristine copy of the catalog so [`Registry::reset`] can
//! rebuild the initial state without revalidating the static shape data.
//!
//! Operations that fail leave both collections untouched. Board bounds are
//! not checked here: callers reject out-of-bounds anchors before placing or
//! moving a piece.

use crate::pieces::{ids_are_unique, Piece, PieceId, PlacedPiece};

/// Which collection a piece is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Scope {
    #[display("available")]
    Available,
    #[display("placed")]
    Placed,
}

/// A piece id that is not present in the expected collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece {id} is not {scope}")]
pub struct NotFound {
    pub scope: Scope,
    pub id: PieceId,
}

/// The available (unplaced) and placed piece collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    catalog: Vec<Piece>,
    available: Vec<Piece>,
    placed: Vec<PlacedPiece>,
}

impl Registry {
    /// Creates a registry with every catalog piece available.
    pub fn new(catalog: Vec<Piece>) -> Self {
        debug_assert!(ids_are_unique(catalog.iter().map(|piece| piece.id)));
        Self {
            available: catalog.clone(),
            catalog,
            placed: Vec::new(),
        }
    }

    /// Unplaced pieces, in catalog order.
    pub fn available(&self) -> &[Piece] {
        &self.available
    }

    /// Placed pieces, in placement order.
    pub fn placed(&self) -> &[PlacedPiece] {
        &self.placed
    }

    /// Looks up an unplaced piece.
    pub fn available_piece(&self, id: PieceId) -> Option<&Piece> {
        self.available.iter().find(|piece| piece.id == id)
    }

    /// Looks up a placed piece.
    pub fn placed_piece(&self, id: PieceId) -> Option<&PlacedPiece> {
        self.placed.iter().find(|placed| placed.id() == id)
    }

    /// Rotates a piece in `scope` a quarter turn clockwise.
    ///
    /// A placed piece keeps its anchor.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] if no piece with `id` is in `scope`.
    pub fn rotate(&mut self, scope: Scope, id: PieceId) -> Result<(), NotFound> {
        let piece = match scope {
            Scope::Available => self.available.iter_mut().find(|piece| piece.id == id),
            Scope::Placed => self
                .placed
                .iter_mut()
                .find(|placed| placed.id() == id)
                .map(|placed| &mut placed.piece),
        };
        piece.ok_or(NotFound { scope, id })?.rotate_clockwise();
        Ok(())
    }

    /// Moves an available piece onto the board, anchored at `(x, y)`.
    ///
    /// Overlap with already placed pieces is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] if the piece is not available.
    pub fn place(&mut self, id: PieceId, x: i32, y: i32) -> Result<(), NotFound> {
        let index = self
            .available
            .iter()
            .position(|piece| piece.id == id)
            .ok_or(NotFound {
                scope: Scope::Available,
                id,
            })?;
        let piece = self.available.remove(index);
        self.placed.push(PlacedPiece { piece, x, y });
        Ok(())
    }

    /// Re-anchors a placed piece at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] if the piece is not placed.
    pub fn move_to(&mut self, id: PieceId, x: i32, y: i32) -> Result<(), NotFound> {
        let placed = self
            .placed
            .iter_mut()
            .find(|placed| placed.id() == id)
            .ok_or(NotFound {
                scope: Scope::Placed,
                id,
            })?;
        placed.x = x;
        placed.y = y;
        Ok(())
    }

    /// Takes a piece off the board and returns it to the available pieces.
    ///
    /// The piece keeps its id, pattern and rotation, and is reinserted at its
    /// catalog position.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] if the piece is not placed.
    pub fn remove(&mut self, id: PieceId) -> Result<(), NotFound> {
        let index = self
            .placed
            .iter()
            .position(|placed| placed.id() == id)
            .ok_or(NotFound {
                scope: Scope::Placed,
                id,
            })?;
        let PlacedPiece { piece, .. } = self.placed.remove(index);
        let slot = self.available.partition_point(|other| other.id < piece.id);
        self.available.insert(slot, piece);
        Ok(())
    }

    /// Clears the board and restores every catalog piece, unrotated.
    pub fn reset(&mut self) {
        self.placed.clear();
        self.available.clone_from(&self.catalog);
    }

    /// Checks that every catalog piece is in exactly one collection.
    pub(crate) fn is_consistent(&self) -> bool {
        let ids = self
            .available
            .iter()
            .map(|piece| piece.id)
            .chain(self.placed.iter().map(PlacedPiece::id));
        self.available.len() + self.placed.len() == self.catalog.len() && ids_are_unique(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{build_catalog, Rotation, SHAPES};

    fn registry() -> Registry {
        Registry::new(build_catalog(SHAPES).unwrap())
    }

    #[test]
    fn test_new_registry_has_everything_available() {
        let registry = registry();
        assert_eq!(registry.available().len(), SHAPES.len());
        assert!(registry.placed().is_empty());
        assert!(registry.is_consistent());
    }

    #[test]
    fn test_place_moves_piece_between_collections() {
        let mut registry = registry();
        registry.place(PieceId(2), 4, 5).unwrap();

        assert!(registry.available_piece(PieceId(2)).is_none());
        let placed = registry.placed_piece(PieceId(2)).unwrap();
        assert_eq!((placed.x, placed.y), (4, 5));
        assert!(registry.is_consistent());
    }

    #[test]
    fn test_place_twice_is_not_found() {
        let mut registry = registry();
        registry.place(PieceId(2), 4, 5).unwrap();
        let before = registry.clone();

        assert_eq!(
            registry.place(PieceId(2), 0, 0),
            Err(NotFound {
                scope: Scope::Available,
                id: PieceId(2)
            })
        );
        assert_eq!(registry, before);
    }

    #[test]
    fn test_rotate_placed_keeps_anchor() {
        let mut registry = registry();
        registry.place(PieceId(0), 3, 3).unwrap();
        registry.rotate(Scope::Placed, PieceId(0)).unwrap();

        let placed = registry.placed_piece(PieceId(0)).unwrap();
        assert_eq!((placed.x, placed.y), (3, 3));
        assert_eq!(placed.piece.rotation, Rotation::Deg90);
        assert_eq!(placed.piece.pattern.rows(), 1);
        assert_eq!(placed.piece.pattern.cols(), 5);
    }

    #[test]
    fn test_rotate_in_wrong_scope_is_not_found() {
        let mut registry = registry();
        let before = registry.clone();
        assert_eq!(
            registry.rotate(Scope::Placed, PieceId(1)),
            Err(NotFound {
                scope: Scope::Placed,
                id: PieceId(1)
            })
        );
        assert_eq!(
            registry.rotate(Scope::Available, PieceId(99)).unwrap_err().scope,
            Scope::Available
        );
        assert_eq!(registry, before);
    }

    #[test]
    fn test_move_updates_only_coordinates() {
        let mut registry = registry();
        registry.place(PieceId(5), 1, 1).unwrap();
        registry.move_to(PieceId(5), 9, 12).unwrap();

        let placed = registry.placed_piece(PieceId(5)).unwrap();
        assert_eq!((placed.x, placed.y), (9, 12));
        assert_eq!(placed.piece.rotation, Rotation::Deg0);
        assert!(registry.move_to(PieceId(6), 0, 0).is_err());
    }

    #[test]
    fn test_place_then_remove_preserves_rotation() {
        let mut registry = registry();
        registry.rotate(Scope::Available, PieceId(4)).unwrap();
        let rotated = registry.available_piece(PieceId(4)).unwrap().clone();

        registry.place(PieceId(4), 2, 2).unwrap();
        registry.remove(PieceId(4)).unwrap();

        assert_eq!(registry.available_piece(PieceId(4)), Some(&rotated));
        assert!(registry.placed_piece(PieceId(4)).is_none());
        assert!(registry.is_consistent());
    }

    #[test]
    fn test_remove_restores_catalog_order() {
        let mut registry = registry();
        registry.place(PieceId(7), 0, 0).unwrap();
        registry.place(PieceId(3), 0, 0).unwrap();
        registry.remove(PieceId(7)).unwrap();
        registry.remove(PieceId(3)).unwrap();

        let ids: Vec<usize> = registry.available().iter().map(|piece| piece.id.0).collect();
        assert_eq!(ids, (0..SHAPES.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_reset_restores_initial_catalog() {
        let mut registry = registry();
        let initial = registry.clone();
        registry.rotate(Scope::Available, PieceId(1)).unwrap();
        registry.place(PieceId(1), 3, 3).unwrap();
        registry.place(PieceId(9), 8, 8).unwrap();

        registry.reset();
        assert_eq!(registry, initial);
        assert!(registry.placed().is_empty());
    }
}
