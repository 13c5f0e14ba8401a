//! Engine state and the command handler driving it.
//!
//! [`EngineState`] is the single owned value holding everything the host
//! needs: the piece registry, the current screen and, during a challenge,
//! the target and completion status. The host sends [`Command`]s and reads
//! state back through the query methods. Every command runs to completion,
//! including challenge re-evaluation, before it returns.

use crate::challenge::{challenge_by_id, is_complete, Challenge, ChallengeId, ChallengeStatus};
use crate::config::Config;
use crate::grid::{cell_index, project, Board, BoardParseError};
use crate::pieces::{build_catalog, Piece, PieceId, PlacedPiece, ShapeDef, ShapeError};
use crate::registry::{NotFound, Registry, Scope};

/// A state change requested by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Rotate a piece a quarter turn clockwise.
    Rotate { scope: Scope, id: PieceId },
    /// Drop an available piece on the board with its top-left cell at `(x, y)`.
    Place { id: PieceId, x: i32, y: i32 },
    /// Drag a placed piece so its top-left cell is at `(x, y)`.
    Move { id: PieceId, x: i32, y: i32 },
    /// Take a placed piece off the board.
    Remove { id: PieceId },
    /// Clear the board and restore every piece unrotated.
    Reset,
    /// Restart the pieces and begin a challenge.
    StartChallenge(ChallengeId),
    /// Leave the current challenge but keep building on the same board.
    ExitToFreeMode,
    /// Drop everything and go back to the menu.
    ReturnToMenu,
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum EngineError {
    #[display("{_0}")]
    NotFound(#[from] NotFound),
    #[display("cell ({x}, {y}) is outside the {size}x{size} board")]
    OutOfBounds { x: i32, y: i32, size: usize },
    #[display("no challenge with id {id}")]
    UnknownChallenge { id: ChallengeId },
    #[display("challenge {id} has an invalid target: {source}")]
    InvalidTarget {
        id: ChallengeId,
        source: BoardParseError,
    },
    #[display("{_0}")]
    InvalidShape(#[from] ShapeError),
}

/// A challenge in play: its definition, parsed target and progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveChallenge {
    pub challenge: &'static Challenge,
    pub target: Board,
    pub status: ChallengeStatus,
}

/// What the host is showing.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum Screen {
    Menu,
    /// Free building with no target.
    Free,
    Challenge(ActiveChallenge),
}

/// All mutable engine state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineState {
    config: Config,
    registry: Registry,
    screen: Screen,
}

impl EngineState {
    /// Creates an engine in free-building mode with the given shape catalog.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidShape`] if a catalog pattern is invalid.
    pub fn new(config: Config, shapes: &[ShapeDef]) -> Result<Self, EngineError> {
        let catalog = build_catalog(shapes)?;
        Ok(Self {
            config,
            registry: Registry::new(catalog),
            screen: Screen::Free,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Unplaced pieces, in catalog order.
    pub fn available(&self) -> &[Piece] {
        self.registry.available()
    }

    /// Pieces on the board, in placement order.
    pub fn placed(&self) -> &[PlacedPiece] {
        self.registry.placed()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The current board, projected from the placed pieces.
    pub fn board(&self) -> Board {
        project(self.config.board_size, self.registry.placed())
    }

    /// The challenge in play, if any.
    pub fn active_challenge(&self) -> Option<&ActiveChallenge> {
        match &self.screen {
            Screen::Challenge(active) => Some(active),
            Screen::Menu | Screen::Free => None,
        }
    }

    /// Status of the challenge in play, if any.
    pub fn status(&self) -> Option<ChallengeStatus> {
        self.active_challenge().map(|active| active.status)
    }

    /// Whether a challenge is in play and its target is matched.
    pub fn is_complete(&self) -> bool {
        self.status().is_some_and(|status| status.is_completed())
    }

    /// Applies a command.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the command refers to a missing piece or
    /// challenge, or targets a cell outside the board. The state is left
    /// unchanged in that case.
    pub fn apply(&mut self, command: Command) -> Result<(), EngineError> {
        match command {
            Command::Rotate { scope, id } => {
                self.registry.rotate(scope, id)?;
                if scope == Scope::Placed {
                    self.evaluate();
                }
            }
            Command::Place { id, x, y } => {
                self.check_bounds(x, y)?;
                self.registry.place(id, x, y)?;
                self.evaluate();
            }
            Command::Move { id, x, y } => {
                self.check_bounds(x, y)?;
                self.registry.move_to(id, x, y)?;
                self.evaluate();
            }
            Command::Remove { id } => {
                self.registry.remove(id)?;
                self.evaluate();
            }
            Command::Reset => {
                self.registry.reset();
                if let Screen::Challenge(active) = &mut self.screen {
                    active.status = ChallengeStatus::NotStarted;
                }
            }
            Command::StartChallenge(id) => self.start_challenge(id)?,
            Command::ExitToFreeMode => self.screen = Screen::Free,
            Command::ReturnToMenu => {
                self.registry.reset();
                self.screen = Screen::Menu;
            }
        }

        debug_assert!(self.registry.is_consistent());
        Ok(())
    }

    /// Applies a command, treating failures as no-ops.
    ///
    /// Invalid drops are routine in a pointer-driven UI, so errors are only
    /// logged. Returns whether the command took effect.
    pub fn dispatch(&mut self, command: Command) -> bool {
        match self.apply(command) {
            Ok(()) => true,
            Err(err) => {
                log::debug!("ignoring {command:?}: {err}");
                false
            }
        }
    }

    /// Handles a piece dropped at pointer position `(px, py)`, relative to
    /// the board's top-left corner.
    ///
    /// A placed piece is moved; an available piece is placed.
    ///
    /// # Errors
    ///
    /// Same as [`EngineState::apply`] for the resulting command.
    pub fn drop_at_pixel(&mut self, id: PieceId, px: f64, py: f64) -> Result<(), EngineError> {
        let (x, y) = self.config.cell_at(px, py);
        let command = if self.registry.placed_piece(id).is_some() {
            Command::Move { id, x, y }
        } else {
            Command::Place { id, x, y }
        };
        self.apply(command)
    }

    fn check_bounds(&self, x: i32, y: i32) -> Result<(), EngineError> {
        let size = self.config.board_size;
        if cell_index(size, x, y).is_some() {
            Ok(())
        } else {
            Err(EngineError::OutOfBounds { x, y, size })
        }
    }

    fn start_challenge(&mut self, id: ChallengeId) -> Result<(), EngineError> {
        let challenge = challenge_by_id(id).ok_or(EngineError::UnknownChallenge { id })?;
        let target = challenge
            .target_board(self.config.board_size)
            .map_err(|source| EngineError::InvalidTarget { id, source })?;

        log::info!("starting challenge {id} ({})", challenge.name);
        self.registry.reset();
        self.screen = Screen::Challenge(ActiveChallenge {
            challenge,
            target,
            status: ChallengeStatus::NotStarted,
        });
        Ok(())
    }

    /// Recomputes challenge status after the placed pieces changed.
    fn evaluate(&mut self) {
        let Screen::Challenge(active) = &mut self.screen else {
            return;
        };
        let board = project(self.config.board_size, self.registry.placed());
        let status = ChallengeStatus::after_change(is_complete(&board, &active.target));
        if status != active.status {
            log::info!("challenge {} is now {status}", active.challenge.id);
        }
        active.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::SHAPES;

    fn engine() -> EngineState {
        EngineState::new(Config::default(), SHAPES).unwrap()
    }

    fn place(id: usize, x: i32, y: i32) -> Command {
        Command::Place {
            id: PieceId(id),
            x,
            y,
        }
    }

    #[test]
    fn test_new_engine_is_free_building() {
        let engine = engine();
        assert!(engine.screen().is_free());
        assert_eq!(engine.available().len(), SHAPES.len());
        assert!(engine.placed().is_empty());
        assert_eq!(engine.status(), None);
        assert!(!engine.is_complete());
    }

    #[test]
    fn test_out_of_bounds_drop_changes_nothing() {
        let mut engine = engine();
        let before = engine.clone();

        for (x, y) in [(-1, 0), (0, -1), (20, 5), (5, 20)] {
            let err = engine.apply(place(0, x, y)).unwrap_err();
            assert!(matches!(err, EngineError::OutOfBounds { .. }));
        }
        assert_eq!(engine, before);
    }

    #[test]
    fn test_move_out_of_bounds_keeps_position() {
        let mut engine = engine();
        engine.apply(place(0, 3, 3)).unwrap();
        assert!(!engine.dispatch(Command::Move {
            id: PieceId(0),
            x: 25,
            y: 3,
        }));

        let placed = &engine.placed()[0];
        assert_eq!((placed.x, placed.y), (3, 3));
    }

    #[test]
    fn test_dispatch_swallows_missing_pieces() {
        let mut engine = engine();
        let before = engine.clone();

        assert!(!engine.dispatch(Command::Remove { id: PieceId(0) }));
        assert!(!engine.dispatch(Command::Rotate {
            scope: Scope::Placed,
            id: PieceId(0),
        }));
        assert!(!engine.dispatch(Command::StartChallenge(ChallengeId(99))));
        assert_eq!(engine, before);
    }

    #[test]
    fn test_challenge_status_transitions() {
        let mut engine = engine();
        engine.apply(Command::StartChallenge(ChallengeId(1))).unwrap();
        assert_eq!(engine.status(), Some(ChallengeStatus::NotStarted));

        engine.apply(place(0, 10, 4)).unwrap();
        assert_eq!(engine.status(), Some(ChallengeStatus::InProgress));

        engine.apply(place(9, 10, 9)).unwrap();
        assert_eq!(engine.status(), Some(ChallengeStatus::Completed));
        assert!(engine.is_complete());

        // disturbing a finished board un-completes it
        engine
            .apply(Command::Move {
                id: PieceId(9),
                x: 10,
                y: 10,
            })
            .unwrap();
        assert_eq!(engine.status(), Some(ChallengeStatus::InProgress));

        engine
            .apply(Command::Move {
                id: PieceId(9),
                x: 10,
                y: 9,
            })
            .unwrap();
        assert!(engine.is_complete());

        engine.apply(Command::Remove { id: PieceId(0) }).unwrap();
        assert_eq!(engine.status(), Some(ChallengeStatus::InProgress));
    }

    #[test]
    fn test_rotating_placed_piece_reevaluates() {
        let mut engine = engine();
        engine.apply(Command::StartChallenge(ChallengeId(1))).unwrap();
        engine.apply(place(0, 10, 4)).unwrap();
        engine.apply(place(9, 10, 9)).unwrap();
        assert!(engine.is_complete());

        engine
            .apply(Command::Rotate {
                scope: Scope::Placed,
                id: PieceId(9),
            })
            .unwrap();
        assert!(!engine.is_complete());
    }

    #[test]
    fn test_rotating_available_piece_keeps_status() {
        let mut engine = engine();
        engine.apply(Command::StartChallenge(ChallengeId(2))).unwrap();
        engine
            .apply(Command::Rotate {
                scope: Scope::Available,
                id: PieceId(3),
            })
            .unwrap();
        assert_eq!(engine.status(), Some(ChallengeStatus::NotStarted));
    }

    #[test]
    fn test_reset_restarts_challenge() {
        let mut engine = engine();
        engine.apply(Command::StartChallenge(ChallengeId(1))).unwrap();
        engine.apply(place(0, 10, 4)).unwrap();
        engine.apply(Command::Reset).unwrap();

        assert!(engine.placed().is_empty());
        assert_eq!(engine.available().len(), SHAPES.len());
        assert_eq!(engine.status(), Some(ChallengeStatus::NotStarted));
    }

    #[test]
    fn test_start_challenge_clears_free_build() {
        let mut engine = engine();
        engine.apply(place(4, 0, 0)).unwrap();
        engine.apply(Command::StartChallenge(ChallengeId(3))).unwrap();

        assert!(engine.placed().is_empty());
        let active = engine.active_challenge().unwrap();
        assert_eq!(active.challenge.name, "Wall");
        assert_eq!(active.target.filled_count(), 16);
    }

    #[test]
    fn test_exit_to_free_mode_keeps_board() {
        let mut engine = engine();
        engine.apply(Command::StartChallenge(ChallengeId(1))).unwrap();
        engine.apply(place(0, 10, 4)).unwrap();
        engine.apply(Command::ExitToFreeMode).unwrap();

        assert!(engine.screen().is_free());
        assert_eq!(engine.status(), None);
        assert_eq!(engine.placed().len(), 1);
    }

    #[test]
    fn test_return_to_menu_resets_everything() {
        let mut engine = engine();
        engine.apply(Command::StartChallenge(ChallengeId(1))).unwrap();
        engine.apply(place(0, 10, 4)).unwrap();
        engine.apply(Command::ReturnToMenu).unwrap();

        assert!(engine.screen().is_menu());
        assert!(engine.placed().is_empty());
        assert_eq!(engine.available().len(), SHAPES.len());
        assert_eq!(engine.board().filled_count(), 0);
    }

    #[test]
    fn test_drop_at_pixel_places_then_moves() {
        let mut engine = engine();
        engine.drop_at_pixel(PieceId(8), 95.0, 40.0).unwrap();
        let placed = &engine.placed()[0];
        assert_eq!((placed.x, placed.y), (3, 1));

        engine.drop_at_pixel(PieceId(8), 300.0, 310.0).unwrap();
        assert_eq!(engine.placed().len(), 1);
        let placed = &engine.placed()[0];
        assert_eq!((placed.x, placed.y), (10, 10));

        assert!(engine.drop_at_pixel(PieceId(8), 601.0, 0.0).is_err());
    }

    #[test]
    fn test_invalid_catalog_is_rejected() {
        const BROKEN: &[ShapeDef] = &[ShapeDef {
            pattern: &[],
            color: crate::pieces::Color::Gray,
        }];
        let err = EngineState::new(Config::default(), BROKEN).unwrap_err();
        assert!(matches!(err, EngineError::InvalidShape(_)));
    }

    #[test]
    fn test_challenge_on_wrong_board_size_is_rejected() {
        let config = Config {
            board_size: 10,
            ..Config::default()
        };
        let mut engine = EngineState::new(config, SHAPES).unwrap();
        let err = engine
            .apply(Command::StartChallenge(ChallengeId(1)))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidTarget { .. }));
        assert!(engine.screen().is_free());
    }
}
