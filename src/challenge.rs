//! Challenge definitions and completion checking.
//!
//! A challenge is a hand-authored target silhouette. It is complete when the
//! projection of the placed pieces equals the target exactly: every cell that
//! is filled in one must be filled in the other, and every empty cell must be
//! empty in both.

use rustc_hash::FxHashSet;

use crate::grid::{Board, BoardParseError};

/// Identifier of a challenge in [`CHALLENGES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub struct ChallengeId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A fixed target the player must reproduce.
///
/// `target` holds one string per board row, `#` for filled cells and `.` for
/// empty ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Challenge {
    pub id: ChallengeId,
    pub name: &'static str,
    pub difficulty: Difficulty,
    pub description: &'static str,
    pub target: &'static [&'static str],
}

impl Challenge {
    /// Parses the target silhouette into a board of side `size`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardParseError`] if the target is not a `size` x `size`
    /// grid of `#` and `.`.
    pub fn target_board(&self, size: usize) -> Result<Board, BoardParseError> {
        Board::from_ascii(size, self.target)
    }
}

/// Progress through the active challenge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum ChallengeStatus {
    /// Started (or restarted) with no placement changes yet.
    #[default]
    #[display("not started")]
    NotStarted,
    #[display("in progress")]
    InProgress,
    #[display("completed")]
    Completed,
}

impl ChallengeStatus {
    /// Status after the placed pieces changed, given whether the board now
    /// matches the target.
    pub fn after_change(complete: bool) -> Self {
        if complete {
            Self::Completed
        } else {
            Self::InProgress
        }
    }
}

/// Returns whether `board` matches `target` cell for cell.
///
/// Boards of different sizes never match.
#[inline]
pub fn is_complete(board: &Board, target: &Board) -> bool {
    board == target
}

/// Looks up a challenge by id.
pub fn challenge_by_id(id: ChallengeId) -> Option<&'static Challenge> {
    CHALLENGES.iter().find(|challenge| challenge.id == id)
}

/// Returns whether every challenge id in `challenges` is distinct.
pub fn ids_are_unique(challenges: &[Challenge]) -> bool {
    let mut seen = FxHashSet::default();
    challenges.iter().all(|challenge| seen.insert(challenge.id))
}

/// The built-in challenges, easiest first.
///
/// Every target can be built from the master shape catalog.
pub const CHALLENGES: &[Challenge] = &[
    Challenge {
        id: ChallengeId(1),
        name: "Tower",
        difficulty: Difficulty::Easy,
        description: "Stack both straight bars into one tall column.",
        target: &[
            "....................",
            "....................",
            "....................",
            "....................",
            "..........#.........",
            "..........#.........",
            "..........#.........",
            "..........#.........",
            "..........#.........",
            "..........#.........",
            "..........#.........",
            "..........#.........",
            "..........#.........",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
        ],
    },
    Challenge {
        id: ChallengeId(2),
        name: "Brick",
        difficulty: Difficulty::Easy,
        description: "Lay the two 2x3 blocks on top of each other.",
        target: &[
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "........###.........",
            "........###.........",
            "........###.........",
            "........###.........",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
        ],
    },
    Challenge {
        id: ChallengeId(3),
        name: "Wall",
        difficulty: Difficulty::Medium,
        description: "Build a long wall two cells high.",
        target: &[
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....########........",
            "....########........",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
        ],
    },
    Challenge {
        id: ChallengeId(4),
        name: "Signpost",
        difficulty: Difficulty::Medium,
        description: "A plus on a pole, standing on a square base.",
        target: &[
            "....................",
            "....................",
            ".........#..........",
            "........###.........",
            ".........#..........",
            ".........#..........",
            ".........#..........",
            ".........#..........",
            ".........#..........",
            ".........#..........",
            "........##..........",
            "........##..........",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
        ],
    },
    Challenge {
        id: ChallengeId(5),
        name: "Anchor",
        difficulty: Difficulty::Hard,
        description: "Hang a long stem from a T and give it a flat foot.",
        target: &[
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            ".....###............",
            "......#.............",
            "......#.............",
            "......#.............",
            "......#.............",
            "......#.............",
            "......#.............",
            "......#.............",
            ".....####...........",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
        ],
    },
];
