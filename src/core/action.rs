//! Move requests and their outcomes.
//!
//! A `Move` is a (from, to) pair in the coordinates of the player to move.
//! Applying one yields a `MoveOutcome`: either the move was played (with what
//! it captured and whether it ended the game) or it was rejected. Rejection
//! is an ordinary value, never an error: the board is left untouched.

use serde::{Deserialize, Serialize};

use super::square::Square;
use crate::pieces::Piece;
use crate::rules::GameResult;

/// A move request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Square of the moving piece.
    pub from: Square,

    /// Destination square.
    pub to: Square,
}

impl Move {
    /// Create a move.
    #[must_use]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Why a move was not played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    /// No piece was selected.
    NoSelection,
    /// The game already has a result.
    GameOver,
    /// The selected piece belongs to the player not on move.
    NotYourPiece,
    /// The destination is not among the selection's legal moves.
    IllegalDestination,
    /// The player is in check and the move does not get them out of it.
    LeavesSunInCheck,
}

/// The result of `Engine::apply`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The move was played.
    Played {
        /// The move, in the mover's coordinates (before the flip).
        mv: Move,
        /// The piece removed from the destination, if any.
        captured: Option<Piece>,
        /// True if this ply completed a transform cycle.
        transformed: bool,
        /// Set when this move ended the game.
        result: Option<GameResult>,
    },
    /// The move was rejected and nothing changed.
    Rejected(RejectReason),
}

impl MoveOutcome {
    /// Check if the move was played.
    #[must_use]
    pub fn is_played(&self) -> bool {
        matches!(self, MoveOutcome::Played { .. })
    }

    /// The rejection reason, if the move was rejected.
    #[must_use]
    pub fn rejection(&self) -> Option<RejectReason> {
        match self {
            MoveOutcome::Rejected(reason) => Some(*reason),
            MoveOutcome::Played { .. } => None,
        }
    }
}
