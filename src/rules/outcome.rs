//! Game results and the end-of-move decision.
//!
//! After every accepted move, with the mover still on move (the board has
//! not flipped yet), `decide` recomputes the check flag and looks at the
//! opponent's Sun:
//!
//! 1. No opponent Sun left: the mover wins.
//! 2. The opponent's Sun has a legal move: play continues.
//! 3. It has none and is in check: checkmate, the mover wins.
//! 4. It has none, is not in check, and either the sampled opponent piece has
//!    no move or material is low: draw.
//! 5. Otherwise play continues.
//!
//! "Sampled opponent piece" is the first opponent piece in board order with
//! more than one legal move, or the last opponent piece if none has. Only
//! that piece's move count is consulted, not every piece's.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Board, EngineConfig, PlayerId};
use crate::pieces::{legal_moves, MoveList};

use super::attacks::check_status;

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Stalemate or insufficient material.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    /// Winner flag as stored in snapshots: 0 in progress, 1 or 2, -1 draw.
    #[must_use]
    pub fn code(result: Option<GameResult>) -> i8 {
        match result {
            None => 0,
            Some(GameResult::Draw) => -1,
            Some(GameResult::Winner(p)) => p.raw() as i8,
        }
    }

    /// Inverse of `code`. `Err` carries the unrecognised value.
    pub fn from_code(code: i8) -> Result<Option<GameResult>, i8> {
        match code {
            0 => Ok(None),
            -1 => Ok(Some(GameResult::Draw)),
            _ => u8::try_from(code)
                .ok()
                .and_then(PlayerId::from_raw)
                .map(|p| Some(GameResult::Winner(p)))
                .ok_or(code),
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Winner(p) => write!(f, "{p} wins"),
            GameResult::Draw => write!(f, "draw"),
        }
    }
}

/// What `decide` concluded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verdict {
    /// Check flag after the move.
    pub player_in_check: Option<PlayerId>,

    /// Set if the move ended the game.
    pub result: Option<GameResult>,
}

/// Check flag after `mover` has moved: the opponent if their Sun is attacked,
/// otherwise the mover if their own Sun is, otherwise nobody.
#[must_use]
pub fn check_after_move(board: &Board, mover: PlayerId) -> Option<PlayerId> {
    check_status(board, mover.opponent())
}

/// Decide whether the move just made by `mover` ended the game.
#[must_use]
pub fn decide(board: &Board, mover: PlayerId, config: &EngineConfig) -> Verdict {
    let opponent = mover.opponent();
    let player_in_check = check_after_move(board, mover);

    let Some(sun) = board.sun_of(opponent) else {
        return Verdict {
            player_in_check,
            result: Some(GameResult::Winner(mover)),
        };
    };

    if !legal_moves(sun, board).is_empty() {
        return Verdict {
            player_in_check,
            result: None,
        };
    }

    let sampled = sample_moves(board, opponent);
    trace!(
        opponent = opponent.raw(),
        sampled = sampled.len(),
        pieces = board.len(),
        "opponent sun has no moves"
    );

    let result = if player_in_check == Some(opponent) {
        Some(GameResult::Winner(mover))
    } else if sampled.is_empty() || board.len() < config.low_material_threshold {
        Some(GameResult::Draw)
    } else {
        None
    };

    Verdict {
        player_in_check,
        result,
    }
}

/// Legal moves of the sampled piece of `player` (see module docs).
fn sample_moves(board: &Board, player: PlayerId) -> MoveList {
    let mut moves = MoveList::new();
    for piece in board.pieces_of(player) {
        moves = legal_moves(piece, board);
        if moves.len() > 1 {
            break;
        }
    }
    moves
}
