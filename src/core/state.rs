//! Game state: everything that is saved and restored.
//!
//! ## Flags
//!
//! The snapshot format stores the check flag and the winner as small
//! integers. In memory they are typed:
//! - `player_in_check`: `None` = 0, `Some(player)` = 1 or 2
//! - `result`: `None` = 0 (in progress), `Winner(player)` = 1 or 2,
//!   `Draw` = -1
//!
//! ## Counters
//!
//! - `turn`: half-moves modulo the transform period, drives the Time/Plus
//!   swap
//! - `sum_turn`: cumulative half-moves, for display

use super::board::Board;
use super::player::PlayerId;
use crate::pieces::Piece;
use crate::rules::{check_status, GameResult};

/// Complete engine state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    /// Pieces, in board order.
    pub board: Board,

    /// Player to move. The board is always oriented for this player.
    pub current_player: PlayerId,

    /// Player whose Sun is attacked, if any.
    pub player_in_check: Option<PlayerId>,

    /// Half-moves since the last transform cycle.
    pub turn: u8,

    /// Total half-moves played.
    pub sum_turn: u32,

    /// Set once the game has ended.
    pub result: Option<GameResult>,
}

impl GameState {
    /// Create a state for a board with player 1 to move and fresh counters.
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self {
            board,
            current_player: PlayerId::ONE,
            player_in_check: None,
            turn: 0,
            sum_turn: 0,
            result: None,
        }
    }

    /// Build a position from pieces, with `current_player` to move.
    ///
    /// The check flag is derived from the position. Returns `None` if two
    /// pieces share a square.
    #[must_use]
    pub fn from_pieces(
        pieces: impl IntoIterator<Item = Piece>,
        current_player: PlayerId,
    ) -> Option<Self> {
        let board = Board::from_pieces(pieces)?;
        let player_in_check = check_status(&board, current_player);
        Some(Self {
            current_player,
            player_in_check,
            ..Self::new(board)
        })
    }

    /// Check if the game has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Check flag as stored in snapshots: 0, 1 or 2.
    #[must_use]
    pub fn check_code(&self) -> u8 {
        self.player_in_check.map_or(0, PlayerId::raw)
    }

    /// Winner flag as stored in snapshots: 0, 1, 2 or -1.
    #[must_use]
    pub fn winner_code(&self) -> i8 {
        GameResult::code(self.result)
    }
}
