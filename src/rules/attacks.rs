//! Threat and check queries.
//!
//! Two notions of "attacked" are used by the rules:
//!
//! - **Threat map** (`threats`): every square a player's pieces could move
//!   to, where a Sun contributes its raw adjacency. A Sun may not step into
//!   any square of the opponent's threat map. Using raw adjacency for the
//!   opposing Sun keeps the computation non-recursive.
//! - **Check** (`in_check`): a player's Sun stands on a square one of the
//!   opponent's non-Sun pieces could move to. Suns never give check.
//!
//! Both are pure queries over a board.

use crate::core::{Board, PlayerId, Square, SquareSet};
use crate::pieces::{pseudo_moves, Piece};

/// Squares `player` threatens on `board`.
#[must_use]
pub fn threats(board: &Board, player: PlayerId) -> SquareSet {
    let mut set = SquareSet::EMPTY;
    for piece in board.pieces_of(player) {
        if piece.is_sun() {
            set.extend(piece.square().neighbours());
        } else {
            set.extend(pseudo_moves(piece, board));
        }
    }
    set
}

/// True iff one of `by`'s non-Sun pieces could move to `target`.
#[must_use]
pub fn is_attacked(board: &Board, target: Square, by: PlayerId) -> bool {
    board
        .pieces_of(by)
        .filter(|p| !p.is_sun())
        .any(|p| pseudo_moves(p, board).contains(&target))
}

/// True iff `player`'s Sun is attacked. A player without a Sun is not in
/// check.
#[must_use]
pub fn in_check(board: &Board, player: PlayerId) -> bool {
    board
        .sun_of(player)
        .map(Piece::square)
        .is_some_and(|sq| is_attacked(board, sq, player.opponent()))
}

/// The player in check, looking at `first` before their opponent.
///
/// At most one player is reported even when both Suns are attacked.
#[must_use]
pub fn check_status(board: &Board, first: PlayerId) -> Option<PlayerId> {
    [first, first.opponent()]
        .into_iter()
        .find(|&player| in_check(board, player))
}
