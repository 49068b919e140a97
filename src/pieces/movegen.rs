//! Per-kind move generation.
//!
//! All generators share one stop rule along a line of travel: the first
//! occupied square ends the line. An enemy there is capturable and stays in
//! the set; an own piece is excluded. Nothing beyond the first occupied
//! square is ever produced.
//!
//! Generation is a pure function of the piece and the board. It never
//! records check; see `rules::attacks` for that.

use smallvec::SmallVec;

use crate::core::{Board, PlayerId, Square, KING_STEPS};
use crate::rules::attacks::threats;

use super::piece::{Piece, PieceKind};

/// Destination list. Plus has the most moves on an empty board (11).
pub type MoveList = SmallVec<[Square; 16]>;

const HOURGLASS_JUMPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
];

const DIAGONALS: [(i8, i8); 4] = [(1, 1), (-1, -1), (-1, 1), (1, -1)];

const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Legal destinations of `piece` on `board`.
///
/// For a Sun this excludes every square the opponent threatens. Other kinds
/// ignore king safety; the self-check guard in the engine handles that.
#[must_use]
pub fn legal_moves(piece: &Piece, board: &Board) -> MoveList {
    match piece.kind() {
        PieceKind::Sun => sun_moves(piece, board),
        _ => pseudo_moves(piece, board),
    }
}

/// Geometric destinations of `piece`, without Sun safety filtering.
///
/// This is also the set of squares a non-Sun piece threatens.
#[must_use]
pub fn pseudo_moves(piece: &Piece, board: &Board) -> MoveList {
    let from = piece.square();
    let owner = piece.owner();
    let mut out = MoveList::new();

    match piece.kind() {
        PieceKind::Point => {
            // Facing is always set on Points
            let dy = piece.facing().map_or(0, |f| f.dy());
            push_ray(&mut out, board, owner, from, (0, dy), 2);
        }
        PieceKind::Hourglass => {
            for (dx, dy) in HOURGLASS_JUMPS {
                push_step(&mut out, board, owner, from, (dx, dy));
            }
        }
        PieceKind::Time => {
            for step in DIAGONALS {
                push_ray(&mut out, board, owner, from, step, usize::MAX);
            }
        }
        PieceKind::Plus => {
            for step in ORTHOGONALS {
                push_ray(&mut out, board, owner, from, step, usize::MAX);
            }
        }
        PieceKind::Sun => {
            for step in KING_STEPS {
                push_step(&mut out, board, owner, from, step);
            }
        }
    }

    out
}

/// Sun moves: adjacent, not onto an own piece, not into a threatened square.
fn sun_moves(sun: &Piece, board: &Board) -> MoveList {
    let danger = threats(board, sun.owner().opponent());
    let mut out = pseudo_moves(sun, board);
    out.retain(|sq| !danger.contains(*sq));
    out
}

/// Walk from `from` in `step` for at most `max_len` squares.
fn push_ray(
    out: &mut MoveList,
    board: &Board,
    owner: PlayerId,
    from: Square,
    (dx, dy): (i8, i8),
    max_len: usize,
) {
    if dx == 0 && dy == 0 {
        return;
    }
    let mut cur = from;
    for _ in 0..max_len {
        let Some(next) = cur.offset(dx, dy) else {
            return;
        };
        match board.owner_at(next) {
            None => out.push(next),
            Some(other) => {
                if other != owner {
                    out.push(next);
                }
                return;
            }
        }
        cur = next;
    }
}

/// Single jump or step: on the grid and not onto an own piece.
fn push_step(out: &mut MoveList, board: &Board, owner: PlayerId, from: Square, (dx, dy): (i8, i8)) {
    if let Some(to) = from.offset(dx, dy) {
        if board.owner_at(to) != Some(owner) {
            out.push(to);
        }
    }
}
