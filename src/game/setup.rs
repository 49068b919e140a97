//! The fixed starting layout.
//!
//! Player 1 occupies ranks 0 and 1, player 2 ranks 4 and 5. The back rank
//! reads `Plus Hourglass Time Sun Time Hourglass Plus` for both players.
//! Board order is significant (see `core::board`), so the layout is listed
//! in the order the pieces are placed.

use crate::core::{Board, PlayerId, Square, BOARD_WIDTH};
use crate::pieces::{Piece, PieceKind};

/// Back-rank pieces placed in mirrored pairs, by file.
const BACK_RANK: [(PieceKind, [i32; 2]); 4] = [
    (PieceKind::Plus, [0, 6]),
    (PieceKind::Hourglass, [1, 5]),
    (PieceKind::Time, [2, 4]),
    (PieceKind::Sun, [3, 3]),
];

/// Build the starting board.
///
/// Points come first, one pair per file. The back rank follows kind by kind,
/// alternating player 1 and player 2 on each file.
#[must_use]
pub fn starting_board() -> Board {
    let mut board = Board::new();
    let mut put = |kind, owner, x, y| {
        if let Some(square) = Square::new(x, y) {
            board.place(Piece::new(kind, owner, square));
        }
    };

    for x in 0..BOARD_WIDTH as i32 {
        put(PieceKind::Point, PlayerId::ONE, x, 1);
        put(PieceKind::Point, PlayerId::TWO, x, 4);
    }

    for (kind, files) in BACK_RANK {
        let files: &[i32] = if kind == PieceKind::Sun { &files[..1] } else { &files };
        for &x in files {
            put(kind, PlayerId::ONE, x, 0);
            put(kind, PlayerId::TWO, x, 5);
        }
    }

    board
}
