//! The piece collection.
//!
//! ## Ordering
//!
//! Pieces live in an ordered `im::Vector`. The order carries no meaning for
//! play but it is observable: the transform cycle replaces pieces in place,
//! the win/draw decision samples the opponent's pieces in this order, and the
//! snapshot writes them in this order.
//!
//! ## Lookup
//!
//! A `FxHashMap<Square, usize>` index maps each occupied square to the
//! piece's position in the vector. At most one piece may occupy a square;
//! breaking that is a programming error and fails fast in debug builds.
//!
//! ## Cloning
//!
//! Cloning shares the piece vector structurally (O(1)); the position index is
//! a plain map and is copied, O(n) in the piece count. Trial moves run on a
//! throwaway clone instead of mutating and restoring.

use im::Vector;
use rustc_hash::FxHashMap;

use super::player::PlayerId;
use super::square::{Square, BOARD_HEIGHT, BOARD_WIDTH};
use crate::pieces::{Piece, PieceKind};

/// Ordered piece set with a position index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    pieces: Vector<Piece>,
    index: FxHashMap<Square, usize>,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from pieces in the given order.
    ///
    /// Returns `None` if two pieces share a square.
    #[must_use]
    pub fn from_pieces(pieces: impl IntoIterator<Item = Piece>) -> Option<Self> {
        let mut board = Self::new();
        for piece in pieces {
            if board.is_occupied(piece.square()) {
                return None;
            }
            board.place(piece);
        }
        Some(board)
    }

    /// Number of pieces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Iterate pieces in board order.
    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    /// Iterate one player's pieces in board order.
    pub fn pieces_of(&self, player: PlayerId) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(move |p| p.owner() == player)
    }

    /// The piece on `square`, if any.
    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.index.get(&square).map(|&i| &self.pieces[i])
    }

    #[must_use]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.index.contains_key(&square)
    }

    /// The owner of the piece on `square`, if any.
    #[must_use]
    pub fn owner_at(&self, square: Square) -> Option<PlayerId> {
        self.piece_at(square).map(Piece::owner)
    }

    /// The first piece of `kind` owned by `player`, in board order.
    #[must_use]
    pub fn find(&self, kind: PieceKind, player: PlayerId) -> Option<&Piece> {
        self.pieces
            .iter()
            .find(|p| p.kind() == kind && p.owner() == player)
    }

    /// A player's Sun, if it is still on the board.
    #[must_use]
    pub fn sun_of(&self, player: PlayerId) -> Option<&Piece> {
        self.find(PieceKind::Sun, player)
    }

    /// Append a piece.
    ///
    /// # Panics
    ///
    /// In debug builds, if the square is already occupied.
    pub fn place(&mut self, piece: Piece) {
        debug_assert!(
            !self.is_occupied(piece.square()),
            "two pieces on {}",
            piece.square()
        );
        self.index.insert(piece.square(), self.pieces.len());
        self.pieces.push_back(piece);
    }

    /// Remove and return the piece on `square`.
    pub fn remove_at(&mut self, square: Square) -> Option<Piece> {
        let i = self.index.remove(&square)?;
        let piece = self.pieces.remove(i);
        for slot in self.index.values_mut() {
            if *slot > i {
                *slot -= 1;
            }
        }
        Some(piece)
    }

    /// Move the piece on `from` to the empty square `to`.
    ///
    /// Returns false if `from` is empty.
    ///
    /// # Panics
    ///
    /// In debug builds, if `to` is occupied.
    pub fn relocate(&mut self, from: Square, to: Square) -> bool {
        debug_assert!(!self.is_occupied(to), "two pieces on {to}");
        let Some(i) = self.index.remove(&from) else {
            return false;
        };
        self.pieces[i].set_square(to);
        self.index.insert(to, i);
        true
    }

    /// Apply `f` to the piece on `square`.
    pub(crate) fn update_at(&mut self, square: Square, f: impl FnOnce(&mut Piece)) {
        if let Some(&i) = self.index.get(&square) {
            f(&mut self.pieces[i]);
            debug_assert_eq!(self.pieces[i].square(), square, "update_at must not move a piece");
        }
    }

    /// Swap every Time for a Plus and vice versa, keeping order, owner and
    /// square. Returns the number of pieces replaced.
    pub fn transform_time_plus(&mut self) -> usize {
        let mut replaced = 0;
        for piece in self.pieces.iter_mut() {
            if let Some(next) = piece.transformed() {
                *piece = next;
                replaced += 1;
            }
        }
        replaced
    }

    /// Rotate the board 180°: every square maps to `(6 - x, 5 - y)` and every
    /// Point reverses its facing.
    pub fn flip(&mut self) {
        for piece in self.pieces.iter_mut() {
            piece.flip();
        }
        self.reindex();
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (i, piece) in self.pieces.iter().enumerate() {
            let previous = self.index.insert(piece.square(), i);
            debug_assert!(previous.is_none(), "two pieces on {}", piece.square());
        }
    }
}

impl std::fmt::Display for Board {
    /// Diagram with `y = 5` on top. Player 1 uppercase, player 2 lowercase.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in (0..BOARD_HEIGHT as i32).rev() {
            write!(f, "{y} ")?;
            for x in 0..BOARD_WIDTH as i32 {
                let c = Square::new(x, y)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', Piece::symbol);
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "  0123456")
    }
}
