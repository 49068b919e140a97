//! Piece model and move generation.
//!
//! The kind set is closed, so pieces are a plain enum with one dispatch
//! function (`movegen::legal_moves`) rather than a trait per kind.

pub mod piece;
pub mod movegen;

pub use piece::{Facing, Piece, PieceKind};
pub use movegen::{legal_moves, pseudo_moves, MoveList};
