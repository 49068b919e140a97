//! # talabia
//!
//! Rules engine for Talabia chess, played on a 7×6 board.
//!
//! ## Design Principles
//!
//! 1. **Pure Rules**: Move generation, threat maps and the win/draw decision
//!    are functions of a board. Only `Engine::apply` mutates game state.
//!
//! 2. **Player-Relative Board**: The board is rotated 180° after every
//!    non-terminal move, so the player to move always sits at `y = 0`.
//!
//! 3. **Rejection Is a Value**: An illegal move request yields
//!    `MoveOutcome::Rejected`, never an error, and leaves the state intact.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: The piece sequence is an `im::Vector`
//!   shared structurally between clones (the position index is copied), so
//!   self-check trials run on a cheap clone instead of mutate-and-restore.
//!
//! - **Ordered Pieces**: Board order is observable (transform cycle,
//!   end-of-game sampling, snapshots); a position index sits alongside for
//!   lookups.
//!
//! ## Modules
//!
//! - `core`: Squares, players, board, state, move requests, configuration
//! - `pieces`: Piece kinds and per-kind move generation
//! - `rules`: Check queries and the end-of-move decision
//! - `game`: Starting layout and the `Engine`
//! - `snapshot`: Flat text save/restore
//! - `error`: Snapshot errors

pub mod core;
pub mod pieces;
pub mod rules;
pub mod game;
pub mod snapshot;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    Board, EngineConfig, GameState, Move, MoveOutcome, PlayerId, RejectReason, Square, SquareSet,
    BOARD_HEIGHT, BOARD_WIDTH,
};

pub use crate::pieces::{legal_moves, Facing, MoveList, Piece, PieceKind};

pub use crate::rules::{in_check, GameResult};

pub use crate::game::{starting_board, Engine};

pub use crate::error::{Result, SnapshotError};
