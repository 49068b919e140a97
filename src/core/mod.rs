//! Core engine types: squares, players, board, state, moves, configuration.
//!
//! Everything here is rule-agnostic storage. Move generation lives in
//! `pieces`, check and game-end logic in `rules`.

pub mod square;
pub mod player;
pub mod config;
pub mod board;
pub mod action;
pub mod state;

pub use square::{Square, SquareSet, BOARD_HEIGHT, BOARD_WIDTH, KING_STEPS, SQUARE_COUNT};
pub use player::PlayerId;
pub use config::EngineConfig;
pub use board::Board;
pub use action::{Move, MoveOutcome, RejectReason};
pub use state::GameState;
