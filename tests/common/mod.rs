//! Shared helpers for integration tests.

#![allow(dead_code)]

use once_cell::sync::OnceCell;
use talabia::{Engine, EngineConfig, GameState, Piece, PieceKind, PlayerId, Square};
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a test subscriber once per binary.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, defaulting to `warn`.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

pub fn sq(x: i32, y: i32) -> Square {
    Square::new(x, y).unwrap()
}

pub fn p1(kind: PieceKind, x: i32, y: i32) -> Piece {
    Piece::new(kind, PlayerId::ONE, sq(x, y))
}

pub fn p2(kind: PieceKind, x: i32, y: i32) -> Piece {
    Piece::new(kind, PlayerId::TWO, sq(x, y))
}

/// Engine on a constructed position with default configuration.
pub fn engine_from(pieces: &[Piece], to_move: PlayerId) -> Engine {
    let state = GameState::from_pieces(pieces.iter().copied(), to_move).unwrap();
    Engine::from_state(state, EngineConfig::default())
}
