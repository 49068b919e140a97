//! Saving and restoring game state as plain text.

mod codec;

pub use codec::{decode, encode};

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::core::{EngineConfig, GameState};
use crate::error::Result;

/// Write `state` to `path`, replacing any existing file.
pub fn write_file(path: &Path, state: &GameState) -> Result<()> {
    fs::write(path, encode(state))?;
    debug!(path = %path.display(), pieces = state.board.len(), "snapshot written");
    Ok(())
}

/// Read and decode the snapshot at `path`.
pub fn read_file(path: &Path, config: &EngineConfig) -> Result<GameState> {
    let text = fs::read_to_string(path)?;
    let state = decode(&text, config)?;
    debug!(path = %path.display(), pieces = state.board.len(), "snapshot read");
    Ok(state)
}
