//! Game flow: the starting layout and the engine that drives play.

pub mod setup;
pub mod engine;

pub use setup::starting_board;
pub use engine::Engine;
