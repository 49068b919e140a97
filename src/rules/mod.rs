//! Check detection and game-end rules.
//!
//! - `attacks`: pure threat and check queries over a board
//! - `outcome`: `GameResult` and the decision run after every accepted move
//!
//! Neither module mutates anything; the engine decides when to call them.

pub mod attacks;
pub mod outcome;

pub use attacks::{check_status, in_check, is_attacked, threats};
pub use outcome::{check_after_move, decide, GameResult, Verdict};
