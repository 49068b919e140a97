//! Errors raised while saving or loading snapshots.
//!
//! Move rejection is not an error (see `MoveOutcome`); the only fallible
//! operations in the crate are persistence.

use std::num::ParseIntError;

use thiserror::Error;

/// Snapshot persistence failure.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot is missing the {field} line")]
    MissingLine { field: &'static str },

    #[error("line {line}: expected {expected} record, found {found:?}")]
    UnexpectedLine {
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("{field}: {value:?} is not a number")]
    InvalidNumber {
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("unknown piece kind {0:?}")]
    UnknownPieceKind(String),

    #[error("unknown direction {0:?}")]
    UnknownFacing(String),

    #[error("{field}: expected {expected} entries, found {found}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{field}: unterminated entry {trailing:?}")]
    Unterminated {
        field: &'static str,
        trailing: String,
    },

    #[error("piece at ({x}, {y}) is off the board")]
    OffBoard { x: i32, y: i32 },

    #[error("{field}: invalid player {value}")]
    InvalidPlayer { field: &'static str, value: i64 },

    #[error("{field}: value {value} out of range")]
    OutOfRange { field: &'static str, value: i64 },

    #[error("two pieces on ({x}, {y})")]
    DuplicateSquare { x: i32, y: i32 },
}

/// Crate result type.
pub type Result<T> = std::result::Result<T, SnapshotError>;
