//! Error taxonomy for the core.
//!
//! All failures are deterministic functions of their input; nothing here is retried.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Coordinate outside the field. Always a caller bug.
    #[error("coordinate ({x}, {y}) is outside the field")]
    OutOfBounds { x: i32, y: i32 },

    /// Cell id above `MAX_CELL_ID`.
    #[error("cell id {0} is out of range")]
    InvalidCellId(u64),

    /// Operation requires a falling piece but the playfield is empty (or similar sequencing bug).
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// Restore data is malformed or inconsistent; prior state is kept.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
