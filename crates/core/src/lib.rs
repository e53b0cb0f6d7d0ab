//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the authoritative model of a falling-block game: the
//! playfield grid, the falling piece and its legal motions, line clearing,
//! scoring, and exact snapshot/restore. It has **no** dependencies on rendering,
//! timing or I/O:
//!
//! - **Deterministic**: the same piece provider produces identical games
//! - **Synchronous**: every call runs to completion; gravity is driven by the caller
//! - **Single owner**: one [`Playfield`] owns its grid and pieces; wrap it in a
//!   mutex if several threads must drive it
//!
//! # Module Structure
//!
//! - [`catalog`]: the seven piece kinds and their 19 orientations
//! - [`grid`]: 10x22 cell-id grid with the field listener registry
//! - [`playfield`]: spawn / move / rotate / descend / lock state machine
//! - [`clear`]: full-row detection and collapse
//! - [`scoring`]: classic line-clear scoring
//! - [`snapshot`]: serializable checkpoint of a playfield
//! - [`rng`]: next-piece sources
//! - [`error`]: error taxonomy
//!
//! # Example
//!
//! ```
//! use blockfall_core::{FixedPiece, Playfield, ScoringState};
//! use blockfall_core::types::PieceKind;
//!
//! let mut field = Playfield::new(FixedPiece(PieceKind::O));
//! let mut scoring = ScoringState::new();
//!
//! assert!(field.spawn());
//! field.try_move(-4, 0);
//! loop {
//!     let result = field.descend().unwrap();
//!     if result.is_locked() {
//!         scoring.award(result.cleared_rows().len());
//!         break;
//!     }
//! }
//! assert_eq!(field.grid().occupied_count(), 4);
//! assert_eq!(scoring.score(), 0);
//! ```

pub mod catalog;
pub mod clear;
pub mod error;
pub mod grid;
pub mod playfield;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use catalog::{orientation_count, orientations, Orientation};
pub use clear::ClearedRows;
pub use error::{CoreError, Result};
pub use grid::{FieldListener, Grid, ListenerHandle};
pub use playfield::{ActivePiece, ClearResult, Playfield};
pub use rng::{FixedPiece, PieceProvider, PieceSequence, SimpleRng};
pub use scoring::ScoringState;
pub use snapshot::{Snapshot, ABSENT_PIECE};
