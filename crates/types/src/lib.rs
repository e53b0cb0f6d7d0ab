//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behavior beyond conversions, making them
//! usable in any context (core logic, session driver, persisted checkpoints).
//!
//! # Field Dimensions
//!
//! The playfield is a fixed-size grid. Changing the dimensions is a recompile-time
//! decision because the spawn point is derived from them:
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 22 rows (indexed 0-21, bottom to top)
//! - **Spawn point**: `(FIELD_WIDTH / 2, FIELD_HEIGHT - BOUNDING_BOX_RADIUS)` = `(5, 19)`
//!
//! The origin is the bottom-left cell; `y` grows upward.
//!
//! # Scoring
//!
//! | Lines | Base points |
//! |-------|-------------|
//! | 0 | 0 |
//! | 1 | 40 |
//! | 2 | 100 |
//! | 3 | 300 |
//! | 4+ | 1200 |
//!
//! Base points are multiplied by `difficulty + 1`.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Coordinate, PieceKind, FIELD_HEIGHT, FIELD_WIDTH, SPAWN_POINT};
//!
//! let piece = PieceKind::from_str("o").unwrap();
//! assert_eq!(piece, PieceKind::O);
//! assert_eq!(piece.index(), 3);
//!
//! assert_eq!(FIELD_WIDTH, 10);
//! assert_eq!(FIELD_HEIGHT, 22);
//! assert_eq!(SPAWN_POINT, Coordinate::new(5, 19));
//! ```

use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Field width in cells (10 columns)
pub const FIELD_WIDTH: usize = 10;

/// Field height in cells (22 rows)
pub const FIELD_HEIGHT: usize = 22;

/// Number of cells in every piece. Definitional: a five-cell piece is a different game.
pub const ELEMENTS_COUNT: usize = 4;

/// Distance from the center of the 5x5 piece box to its edge.
///
/// Every orientation offset must be strictly smaller than this in magnitude.
pub const BOUNDING_BOX_RADIUS: i32 = 3;

/// Anchor of a freshly spawned piece.
pub const SPAWN_POINT: Coordinate = Coordinate::new(
    (FIELD_WIDTH / 2) as i32,
    FIELD_HEIGHT as i32 - BOUNDING_BOX_RADIUS,
);

/// Line clear scoring table (classic Nintendo scoring), indexed by lines cleared.
///
/// Clears of more than four rows are paid as four.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// A cell identity token.
///
/// - `0`: empty
/// - anything else: occupied; the value is a stable per-cell id
pub type Cell = u64;

/// The empty cell value.
pub const EMPTY_CELL: Cell = 0;

/// Largest cell id accepted from callers and snapshots (`i64::MAX`).
pub const MAX_CELL_ID: Cell = i64::MAX as Cell;

/// Integer (x, y) pair with the origin at the bottom-left.
///
/// Used both for absolute field cells and for piece-relative offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Same coordinate shifted by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Whether this coordinate names a cell of the playfield.
    pub const fn in_field(self) -> bool {
        self.x >= 0 && self.x < FIELD_WIDTH as i32 && self.y >= 0 && self.y < FIELD_HEIGHT as i32
    }
}

impl Add for Coordinate {
    type Output = Coordinate;

    fn add(self, rhs: Coordinate) -> Coordinate {
        self.offset(rhs.x, rhs.y)
    }
}

/// The seven piece kinds, in catalog order.
///
/// The discriminant order is part of the persisted format: a snapshot stores a
/// piece as its [`PieceKind::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    T,
    J,
    Z,
    O,
    S,
    L,
    I,
}

impl PieceKind {
    /// Number of kinds in the catalog
    pub const COUNT: usize = 7;

    /// All kinds in catalog order
    pub const ALL: [PieceKind; PieceKind::COUNT] = [
        PieceKind::T,
        PieceKind::J,
        PieceKind::Z,
        PieceKind::O,
        PieceKind::S,
        PieceKind::L,
        PieceKind::I,
    ];

    /// Position of this kind in the catalog
    pub fn index(self) -> usize {
        self as usize
    }

    /// Kind at a catalog position, `None` when out of range
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_index(0), Some(PieceKind::T));
    /// assert_eq!(PieceKind::from_index(6), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_index(7), None);
    /// ```
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("T"), Some(PieceKind::T));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "t" => Some(PieceKind::T),
            "j" => Some(PieceKind::J),
            "z" => Some(PieceKind::Z),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "l" => Some(PieceKind::L),
            "i" => Some(PieceKind::I),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::T => "t",
            PieceKind::J => "j",
            PieceKind::Z => "z",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::L => "l",
            PieceKind::I => "i",
        }
    }
}
