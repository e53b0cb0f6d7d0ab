//! Shape catalog - the seven piece kinds and their rotation states
//!
//! Each kind owns an ordered, cyclic list of orientations. An orientation is four
//! offsets relative to the piece anchor; index 0 is the spawn orientation.
//! Rotating by `+1` advances the index, `-1` goes back, both modulo the kind's
//! orientation count.
//!
//! The offset table below defines what every piece looks like. It is data, not
//! behavior: the table is closed and static, so no dispatch is needed.

use crate::types::{Coordinate, PieceKind, BOUNDING_BOX_RADIUS, ELEMENTS_COUNT};

/// Four cell offsets relative to the anchor
pub type Orientation = [Coordinate; ELEMENTS_COUNT];

const fn c(x: i32, y: i32) -> Coordinate {
    Coordinate::new(x, y)
}

const T_ORIENTATIONS: [Orientation; 4] = [
    [c(-1, 0), c(0, 0), c(1, 0), c(0, 1)],   // down (spawn)
    [c(0, -1), c(-1, 0), c(0, 0), c(0, 1)],  // left
    [c(-1, 0), c(0, 0), c(1, 0), c(0, -1)],  // up
    [c(0, -1), c(0, 0), c(1, 0), c(0, 1)],   // right
];

const J_ORIENTATIONS: [Orientation; 4] = [
    [c(-1, 0), c(0, 0), c(1, 0), c(1, 1)],   // down (spawn)
    [c(0, -1), c(0, 0), c(-1, 1), c(0, 1)],  // left
    [c(-1, -1), c(-1, 0), c(0, 0), c(1, 0)], // up
    [c(0, -1), c(1, -1), c(0, 0), c(0, 1)],  // right
];

const Z_ORIENTATIONS: [Orientation; 2] = [
    [c(-1, 0), c(0, 0), c(0, 1), c(1, 1)],   // horizontal (spawn)
    [c(1, -1), c(0, 0), c(1, 0), c(0, 1)],   // vertical
];

const O_ORIENTATIONS: [Orientation; 1] = [
    [c(-1, 0), c(0, 0), c(-1, 1), c(0, 1)],  // spawn
];

const S_ORIENTATIONS: [Orientation; 2] = [
    [c(0, 0), c(1, 0), c(-1, 1), c(0, 1)],   // horizontal (spawn)
    [c(0, -1), c(0, 0), c(1, 0), c(1, 1)],   // vertical
];

const L_ORIENTATIONS: [Orientation; 4] = [
    [c(-1, 0), c(0, 0), c(1, 0), c(-1, 1)],  // down (spawn)
    [c(-1, -1), c(0, -1), c(0, 0), c(0, 1)], // left
    [c(1, -1), c(-1, 0), c(0, 0), c(1, 0)],  // up
    [c(0, -1), c(0, 0), c(0, 1), c(1, 1)],   // right
];

const I_ORIENTATIONS: [Orientation; 2] = [
    [c(-2, 0), c(-1, 0), c(0, 0), c(1, 0)],  // horizontal (spawn)
    [c(0, -2), c(0, -1), c(0, 0), c(0, 1)],  // vertical
];

/// Total number of orientations across the catalog
pub const TOTAL_ORIENTATIONS: usize = 19;

/// Ordered orientation list for a kind
pub fn orientations(kind: PieceKind) -> &'static [Orientation] {
    match kind {
        PieceKind::T => &T_ORIENTATIONS,
        PieceKind::J => &J_ORIENTATIONS,
        PieceKind::Z => &Z_ORIENTATIONS,
        PieceKind::O => &O_ORIENTATIONS,
        PieceKind::S => &S_ORIENTATIONS,
        PieceKind::L => &L_ORIENTATIONS,
        PieceKind::I => &I_ORIENTATIONS,
    }
}

/// Number of orientations for a kind (always at least 1)
pub fn orientation_count(kind: PieceKind) -> usize {
    orientations(kind).len()
}

/// Offsets of one orientation, `None` if the index is out of range for the kind
pub fn orientation(kind: PieceKind, index: usize) -> Option<&'static Orientation> {
    orientations(kind).get(index)
}

/// Spawn orientation of a kind (used for the next-piece preview)
pub fn spawn_orientation(kind: PieceKind) -> &'static Orientation {
    &orientations(kind)[0]
}

/// Rotate an orientation index by `delta`, normalized into `[0, count)`.
///
/// Correct for negative deltas of any size.
pub fn rotate_index(kind: PieceKind, index: usize, delta: i32) -> usize {
    let count = orientation_count(kind) as i64;
    let raw = index as i64 + delta as i64;
    (((raw % count) + count) % count) as usize
}

/// Whether every offset of an orientation fits inside the bounding box
pub fn fits_bounding_box(orientation: &Orientation) -> bool {
    orientation
        .iter()
        .all(|o| o.x.abs() < BOUNDING_BOX_RADIUS && o.y.abs() < BOUNDING_BOX_RADIUS)
}
