//! Snapshot module - serializable projection of a playfield
//!
//! A [`Snapshot`] holds everything needed to resume a playfield exactly: the grid
//! as a row-major array of cell ids (`cells[y][x]`), the active piece, the next
//! piece and the orientation index. Pieces are stored as catalog indices with
//! [`ABSENT_PIECE`] for "none", which is what the persisted form carries.

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::error::{CoreError, Result};
use crate::grid::Row;
use crate::playfield::ActivePiece;
use crate::types::{
    Cell, Coordinate, PieceKind, EMPTY_CELL, FIELD_HEIGHT, FIELD_WIDTH, MAX_CELL_ID, SPAWN_POINT,
};

/// Marker for "no piece" in a snapshot
pub const ABSENT_PIECE: i32 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snapshot {
    pub cells: Vec<Vec<Cell>>,
    pub anchor: Coordinate,
    pub active_kind: i32,
    pub next_kind: i32,
    pub orientation: i32,
}

/// A snapshot that passed validation, ready to be applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidSnapshot {
    pub rows: [Row; FIELD_HEIGHT],
    pub active: Option<ActivePiece>,
    pub next: Option<PieceKind>,
    pub orientation: i32,
    pub anchor: Coordinate,
}

fn decode_kind(field: &str, value: i32) -> Result<Option<PieceKind>> {
    if value == ABSENT_PIECE {
        return Ok(None);
    }
    usize::try_from(value)
        .ok()
        .and_then(PieceKind::from_index)
        .map(Some)
        .ok_or_else(|| CoreError::InvalidSnapshot(format!("{field} {value} is not a piece kind")))
}

impl Snapshot {
    /// Snapshot of an empty playfield
    pub fn empty() -> Self {
        Self {
            cells: vec![vec![EMPTY_CELL; FIELD_WIDTH]; FIELD_HEIGHT],
            anchor: SPAWN_POINT,
            active_kind: ABSENT_PIECE,
            next_kind: ABSENT_PIECE,
            orientation: 0,
        }
    }

    pub fn active_kind(&self) -> Option<PieceKind> {
        decode_kind("active_kind", self.active_kind).ok().flatten()
    }

    pub fn next_kind(&self) -> Option<PieceKind> {
        decode_kind("next_kind", self.next_kind).ok().flatten()
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&c| c != EMPTY_CELL)
            .count()
    }

    /// Check shape and references without touching any playfield
    pub(crate) fn validate(&self) -> Result<ValidSnapshot> {
        if self.cells.len() != FIELD_HEIGHT {
            return Err(CoreError::InvalidSnapshot(format!(
                "expected {} rows, found {}",
                FIELD_HEIGHT,
                self.cells.len()
            )));
        }

        let mut rows = [[EMPTY_CELL; FIELD_WIDTH]; FIELD_HEIGHT];
        for (y, (src, dst)) in self.cells.iter().zip(rows.iter_mut()).enumerate() {
            if src.len() != FIELD_WIDTH {
                return Err(CoreError::InvalidSnapshot(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    src.len(),
                    FIELD_WIDTH
                )));
            }
            if let Some(x) = src.iter().position(|&id| id > MAX_CELL_ID) {
                return Err(CoreError::InvalidSnapshot(format!(
                    "cell ({}, {}) has out-of-range id {}",
                    x, y, src[x]
                )));
            }
            dst.copy_from_slice(src);
        }

        let next = decode_kind("next_kind", self.next_kind)?;
        let active = match decode_kind("active_kind", self.active_kind)? {
            None => None,
            Some(kind) => {
                let piece = usize::try_from(self.orientation)
                    .ok()
                    .and_then(|o| ActivePiece::new(kind, o, self.anchor))
                    .ok_or_else(|| {
                        CoreError::InvalidSnapshot(format!(
                            "orientation {} out of range for {:?} ({} orientations)",
                            self.orientation,
                            kind,
                            catalog::orientation_count(kind)
                        ))
                    })?;
                if let Some(cell) = piece.cells().iter().find(|c| !c.in_field()) {
                    return Err(CoreError::InvalidSnapshot(format!(
                        "active piece cell ({}, {}) is outside the field",
                        cell.x, cell.y
                    )));
                }
                Some(piece)
            }
        };

        Ok(ValidSnapshot {
            rows,
            active,
            next,
            orientation: self.orientation,
            anchor: self.anchor,
        })
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot_is_valid() {
        let v = Snapshot::empty().validate().unwrap();
        assert!(v.active.is_none());
        assert!(v.next.is_none());
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let mut s = Snapshot::empty();
        s.cells.pop();
        assert!(matches!(s.validate(), Err(CoreError::InvalidSnapshot(_))));

        let mut s = Snapshot::empty();
        s.cells[3].push(0);
        assert!(matches!(s.validate(), Err(CoreError::InvalidSnapshot(_))));
    }

    #[test]
    fn test_rejects_out_of_range_cell_id() {
        let mut s = Snapshot::empty();
        s.cells[5][9] = u64::MAX;
        assert!(matches!(s.validate(), Err(CoreError::InvalidSnapshot(_))));

        s.cells[5][9] = MAX_CELL_ID;
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_rejects_unknown_kind() {
        let mut s = Snapshot::empty();
        s.active_kind = 7;
        assert!(matches!(s.validate(), Err(CoreError::InvalidSnapshot(_))));

        let mut s = Snapshot::empty();
        s.next_kind = -2;
        assert!(matches!(s.validate(), Err(CoreError::InvalidSnapshot(_))));
    }

    #[test]
    fn test_rejects_orientation_out_of_range() {
        let mut s = Snapshot::empty();
        s.active_kind = PieceKind::O.index() as i32;
        s.orientation = 1;
        assert!(matches!(s.validate(), Err(CoreError::InvalidSnapshot(_))));
    }

    #[test]
    fn test_rejects_piece_outside_field() {
        let mut s = Snapshot::empty();
        s.active_kind = PieceKind::I.index() as i32;
        s.anchor = Coordinate::new(0, 10);
        assert!(matches!(s.validate(), Err(CoreError::InvalidSnapshot(_))));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut s = Snapshot::empty();
        s.cells[0][0] = 42;
        s.active_kind = PieceKind::T.index() as i32;
        s.orientation = 2;
        s.next_kind = PieceKind::L.index() as i32;

        let text = serde_json::to_string(&s).unwrap();
        let back: Snapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(back, s);
        assert_eq!(back.active_kind(), Some(PieceKind::T));
        assert_eq!(back.next_kind(), Some(PieceKind::L));
    }
}
