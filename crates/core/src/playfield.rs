//! Playfield module - the falling piece state machine
//!
//! A playfield owns the grid, the active (falling) piece, the next piece and the
//! source of new pieces. It has two states:
//!
//! - **Empty**: no active piece (initially, and after every lock)
//! - **Falling**: a piece exists and can move, rotate and descend
//!
//! Gravity is driven entirely by the caller through [`Playfield::descend`]; there
//! is no timer in here. Pause and game over belong to the controller.

use std::fmt;

use crate::catalog::{self, Orientation};
use crate::clear::{self, ClearedRows};
use crate::error::{CoreError, Result};
use crate::grid::{FieldListener, Grid, ListenerHandle};
use crate::rng::{PieceProvider, SimpleRng};
use crate::snapshot::{Snapshot, ABSENT_PIECE};
use crate::types::{Cell, Coordinate, PieceKind, ELEMENTS_COUNT, SPAWN_POINT};

/// The falling piece: kind, orientation index and anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    kind: PieceKind,
    orientation: usize,
    anchor: Coordinate,
}

impl ActivePiece {
    /// `None` when the orientation index is out of range for the kind
    pub fn new(kind: PieceKind, orientation: usize, anchor: Coordinate) -> Option<Self> {
        catalog::orientation(kind, orientation)?;
        Some(Self {
            kind,
            orientation,
            anchor,
        })
    }

    /// A piece of `kind` in spawn orientation at the spawn point
    pub fn spawned(kind: PieceKind) -> Self {
        Self {
            kind,
            orientation: 0,
            anchor: SPAWN_POINT,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn orientation(&self) -> usize {
        self.orientation
    }

    pub fn anchor(&self) -> Coordinate {
        self.anchor
    }

    /// Relative offsets of the current orientation
    pub fn offsets(&self) -> &'static Orientation {
        // orientation is range-checked on construction and normalized on rotation
        &catalog::orientations(self.kind)[self.orientation]
    }

    /// Absolute cells of the piece
    pub fn cells(&self) -> [Coordinate; ELEMENTS_COUNT] {
        self.offsets().map(|o| self.anchor + o)
    }

    fn moved(self, dx: i32, dy: i32, d_orientation: i32) -> Self {
        Self {
            kind: self.kind,
            orientation: catalog::rotate_index(self.kind, self.orientation, d_orientation),
            anchor: self.anchor.offset(dx, dy),
        }
    }
}

/// Outcome of a single descent step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearResult {
    /// The piece moved down one row
    Falling,
    /// The piece locked; the cleared rows are ascending and possibly empty
    Locked(ClearedRows),
}

impl ClearResult {
    pub fn is_locked(&self) -> bool {
        matches!(self, ClearResult::Locked(_))
    }

    /// Cleared rows (empty while still falling)
    pub fn cleared_rows(&self) -> &[usize] {
        match self {
            ClearResult::Falling => &[],
            ClearResult::Locked(rows) => rows,
        }
    }
}

/// Grid, falling piece and next piece of one game
pub struct Playfield {
    grid: Grid,
    active: Option<ActivePiece>,
    next: Option<PieceKind>,
    projected_y: i32,
    /// Orientation and anchor reported while no piece is falling
    idle_orientation: i32,
    idle_anchor: Coordinate,
    provider: Box<dyn PieceProvider>,
}

impl Playfield {
    /// Create an empty playfield drawing pieces from `provider`
    pub fn new(provider: impl PieceProvider + 'static) -> Self {
        Self {
            grid: Grid::new(),
            active: None,
            next: None,
            projected_y: SPAWN_POINT.y,
            idle_orientation: 0,
            idle_anchor: SPAWN_POINT,
            provider: Box::new(provider),
        }
    }

    /// Create an empty playfield with a seeded LCG piece source
    pub fn with_seed(seed: u32) -> Self {
        Self::new(SimpleRng::new(seed))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell_at(&self, x: i32, y: i32) -> Result<Cell> {
        self.grid.cell_at(x, y)
    }

    /// Overwrite one cell; the projected row follows the change
    pub fn set_cell(&mut self, x: i32, y: i32, id: Cell) -> Result<()> {
        self.grid.set_cell(x, y, id)?;
        self.recompute_projected_y();
        Ok(())
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerHandle
    where
        F: FnMut(i32, i32) + 'static,
    {
        self.grid.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, handle: ListenerHandle) -> bool {
        self.grid.unsubscribe(handle)
    }

    /// Emit every occupied cell once to every listener
    pub fn replay_listeners(&mut self) {
        self.grid.replay_listeners();
    }

    /// Emit every occupied cell once to `listener` only
    pub fn replay_into(&self, listener: &mut dyn FieldListener) {
        self.grid.replay_into(listener);
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn is_falling(&self) -> bool {
        self.active.is_some()
    }

    /// Offsets of the active piece in its current orientation
    pub fn active_offsets(&self) -> Option<&'static Orientation> {
        self.active.map(|p| p.offsets())
    }

    pub fn next_kind(&self) -> Option<PieceKind> {
        self.next
    }

    /// Spawn-orientation offsets of the next piece (preview)
    pub fn next_offsets(&self) -> Option<&'static Orientation> {
        self.next.map(catalog::spawn_orientation)
    }

    /// Lowest anchor row reachable by moving straight down, while falling
    pub fn projected_y(&self) -> Option<i32> {
        self.active.map(|_| self.projected_y)
    }

    /// Absolute cells of the ghost piece
    pub fn projected_cells(&self) -> Option<[Coordinate; ELEMENTS_COUNT]> {
        let active = self.active?;
        let dy = self.projected_y - active.anchor.y;
        Some(active.moved(0, dy, 0).cells())
    }

    /// Reset every cell and drop the active and next pieces
    pub fn clear(&mut self) {
        self.grid.clear();
        self.active = None;
        self.next = None;
        self.projected_y = SPAWN_POINT.y;
        self.idle_orientation = 0;
        self.idle_anchor = SPAWN_POINT;
    }

    /// Check that every cell of a placement is inside the field and empty
    pub fn fits(&self, piece: &ActivePiece) -> bool {
        piece.cells().iter().all(|c| self.grid.is_free(c.x, c.y))
    }

    /// Spawn the next piece.
    ///
    /// No-op returning true while a piece is falling. Returns false when the spawn
    /// position already collides (game over); the piece stays placed there.
    pub fn spawn(&mut self) -> bool {
        if self.active.is_some() {
            return true;
        }

        let kind = self.take_next();
        let piece = ActivePiece::spawned(kind);
        self.active = Some(piece);
        self.recompute_projected_y();
        self.fits(&piece)
    }

    /// Shift by `dx` columns and rotate by `d_orientation` in one atomic attempt.
    ///
    /// Returns false (state unchanged) when empty or when the result collides.
    pub fn try_move(&mut self, dx: i32, d_orientation: i32) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let candidate = active.moved(dx, 0, d_orientation);
        if !self.fits(&candidate) {
            return false;
        }

        self.active = Some(candidate);
        self.recompute_projected_y();
        true
    }

    /// Whether the active piece can move one row down
    pub fn can_descend(&self) -> Result<bool> {
        let active = self
            .active
            .ok_or(CoreError::InvalidState("can_descend without a falling piece"))?;
        Ok(self.fits(&active.moved(0, -1, 0)))
    }

    /// Move the active piece one row down, or lock it when it cannot move.
    ///
    /// Locking writes the four cells (notifying listeners), clears full rows within
    /// the rows the piece touched, and returns to the empty state.
    pub fn descend(&mut self) -> Result<ClearResult> {
        let active = self
            .active
            .ok_or(CoreError::InvalidState("descend without a falling piece"))?;

        let below = active.moved(0, -1, 0);
        if self.fits(&below) {
            self.active = Some(below);
            self.recompute_projected_y();
            return Ok(ClearResult::Falling);
        }

        let cells = active.cells();
        let mut min_y = active.anchor.y;
        let mut max_y = active.anchor.y;
        for cell in cells {
            self.grid.place(cell.x, cell.y)?;
            min_y = min_y.min(cell.y);
            max_y = max_y.max(cell.y);
        }

        let cleared = clear::resolve(&mut self.grid, min_y, max_y);
        self.active = None;
        self.idle_orientation = active.orientation as i32;
        self.idle_anchor = active.anchor;
        Ok(ClearResult::Locked(cleared))
    }

    /// Copy grid and piece state into a snapshot
    pub fn capture(&self) -> Snapshot {
        let cells = self.grid.rows().iter().map(|row| row.to_vec()).collect();
        let (active_kind, orientation, anchor) = match self.active {
            Some(p) => (p.kind.index() as i32, p.orientation as i32, p.anchor),
            None => (ABSENT_PIECE, self.idle_orientation, self.idle_anchor),
        };
        Snapshot {
            cells,
            anchor,
            active_kind,
            next_kind: self.next.map_or(ABSENT_PIECE, |k| k.index() as i32),
            orientation,
        }
    }

    /// Overwrite grid and piece state from a snapshot, then replay every occupied cell
    /// to the listeners.
    ///
    /// The snapshot is validated first; on error nothing is changed.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<()> {
        let restored = snapshot.validate()?;

        self.grid.load_rows(restored.rows);
        self.active = restored.active;
        self.next = restored.next;
        self.idle_orientation = restored.orientation;
        self.idle_anchor = restored.anchor;
        self.recompute_projected_y();
        self.grid.replay_listeners();
        Ok(())
    }

    /// Consume the next piece and generate its replacement.
    ///
    /// When there is no next piece yet (fresh game, or after `clear`) this draws
    /// twice: the first pick is returned and the second becomes the next piece.
    /// Seeded sequences depend on this order.
    fn take_next(&mut self) -> PieceKind {
        loop {
            let previous = self.next;
            let index = self.provider.next_index(PieceKind::COUNT) % PieceKind::COUNT;
            self.next = PieceKind::from_index(index);
            if let Some(kind) = previous {
                return kind;
            }
        }
    }

    fn recompute_projected_y(&mut self) {
        let Some(active) = self.active else {
            return;
        };
        let mut probe = active;
        while self.fits(&probe.moved(0, -1, 0)) {
            probe = probe.moved(0, -1, 0);
        }
        self.projected_y = probe.anchor.y;
    }
}

impl fmt::Debug for Playfield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Playfield")
            .field("grid", &self.grid)
            .field("active", &self.active)
            .field("next", &self.next)
            .field("projected_y", &self.projected_y)
            .field("idle_orientation", &self.idle_orientation)
            .field("idle_anchor", &self.idle_anchor)
            .finish_non_exhaustive()
    }
}
