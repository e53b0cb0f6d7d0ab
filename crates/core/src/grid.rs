//! Grid module - the playfield occupancy map
//!
//! The grid is a 10x22 array of cell identity tokens. `0` is empty; any other value
//! is an occupied cell whose id is preserved verbatim through collapse and restore.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..21 (bottom to top).
//!
//! The grid also owns the field listener registry. Listeners learn about every cell
//! that transitions from empty to occupied; that is the only channel a presentation
//! layer gets. Row collapse does not notify (observers infer it from the cleared rows).

use std::fmt;

use crate::error::{CoreError, Result};
use crate::types::{Cell, Coordinate, EMPTY_CELL, FIELD_HEIGHT, FIELD_WIDTH, MAX_CELL_ID};

/// One row of cells, indexed by x
pub type Row = [Cell; FIELD_WIDTH];

/// Receives `(x, y)` for every newly occupied cell.
pub trait FieldListener {
    fn put_cell(&mut self, x: i32, y: i32);
}

impl<F: FnMut(i32, i32)> FieldListener for F {
    fn put_cell(&mut self, x: i32, y: i32) {
        self(x, y)
    }
}

/// Registration token returned by [`Grid::subscribe`]; pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerHandle, Box<dyn FieldListener>)>,
}

impl Listeners {
    fn notify(&mut self, x: i32, y: i32) {
        for (_, listener) in self.entries.iter_mut() {
            listener.put_cell(x, y);
        }
    }
}

/// The playfield grid - 10 columns x 22 rows, row-major (`rows[y][x]`)
pub struct Grid {
    rows: [Row; FIELD_HEIGHT],
    /// Last id handed out by [`Grid::place`]
    last_cell_id: Cell,
    listeners: Listeners,
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            rows: [[EMPTY_CELL; FIELD_WIDTH]; FIELD_HEIGHT],
            last_cell_id: 1,
            listeners: Listeners::default(),
        }
    }

    #[inline(always)]
    fn index(x: i32, y: i32) -> Result<(usize, usize)> {
        if Coordinate::new(x, y).in_field() {
            Ok((x as usize, y as usize))
        } else {
            Err(CoreError::OutOfBounds { x, y })
        }
    }

    pub fn width(&self) -> usize {
        FIELD_WIDTH
    }

    pub fn height(&self) -> usize {
        FIELD_HEIGHT
    }

    /// Cell at (x, y)
    pub fn cell_at(&self, x: i32, y: i32) -> Result<Cell> {
        let (x, y) = Self::index(x, y)?;
        Ok(self.rows[y][x])
    }

    /// Overwrite the cell at (x, y).
    ///
    /// Notifies listeners when the cell goes from empty to occupied. Ids above
    /// [`MAX_CELL_ID`] are rejected.
    pub fn set_cell(&mut self, x: i32, y: i32, id: Cell) -> Result<()> {
        let (ux, uy) = Self::index(x, y)?;
        if id > MAX_CELL_ID {
            return Err(CoreError::InvalidCellId(id));
        }
        let was_empty = self.rows[uy][ux] == EMPTY_CELL;
        self.rows[uy][ux] = id;
        self.last_cell_id = self.last_cell_id.max(id);
        if was_empty && id != EMPTY_CELL {
            self.listeners.notify(x, y);
        }
        Ok(())
    }

    /// Occupy (x, y) with a fresh cell id and return it
    pub fn place(&mut self, x: i32, y: i32) -> Result<Cell> {
        Self::index(x, y)?;
        let id = self.fresh_id();
        self.set_cell(x, y, id)?;
        Ok(id)
    }

    /// Next id from the counter; once the counter reaches [`MAX_CELL_ID`], the
    /// smallest id not present on the grid.
    fn fresh_id(&self) -> Cell {
        if self.last_cell_id < MAX_CELL_ID {
            return self.last_cell_id + 1;
        }
        // the grid holds fewer ids than this range, so one is always free
        (EMPTY_CELL + 1..=(FIELD_WIDTH * FIELD_HEIGHT + 1) as Cell)
            .find(|id| !self.rows.iter().flatten().any(|c| c == id))
            .unwrap_or(MAX_CELL_ID)
    }

    /// Check if position is within bounds and empty
    pub fn is_free(&self, x: i32, y: i32) -> bool {
        matches!(self.cell_at(x, y), Ok(EMPTY_CELL))
    }

    /// Check if position is within bounds and occupied
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.cell_at(x, y), Ok(id) if id != EMPTY_CELL)
    }

    /// Check if a row has no empty column. Out-of-range rows are never full.
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| row.iter().all(|&cell| cell != EMPTY_CELL))
    }

    /// All rows, bottom row first
    pub fn rows(&self) -> &[Row; FIELD_HEIGHT] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Row; FIELD_HEIGHT] {
        &mut self.rows
    }

    /// Replace every cell without notifying listeners.
    ///
    /// The id counter continues above the largest restored id so fresh cells stay unique.
    pub(crate) fn load_rows(&mut self, rows: [Row; FIELD_HEIGHT]) {
        self.rows = rows;
        let max_id = rows.iter().flatten().copied().max().unwrap_or(EMPTY_CELL);
        self.last_cell_id = self.last_cell_id.max(max_id);
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|&&cell| cell != EMPTY_CELL)
            .count()
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        for row in self.rows.iter_mut() {
            row.fill(EMPTY_CELL);
        }
    }

    /// Register a closure as field listener
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerHandle
    where
        F: FnMut(i32, i32) + 'static,
    {
        self.subscribe_listener(Box::new(listener))
    }

    /// Register a field listener
    pub fn subscribe_listener(&mut self, listener: Box<dyn FieldListener>) -> ListenerHandle {
        let handle = ListenerHandle(self.listeners.next_id);
        self.listeners.next_id += 1;
        self.listeners.entries.push((handle, listener));
        handle
    }

    /// Deregister a listener. Returns false if the handle was not registered.
    pub fn unsubscribe(&mut self, handle: ListenerHandle) -> bool {
        let before = self.listeners.entries.len();
        self.listeners.entries.retain(|(h, _)| *h != handle);
        self.listeners.entries.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.entries.len()
    }

    /// Emit every occupied cell once to every registered listener
    pub fn replay_listeners(&mut self) {
        for (y, row) in self.rows.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell != EMPTY_CELL {
                    self.listeners.notify(x as i32, y as i32);
                }
            }
        }
    }

    /// Emit every occupied cell once to a single, not necessarily registered, listener
    pub fn replay_into(&self, listener: &mut dyn FieldListener) {
        for (y, row) in self.rows.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell != EMPTY_CELL {
                    listener.put_cell(x as i32, y as i32);
                }
            }
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("rows", &self.rows)
            .field("last_cell_id", &self.last_cell_id)
            .field("listeners", &self.listeners.entries.len())
            .finish()
    }
}
