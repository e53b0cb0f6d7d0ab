//! Snapshot tests - capture, restore and listener replay

use std::cell::Cell as Counter;
use std::rc::Rc;

use blockfall::core::{CoreError, FixedPiece, Playfield, PieceSequence, Snapshot, ABSENT_PIECE};
use blockfall::types::{PieceKind, MAX_CELL_ID};

fn mid_game() -> Playfield {
    let mut field = Playfield::new(PieceSequence::new(vec![
        PieceKind::L,
        PieceKind::T,
        PieceKind::I,
        PieceKind::S,
        PieceKind::J,
    ]));
    for dx in [-4, 0, 3] {
        assert!(field.spawn());
        field.try_move(dx, 0);
        while !field.descend().unwrap().is_locked() {}
    }
    assert!(field.spawn());
    field.try_move(-1, 1);
    field.descend().unwrap();
    field
}

#[test]
fn test_restore_after_clear_is_exact() {
    let mut field = mid_game();
    let snapshot = field.capture();
    assert!(snapshot.occupied_count() > 0);
    let active = field.active();
    let next = field.next_kind();
    let rows = *field.grid().rows();

    let replayed = Rc::new(Counter::new(0usize));
    let sink = Rc::clone(&replayed);
    field.subscribe(move |_, _| sink.set(sink.get() + 1));

    field.clear();
    assert_eq!(replayed.get(), 0);

    field.restore(&snapshot).unwrap();
    assert_eq!(field.grid().rows(), &rows);
    assert_eq!(field.active(), active);
    assert_eq!(field.next_kind(), next);
    assert_eq!(replayed.get(), snapshot.occupied_count());
    assert_eq!(field.capture(), snapshot);
}

#[test]
fn test_restore_into_fresh_playfield_continues_identically() {
    let mut original = mid_game();
    let snapshot = original.capture();

    let mut copy = Playfield::new(FixedPiece(PieceKind::O));
    copy.restore(&snapshot).unwrap();

    while !original.descend().unwrap().is_locked() {}
    while !copy.descend().unwrap().is_locked() {}
    assert_eq!(original.grid().rows(), copy.grid().rows());
}

#[test]
fn test_fresh_ids_stay_unique_after_restore() {
    let original = mid_game();
    let snapshot = original.capture();
    let max_id = snapshot.cells.iter().flatten().copied().max().unwrap();

    let mut copy = Playfield::new(FixedPiece(PieceKind::O));
    copy.restore(&snapshot).unwrap();
    while !copy.descend().unwrap().is_locked() {}

    let fresh = copy
        .grid()
        .rows()
        .iter()
        .flatten()
        .filter(|&&id| id > max_id)
        .count();
    assert_eq!(fresh, 4);
}

#[test]
fn test_empty_playfield_snapshot() {
    let field = Playfield::with_seed(3);
    let snapshot = field.capture();
    assert_eq!(snapshot, Snapshot::empty());
    assert_eq!(snapshot.active_kind, ABSENT_PIECE);
    assert_eq!(snapshot.next_kind, ABSENT_PIECE);

    let mut other = mid_game();
    other.restore(&snapshot).unwrap();
    assert!(!other.is_falling());
    assert!(other.next_kind().is_none());
    assert_eq!(other.grid().occupied_count(), 0);
}

#[test]
fn test_invalid_snapshot_keeps_prior_state() {
    let mut field = mid_game();
    let before = field.capture();

    let mut bad = before.clone();
    bad.cells.truncate(10);
    assert!(matches!(field.restore(&bad), Err(CoreError::InvalidSnapshot(_))));

    let mut bad = before.clone();
    bad.active_kind = 9;
    assert!(matches!(field.restore(&bad), Err(CoreError::InvalidSnapshot(_))));

    let mut bad = before.clone();
    bad.orientation = 4;
    assert!(matches!(field.restore(&bad), Err(CoreError::InvalidSnapshot(_))));

    assert_eq!(field.capture(), before);
}

#[test]
fn test_snapshot_survives_json() {
    let field = mid_game();
    let snapshot = field.capture();

    let text = serde_json::to_string(&snapshot).unwrap();
    let back: Snapshot = serde_json::from_str(&text).unwrap();
    assert_eq!(back, snapshot);
}

#[test]
fn test_lock_after_restoring_largest_cell_id() {
    let mut snapshot = Snapshot::empty();
    snapshot.cells[5][9] = MAX_CELL_ID;

    let mut field = Playfield::new(FixedPiece(PieceKind::O));
    field.restore(&snapshot).unwrap();
    assert!(field.spawn());
    while !field.descend().unwrap().is_locked() {}

    let mut ids: Vec<u64> = [(4, 0), (5, 0), (4, 1), (5, 1)]
        .iter()
        .map(|&(x, y)| field.cell_at(x, y).unwrap())
        .collect();
    assert!(ids.iter().all(|&id| id != 0 && id != MAX_CELL_ID));
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 4);
    assert_eq!(field.cell_at(9, 5).unwrap(), MAX_CELL_ID);

    // the result is itself a valid checkpoint
    let again = field.capture();
    Playfield::with_seed(1).restore(&again).unwrap();
}

#[test]
fn test_restore_rejects_overflowing_cell_id() {
    let mut field = mid_game();
    let before = field.capture();

    let mut bad = before.clone();
    bad.cells[5][9] = u64::MAX;
    assert!(matches!(field.restore(&bad), Err(CoreError::InvalidSnapshot(_))));
    assert_eq!(field.capture(), before);

    while !field.descend().unwrap().is_locked() {}
}
