//! Playfield tests - spawn, motion, gravity and locking

use std::cell::RefCell;
use std::rc::Rc;

use blockfall::core::{catalog, ClearResult, CoreError, FixedPiece, Playfield, PieceSequence};
use blockfall::types::{Coordinate, PieceKind, FIELD_HEIGHT, FIELD_WIDTH};

fn drop_at(field: &mut Playfield, dx: i32) -> ClearResult {
    assert!(field.spawn());
    assert!(field.try_move(dx, 0), "shift by {} should fit", dx);
    loop {
        let result = field.descend().unwrap();
        if result.is_locked() {
            return result;
        }
    }
}

#[test]
fn test_o_piece_falls_to_floor_and_locks() {
    let mut field = Playfield::new(FixedPiece(PieceKind::O));
    assert!(field.spawn());
    assert_eq!(field.active().unwrap().anchor(), Coordinate::new(5, 19));
    assert!(field.can_descend().unwrap());

    for step in 0..19 {
        assert_eq!(field.descend().unwrap(), ClearResult::Falling, "step {}", step);
    }
    assert!(!field.can_descend().unwrap());

    let result = field.descend().unwrap();
    assert_eq!(result, ClearResult::Locked(Default::default()));
    assert!(!field.is_falling());

    for (x, y) in [(4, 0), (5, 0), (4, 1), (5, 1)] {
        assert_ne!(field.cell_at(x, y).unwrap(), 0, "cell ({}, {})", x, y);
    }
    assert_eq!(field.grid().occupied_count(), 4);
}

#[test]
fn test_five_o_pieces_clear_bottom_two_rows() {
    let mut field = Playfield::new(FixedPiece(PieceKind::O));

    for dx in [-4, -2, 0, 2] {
        let result = drop_at(&mut field, dx);
        assert!(result.cleared_rows().is_empty());
    }
    assert_eq!(field.grid().occupied_count(), 16);

    let result = drop_at(&mut field, 4);
    assert_eq!(result.cleared_rows(), &[0, 1]);

    for y in 0..FIELD_HEIGHT as i32 {
        for x in 0..FIELD_WIDTH as i32 {
            assert_eq!(field.cell_at(x, y).unwrap(), 0, "cell ({}, {})", x, y);
        }
    }
}

#[test]
fn test_cell_ids_are_unique_and_increasing() {
    let mut field = Playfield::new(FixedPiece(PieceKind::I));
    drop_at(&mut field, -3);

    let mut sorted: Vec<u64> = (0..4).map(|x| field.cell_at(x, 0).unwrap()).collect();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), 4);
    assert!(sorted[0] >= 2);
}

#[test]
fn test_spawn_is_idempotent_while_falling() {
    let mut field = Playfield::new(PieceSequence::new(vec![PieceKind::S, PieceKind::Z, PieceKind::L]));
    assert!(field.spawn());
    let active = field.active();
    let next = field.next_kind();

    for _ in 0..5 {
        assert!(field.spawn());
    }
    assert_eq!(field.active(), active);
    assert_eq!(field.next_kind(), next);
}

#[test]
fn test_rotation_cycles_back_for_every_kind() {
    for kind in PieceKind::ALL {
        let mut field = Playfield::new(FixedPiece(kind));
        assert!(field.spawn(), "{:?} should spawn on an empty grid", kind);
        for _ in 0..5 {
            field.descend().unwrap();
        }
        let start = field.active().unwrap();

        let count = catalog::orientation_count(kind) as i32;
        for _ in 0..count {
            assert!(field.try_move(0, 1), "{:?} should rotate in open space", kind);
        }
        assert_eq!(field.active().unwrap(), start, "{:?}", kind);

        assert!(field.try_move(0, -count));
        assert_eq!(field.active().unwrap(), start, "{:?}", kind);
    }
}

#[test]
fn test_blocked_move_leaves_state_unchanged() {
    let mut field = Playfield::new(FixedPiece(PieceKind::T));
    field.spawn();
    // the second T orientation needs (5, 18)
    field.set_cell(5, 18, 7).unwrap();
    let before = field.capture();

    assert!(!field.try_move(-20, 0));
    assert!(!field.try_move(0, 1));
    assert_eq!(field.capture(), before);

    // the same rotation one column to the right is clear
    assert!(field.try_move(1, 1));
    assert_eq!(field.active().unwrap().orientation(), 1);
}

#[test]
fn test_projected_cells_sit_on_the_floor() {
    let mut field = Playfield::new(FixedPiece(PieceKind::O));
    field.spawn();
    let ghost = field.projected_cells().unwrap();
    assert!(ghost.iter().any(|c| c.y == 0));
    assert_eq!(field.projected_y(), Some(0));

    drop_at(&mut field, 0);
    field.spawn();
    assert_eq!(field.projected_y(), Some(2));
}

#[test]
fn test_clear_resets_everything() {
    let mut field = Playfield::with_seed(5);
    drop_at(&mut field, 0);
    field.spawn();

    field.clear();
    assert!(!field.is_falling());
    assert!(field.next_kind().is_none());
    assert_eq!(field.grid().occupied_count(), 0);
    assert!(matches!(field.descend(), Err(CoreError::InvalidState(_))));
}

#[test]
fn test_out_of_bounds_access() {
    let mut field = Playfield::with_seed(1);
    assert_eq!(
        field.cell_at(-1, 0),
        Err(CoreError::OutOfBounds { x: -1, y: 0 })
    );
    assert!(field.cell_at(0, FIELD_HEIGHT as i32).is_err());
    assert!(field.set_cell(FIELD_WIDTH as i32, 0, 3).is_err());
}

#[test]
fn test_listeners_see_locked_cells() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut field = Playfield::new(FixedPiece(PieceKind::O));
    let handle = field.subscribe(move |x, y| sink.borrow_mut().push((x, y)));

    field.spawn();
    // falling does not touch the grid
    field.descend().unwrap();
    assert!(seen.borrow().is_empty());

    drop_at(&mut field, -4);
    let mut cells = seen.borrow().clone();
    cells.sort_unstable();
    assert_eq!(cells, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);

    assert!(field.unsubscribe(handle));
    assert!(!field.unsubscribe(handle));
    drop_at(&mut field, 0);
    assert_eq!(seen.borrow().len(), 4);
}

#[test]
fn test_seeded_games_are_deterministic() {
    let play = |seed: u32| {
        let mut field = Playfield::with_seed(seed);
        let mut kinds = Vec::new();
        for _ in 0..8 {
            if !field.spawn() {
                break;
            }
            kinds.push(field.active().unwrap().kind());
            while !field.descend().unwrap().is_locked() {}
        }
        (kinds, field.capture())
    };

    assert_eq!(play(2024), play(2024));
}
