//! Board tests - support rules, bounds and bridge wiring

use bloxorz::core::{Board, BoardError, LevelError};
use bloxorz::types::{BridgeState, Cell, Coord, SwitchId, Weight};

fn bridge(id: u8) -> Cell {
    Cell::Bridge {
        id: SwitchId(id),
        state: BridgeState::Open,
    }
}

fn board() -> Board {
    Board::from_cells(vec![
        vec![Cell::Floor, Cell::Switch(SwitchId(1)), Cell::Target],
        vec![Cell::Fragile, bridge(1), bridge(1)],
    ])
    .unwrap()
}

#[test]
fn test_board_dimensions() {
    let b = board();
    assert_eq!(b.rows(), 2);
    assert_eq!(b.cols(), 3);
    assert_eq!(b.cells().len(), 6);
}

#[test]
fn test_cell_at_out_of_bounds_is_error() {
    let b = board();
    for coord in [
        Coord::new(-1, 0),
        Coord::new(0, -1),
        Coord::new(2, 0),
        Coord::new(0, 3),
    ] {
        assert!(b.is_out_of_bounds(coord));
        assert_eq!(
            b.cell_at(coord),
            Err(BoardError::OutOfBounds {
                coord,
                rows: 2,
                cols: 3
            })
        );
        // Resolution treats the outside as a gap.
        assert_eq!(b.cell_or_empty(coord), Cell::Empty);
        assert!(!b.is_supporting(coord, Weight::Partial));
    }
}

#[test]
fn test_bridges_load_closed_regardless_of_input_state() {
    let b = board();
    assert_eq!(b.bridge_state(SwitchId(1)), Some(BridgeState::Closed));
    assert_eq!(
        b.cell_at(Coord::new(1, 1)).unwrap(),
        Cell::Bridge {
            id: SwitchId(1),
            state: BridgeState::Closed
        }
    );
    let wire = b.switch_map().get(SwitchId(1)).unwrap();
    assert_eq!(wire.cells(), &[Coord::new(1, 1), Coord::new(1, 2)]);
}

#[test]
fn test_support_table() {
    let b = board();
    let cases = [
        (Coord::new(0, 0), true, true),   // floor
        (Coord::new(0, 1), true, true),   // switch
        (Coord::new(0, 2), true, false),  // target: standing only
        (Coord::new(1, 0), false, true),  // fragile: lying only
        (Coord::new(1, 1), false, false), // closed bridge
    ];
    for (coord, full, partial) in cases {
        assert_eq!(b.is_supporting(coord, Weight::Full), full, "{}", coord);
        assert_eq!(b.is_supporting(coord, Weight::Partial), partial, "{}", coord);
    }
}

#[test]
fn test_set_bridge_state_rewrites_every_wired_cell() {
    let mut b = board();
    assert!(b.set_bridge_state(SwitchId(1), BridgeState::Open));
    for col in 1..=2 {
        assert!(b.is_supporting(Coord::new(1, col), Weight::Full));
    }

    // Same state again is a no-op.
    assert!(!b.set_bridge_state(SwitchId(1), BridgeState::Open));
    assert_eq!(b.bridge_state(SwitchId(1)), Some(BridgeState::Open));

    // Unknown switch ids change nothing.
    assert!(!b.set_bridge_state(SwitchId(7), BridgeState::Open));
    assert_eq!(b.bridge_state(SwitchId(7)), None);
}

#[test]
fn test_toggle_and_close_all() {
    let mut b = board();
    assert_eq!(b.toggle_bridge(SwitchId(1)), Some(BridgeState::Open));
    assert_eq!(b.toggle_bridge(SwitchId(1)), Some(BridgeState::Closed));
    b.toggle_bridge(SwitchId(1));
    b.close_all_bridges();
    assert_eq!(b, board());
}

#[test]
fn test_find_and_iter_are_row_major() {
    let b = board();
    assert_eq!(b.find(Cell::Target), Some(Coord::new(0, 2)));
    assert_eq!(b.find(Cell::Fragile), Some(Coord::new(1, 0)));
    let coords: Vec<Coord> = b.iter().map(|(c, _)| c).collect();
    assert_eq!(coords[3], Coord::new(1, 0));
}

#[test]
fn test_malformed_grids_are_rejected() {
    assert_eq!(Board::from_cells(vec![]), Err(LevelError::Empty));
    assert_eq!(Board::from_cells(vec![vec![]]), Err(LevelError::Empty));
    assert_eq!(
        Board::from_cells(vec![vec![Cell::Floor; 2], vec![Cell::Floor]]),
        Err(LevelError::RaggedRow {
            row: 1,
            expected: 2,
            found: 1
        })
    );
    assert!(matches!(
        Board::from_cells(vec![vec![Cell::Floor; 129]]),
        Err(LevelError::TooLarge { .. })
    ));
}

#[test]
fn test_switch_ids_outside_glyph_range_are_rejected() {
    assert_eq!(
        Board::from_cells(vec![vec![Cell::Floor, Cell::Switch(SwitchId(0))]]),
        Err(LevelError::BadSwitchId {
            id: SwitchId(0),
            row: 0,
            col: 1
        })
    );
    assert_eq!(
        Board::from_cells(vec![vec![Cell::Floor], vec![bridge(10)]]),
        Err(LevelError::BadSwitchId {
            id: SwitchId(10),
            row: 1,
            col: 0
        })
    );
    assert!(Board::from_cells(vec![vec![Cell::Switch(SwitchId(9)), bridge(9)]]).is_ok());
}
