//! Board module - the grid of tiles a level is played on
//!
//! Cells are stored row-major in a flat vector sized to the level.
//! Coordinates are `(row, col)`; anything outside `0..rows` x `0..cols` is
//! off the board and behaves like `Empty` for support checks.
//!
//! Bridge cells are owned by the [`SwitchMap`]: the grid never changes a
//! bridge's state except through [`Board::set_bridge_state`], which rewrites
//! every cell wired to that switch id at once.

use std::collections::BTreeMap;

use crate::error::{BoardError, LevelError};
use crate::types::{BridgeState, Cell, Coord, SwitchId, Weight};

/// Largest supported side length for a board
pub const MAX_BOARD_SIDE: usize = 128;

/// Bridge cells bound to one switch id, plus their shared state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wire {
    cells: Vec<Coord>,
    state: BridgeState,
}

impl Wire {
    /// Bridge coordinates in row-major order
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn state(&self) -> BridgeState {
        self.state
    }
}

/// Switch id -> bridge wiring, built once per level
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SwitchMap {
    wires: BTreeMap<SwitchId, Wire>,
}

impl SwitchMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn bind(&mut self, id: SwitchId, coord: Coord) {
        self.wires
            .entry(id)
            .or_insert_with(|| Wire {
                cells: Vec::new(),
                state: BridgeState::Closed,
            })
            .cells
            .push(coord);
    }

    pub fn get(&self, id: SwitchId) -> Option<&Wire> {
        self.wires.get(&id)
    }

    /// Switch ids that own at least one bridge cell, ascending
    pub fn ids(&self) -> impl Iterator<Item = SwitchId> + '_ {
        self.wires.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.wires.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wires.is_empty()
    }
}

/// The playing field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: u16,
    cols: u16,
    /// Row-major (row * cols + col)
    cells: Vec<Cell>,
    switches: SwitchMap,
}

impl Board {
    /// Build a board from rows of cells.
    ///
    /// Every bridge cell is registered in the switch map and forced `Closed`.
    /// Switch and bridge ids must lie in `1..=MAX_SWITCH_ID`.
    pub fn from_cells(grid: Vec<Vec<Cell>>) -> Result<Self, LevelError> {
        let Some(first) = grid.first() else {
            return Err(LevelError::Empty);
        };
        let cols = first.len();
        if cols == 0 {
            return Err(LevelError::Empty);
        }
        if grid.len() > MAX_BOARD_SIDE || cols > MAX_BOARD_SIDE {
            return Err(LevelError::TooLarge {
                max: MAX_BOARD_SIDE,
            });
        }

        let mut cells = Vec::with_capacity(grid.len() * cols);
        let mut switches = SwitchMap::new();
        for (row, line) in grid.iter().enumerate() {
            if line.len() != cols {
                return Err(LevelError::RaggedRow {
                    row,
                    expected: cols,
                    found: line.len(),
                });
            }
            for (col, &cell) in line.iter().enumerate() {
                if let Cell::Switch(id) | Cell::Bridge { id, .. } = cell {
                    if !id.is_valid() {
                        return Err(LevelError::BadSwitchId { id, row, col });
                    }
                }
                let cell = match cell {
                    Cell::Bridge { id, .. } => {
                        switches.bind(id, Coord::new(row as i16, col as i16));
                        Cell::Bridge {
                            id,
                            state: BridgeState::Closed,
                        }
                    }
                    other => other,
                };
                cells.push(cell);
            }
        }

        Ok(Self {
            rows: grid.len() as u16,
            cols: cols as u16,
            cells,
            switches,
        })
    }

    #[inline(always)]
    fn index(&self, coord: Coord) -> Option<usize> {
        if self.is_out_of_bounds(coord) {
            return None;
        }
        Some(coord.row as usize * self.cols as usize + coord.col as usize)
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn is_out_of_bounds(&self, coord: Coord) -> bool {
        coord.row < 0
            || coord.col < 0
            || coord.row >= self.rows as i16
            || coord.col >= self.cols as i16
    }

    /// Cell at `coord`, or `OutOfBounds` off the grid
    pub fn cell_at(&self, coord: Coord) -> Result<Cell, BoardError> {
        self.index(coord)
            .map(|idx| self.cells[idx])
            .ok_or(BoardError::OutOfBounds {
                coord,
                rows: self.rows,
                cols: self.cols,
            })
    }

    /// Cell at `coord`, with off-board positions reading as `Empty`
    pub fn cell_or_empty(&self, coord: Coord) -> Cell {
        self.cell_at(coord).unwrap_or(Cell::Empty)
    }

    /// Whether the cell at `coord` can hold the block under `weight`.
    ///
    /// Floor, switches and open bridges always hold; fragile tiles only
    /// under partial weight; the target only under full weight. Empty cells,
    /// closed bridges and off-board positions never hold.
    pub fn is_supporting(&self, coord: Coord, weight: Weight) -> bool {
        self.cell_or_empty(coord).supports(weight)
    }

    pub fn switch_map(&self) -> &SwitchMap {
        &self.switches
    }

    pub fn bridge_state(&self, id: SwitchId) -> Option<BridgeState> {
        self.switches.get(id).map(Wire::state)
    }

    /// Open or close every bridge cell wired to `id`.
    ///
    /// Returns `true` when the state actually changed; setting the current
    /// state again is a no-op. Unknown ids return `false`.
    pub fn set_bridge_state(&mut self, id: SwitchId, state: BridgeState) -> bool {
        let Some(wire) = self.switches.wires.get_mut(&id) else {
            return false;
        };
        if wire.state == state {
            return false;
        }
        wire.state = state;

        let cols = self.cols as usize;
        for coord in &wire.cells {
            let idx = coord.row as usize * cols + coord.col as usize;
            self.cells[idx] = Cell::Bridge { id, state };
        }
        true
    }

    /// Flip the bridges wired to `id`, returning the new state
    pub fn toggle_bridge(&mut self, id: SwitchId) -> Option<BridgeState> {
        let next = self.bridge_state(id)?.toggled();
        self.set_bridge_state(id, next);
        Some(next)
    }

    /// Put every bridge back into its initial `Closed` state
    pub fn close_all_bridges(&mut self) {
        let ids: Vec<SwitchId> = self.switches.ids().collect();
        for id in ids {
            self.set_bridge_state(id, BridgeState::Closed);
        }
    }

    /// Row-major slice of all cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate `(coord, cell)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        let cols = self.cols as usize;
        self.cells.iter().enumerate().map(move |(i, &cell)| {
            (Coord::new((i / cols) as i16, (i % cols) as i16), cell)
        })
    }

    /// First coordinate holding `cell`, row-major
    pub fn find(&self, cell: Cell) -> Option<Coord> {
        self.iter().find(|&(_, c)| c == cell).map(|(coord, _)| coord)
    }
}
