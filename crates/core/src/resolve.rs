//! Move resolution - decides what happens when a block lands on a pose
//!
//! Resolution looks at the tentative pose's footprint on the board and
//! produces an [`Outcome`] plus the switch ids under the footprint. Switch
//! requests are only reported for `Safe` and `Win`; a falling block presses
//! nothing.

use arrayvec::ArrayVec;

use crate::block::Block;
use crate::board::Board;
use crate::types::{Cell, SwitchId, Weight, MAX_FOOTPRINT};

/// Switch ids pressed by a landing, in footprint order, without duplicates
pub type ToggleRequests = ArrayVec<SwitchId, MAX_FOOTPRINT>;

/// Result of landing on a pose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The board holds the block at this pose
    Safe(Block),
    /// At least one footprint cell cannot hold the block
    Fall,
    /// The block stands upright in the target hole
    Win,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: Outcome,
    pub toggles: ToggleRequests,
}

impl Resolution {
    fn fall() -> Self {
        Self {
            outcome: Outcome::Fall,
            toggles: ToggleRequests::new(),
        }
    }

    pub fn is_fall(&self) -> bool {
        matches!(self.outcome, Outcome::Fall)
    }

    pub fn is_win(&self) -> bool {
        matches!(self.outcome, Outcome::Win)
    }
}

/// Evaluate `pose` against `board`.
///
/// Off-board cells count as `Empty`.
pub fn resolve(board: &Board, pose: &Block) -> Resolution {
    let footprint = pose.footprint();
    let mut cells: ArrayVec<Cell, MAX_FOOTPRINT> = ArrayVec::new();
    for &coord in &footprint {
        cells.push(board.cell_or_empty(coord));
    }

    let outcome = if pose.orientation.is_lying() {
        resolve_lying(&cells, pose)
    } else {
        resolve_standing(&cells, pose)
    };

    if matches!(outcome, Outcome::Fall) {
        return Resolution::fall();
    }

    let mut toggles = ToggleRequests::new();
    for cell in &cells {
        if let Cell::Switch(id) = *cell {
            if !toggles.contains(&id) {
                toggles.push(id);
            }
        }
    }

    Resolution { outcome, toggles }
}

fn resolve_standing(cells: &[Cell], pose: &Block) -> Outcome {
    if !cells.iter().all(|c| c.supports(Weight::Full)) {
        return Outcome::Fall;
    }
    let targets = cells.iter().filter(|c| **c == Cell::Target).count();
    if targets == cells.len() {
        Outcome::Win
    } else if targets > 0 {
        // The hole only swallows a block that fits it exactly.
        Outcome::Fall
    } else {
        Outcome::Safe(*pose)
    }
}

fn resolve_lying(cells: &[Cell], pose: &Block) -> Outcome {
    if !cells.iter().all(|c| c.supports(Weight::Partial)) {
        return Outcome::Fall;
    }
    if cells.iter().all(|c| *c == Cell::Fragile) {
        return Outcome::Fall;
    }
    Outcome::Safe(*pose)
}
