//! Bridge latch - edge-triggered switch handling
//!
//! A switch flips its bridges once per landing. Each switch id is `armed`
//! from the landing that flipped it until a resolution arrives whose
//! footprint no longer includes it; repeated requests while armed do nothing.

use std::collections::BTreeSet;

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::{BridgeState, SwitchId, MAX_FOOTPRINT};

/// Bridges flipped by one latch update, with their new state
pub type Flips = ArrayVec<(SwitchId, BridgeState), MAX_FOOTPRINT>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BridgeLatch {
    armed: BTreeSet<SwitchId>,
}

impl BridgeLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self, id: SwitchId) -> bool {
        self.armed.contains(&id)
    }

    pub fn armed(&self) -> impl Iterator<Item = SwitchId> + '_ {
        self.armed.iter().copied()
    }

    /// Feed the switch ids under the block's current footprint.
    ///
    /// Newly pressed ids flip their bridges and arm; ids still pressed stay
    /// armed without flipping; armed ids missing from `pressed` disarm.
    pub fn apply(&mut self, board: &mut Board, pressed: &[SwitchId]) -> Flips {
        self.armed.retain(|id| pressed.contains(id));

        let mut flips = Flips::new();
        for &id in pressed {
            if !self.armed.insert(id) {
                continue;
            }
            if let Some(state) = board.toggle_bridge(id) {
                log::debug!("switch {} turned bridge {:?}", id, state);
                flips.push((id, state));
            }
        }
        flips
    }

    /// Disarm everything (level reset or load)
    pub fn clear(&mut self) {
        self.armed.clear();
    }
}
