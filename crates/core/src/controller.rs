//! Level controller - owns the session and drives it frame by frame
//!
//! The controller is the single mutator of board, block and latch state.
//! A move intent is validated up front: the tentative pose is resolved
//! against the board the moment the intent is accepted, and the roll
//! animation that follows only decides *when* the outcome is applied.
//!
//! ```text
//! Idle --intent--> Rolling --done--> Idle        (Safe: commit pose, apply switches)
//!                          \-------> Falling --> Resetting --> Idle
//!                           \------> Advancing --> Idle (next level) | GameComplete
//! ```
//!
//! Intents arriving outside `Idle` (or while paused) are dropped; there is
//! no input queue. Call [`LevelController::advance`] once per frame.

use crate::block::Block;
use crate::board::Board;
use crate::error::{CatalogError, EngineError};
use crate::latch::BridgeLatch;
use crate::levels::{Level, LevelCatalog};
use crate::resolve::{resolve, Outcome, Resolution};
use crate::snapshot::{BlockView, GameSnapshot, Motion, PhaseKind};
use crate::types::{
    Direction, GameAction, ADVANCE_FRAMES, FALL_FRAMES, ROLL_DEGREES, ROLL_STEP_DEGREES,
};

/// Animation pacing, in frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Degrees the roll advances per frame (1..=90)
    pub roll_step_degrees: u32,
    /// Frames from leaving the board to the reset
    pub fall_frames: u32,
    /// Frames from dropping into the target to the next level
    pub advance_frames: u32,
}

impl Timing {
    pub fn with_roll_step(mut self, degrees: u32) -> Self {
        self.roll_step_degrees = degrees.clamp(1, ROLL_DEGREES);
        self
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            roll_step_degrees: ROLL_STEP_DEGREES,
            fall_frames: FALL_FRAMES,
            advance_frames: ADVANCE_FRAMES,
        }
    }
}

/// Controller state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Rolling {
        direction: Direction,
        from: Block,
        to: Block,
        degrees: u32,
        resolution: Resolution,
    },
    Falling {
        pose: Block,
        frame: u32,
    },
    Resetting {
        pose: Block,
    },
    Advancing {
        pose: Block,
        frame: u32,
    },
    GameComplete,
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Idle => PhaseKind::Idle,
            Phase::Rolling { .. } => PhaseKind::Rolling,
            Phase::Falling { .. } => PhaseKind::Falling,
            Phase::Resetting { .. } => PhaseKind::Resetting,
            Phase::Advancing { .. } => PhaseKind::Advancing,
            Phase::GameComplete => PhaseKind::GameComplete,
        }
    }
}

/// Mutable per-level state, re-derived from the level on reset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    level_index: usize,
    board: Board,
    block: Block,
    latch: BridgeLatch,
}

impl Session {
    fn start(level_index: usize, level: &Level) -> Self {
        Self {
            level_index,
            board: level.board().clone(),
            block: level.start(),
            latch: BridgeLatch::new(),
        }
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn block(&self) -> Block {
        self.block
    }

    pub fn latch(&self) -> &BridgeLatch {
        &self.latch
    }
}

#[derive(Debug, Clone)]
pub struct LevelController {
    catalog: LevelCatalog,
    timing: Timing,
    session: Session,
    phase: Phase,
    moves: u32,
    falls: u32,
    elapsed_ms: u64,
    paused: bool,
}

impl LevelController {
    /// Start a session on level `start_level` of `catalog`
    pub fn new(catalog: LevelCatalog, start_level: usize) -> Result<Self, CatalogError> {
        Self::with_timing(catalog, start_level, Timing::default())
    }

    /// Like [`new`](Self::new) with custom pacing. The roll step is clamped
    /// to `1..=90` so every roll finishes.
    pub fn with_timing(
        catalog: LevelCatalog,
        start_level: usize,
        timing: Timing,
    ) -> Result<Self, CatalogError> {
        let timing = timing.with_roll_step(timing.roll_step_degrees);
        if catalog.is_empty() {
            return Err(CatalogError::Empty);
        }
        let level = catalog.get(start_level)?;
        log::info!("starting level {} ({})", start_level, level.name());
        let session = Session::start(start_level, level);

        Ok(Self {
            catalog,
            timing,
            session,
            phase: Phase::Idle,
            moves: 0,
            falls: 0,
            elapsed_ms: 0,
            paused: false,
        })
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    pub fn is_game_complete(&self) -> bool {
        matches!(self.phase, Phase::GameComplete)
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn current_board(&self) -> &Board {
        &self.session.board
    }

    pub fn current_level_index(&self) -> usize {
        self.session.level_index
    }

    pub fn current_level(&self) -> Option<&Level> {
        self.catalog.get(self.session.level_index).ok()
    }

    pub fn move_count(&self) -> u32 {
        self.moves
    }

    pub fn fall_count(&self) -> u32 {
        self.falls
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Block pose as it should be drawn this frame
    pub fn current_block_pose(&self) -> BlockView {
        match &self.phase {
            Phase::Idle => BlockView {
                block: self.session.block,
                progress: 0.0,
                motion: Motion::Resting,
            },
            Phase::Rolling {
                direction,
                from,
                to,
                degrees,
                ..
            } => BlockView {
                block: *from,
                progress: ratio(*degrees, ROLL_DEGREES),
                motion: Motion::Rolling {
                    direction: *direction,
                    to: *to,
                },
            },
            Phase::Falling { pose, frame } => BlockView {
                block: *pose,
                progress: ratio(*frame, self.timing.fall_frames),
                motion: Motion::Falling,
            },
            Phase::Resetting { pose } => BlockView {
                block: *pose,
                progress: 1.0,
                motion: Motion::Falling,
            },
            Phase::Advancing { pose, frame } => BlockView {
                block: *pose,
                progress: ratio(*frame, self.timing.advance_frames),
                motion: Motion::Sinking,
            },
            Phase::GameComplete => BlockView {
                block: self.session.block,
                progress: 1.0,
                motion: Motion::Sinking,
            },
        }
    }

    /// Accept a roll intent.
    ///
    /// Returns `Ok(false)` when the intent is dropped (not idle, or paused).
    /// The move counter increments for every accepted intent, whatever its
    /// outcome.
    pub fn submit_move(&mut self, direction: Direction) -> Result<bool, EngineError> {
        if self.paused || !self.is_idle() {
            log::trace!("dropping {:?} intent during {:?}", direction, self.phase.kind());
            return Ok(false);
        }

        let from = self.session.block;
        let to = from.roll(direction)?;
        let resolution = resolve(&self.session.board, &to);

        self.moves = self.moves.saturating_add(1);
        self.phase = Phase::Rolling {
            direction,
            from,
            to,
            degrees: 0,
            resolution,
        };
        Ok(true)
    }

    /// Put the block back on the start tile. Only honoured while idle.
    pub fn restart_level(&mut self) -> bool {
        if self.paused || !self.is_idle() {
            return false;
        }
        log::debug!("restarting level {}", self.session.level_index);
        self.reset_session();
        true
    }

    pub fn toggle_pause(&mut self) {
        if self.is_game_complete() {
            return;
        }
        self.paused = !self.paused;
    }

    /// Apply an abstract action
    pub fn apply_action(&mut self, action: GameAction) -> Result<bool, EngineError> {
        match action {
            GameAction::Roll(direction) => self.submit_move(direction),
            GameAction::Restart => Ok(self.restart_level()),
            GameAction::Pause => {
                self.toggle_pause();
                Ok(true)
            }
        }
    }

    /// One frame: accept an optional intent, advance the animation by one
    /// step and return the state to render.
    pub fn advance(
        &mut self,
        elapsed_ms: u32,
        intent: Option<Direction>,
    ) -> Result<GameSnapshot, EngineError> {
        if let Some(direction) = intent {
            self.submit_move(direction)?;
        }
        self.tick(elapsed_ms);
        Ok(self.snapshot())
    }

    /// Advance timers and animations by one frame
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.paused || self.is_game_complete() {
            return;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms as u64);
        self.step();
    }

    fn step(&mut self) {
        match &mut self.phase {
            Phase::Idle | Phase::GameComplete => {}
            Phase::Rolling { degrees, .. } => {
                *degrees = (*degrees + self.timing.roll_step_degrees).min(ROLL_DEGREES);
                if *degrees >= ROLL_DEGREES {
                    self.finish_roll();
                }
            }
            Phase::Falling { pose, frame } => {
                *frame += 1;
                if *frame >= self.timing.fall_frames {
                    self.phase = Phase::Resetting { pose: *pose };
                }
            }
            Phase::Resetting { .. } => {
                self.reset_session();
            }
            Phase::Advancing { frame, .. } => {
                *frame += 1;
                if *frame >= self.timing.advance_frames {
                    self.load_level(self.session.level_index + 1);
                }
            }
        }
    }

    fn finish_roll(&mut self) {
        let Phase::Rolling { to, resolution, .. } =
            std::mem::replace(&mut self.phase, Phase::Idle)
        else {
            return;
        };

        match resolution.outcome {
            Outcome::Safe(pose) => {
                self.session.block = pose;
                self.session
                    .latch
                    .apply(&mut self.session.board, &resolution.toggles);
            }
            Outcome::Fall => {
                self.falls = self.falls.saturating_add(1);
                log::debug!("block fell at {} ({:?})", to.anchor, to.orientation);
                self.phase = Phase::Falling { pose: to, frame: 0 };
            }
            Outcome::Win => {
                log::info!(
                    "level {} complete after {} moves",
                    self.session.level_index,
                    self.moves
                );
                self.session.block = to;
                self.phase = Phase::Advancing { pose: to, frame: 0 };
            }
        }
    }

    fn reset_session(&mut self) {
        if let Ok(level) = self.catalog.get(self.session.level_index) {
            self.session.board = level.board().clone();
            self.session.block = level.start();
        }
        self.session.latch.clear();
        self.phase = Phase::Idle;
    }

    fn load_level(&mut self, index: usize) {
        match self.catalog.get(index) {
            Ok(level) => {
                log::info!("starting level {} ({})", index, level.name());
                self.session = Session::start(index, level);
                self.phase = Phase::Idle;
            }
            Err(err) => {
                log::info!("game complete: {}", err);
                self.phase = Phase::GameComplete;
            }
        }
    }

    /// Write the current state into `out`, reusing its allocations
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let board = &self.session.board;
        out.level_index = self.session.level_index;
        out.level_count = self.catalog.len();
        out.level_name.clear();
        if let Some(level) = self.current_level() {
            out.level_name.push_str(level.name());
        }
        out.board.rows = board.rows();
        out.board.cols = board.cols();
        out.board.cells.clear();
        out.board.cells.extend_from_slice(board.cells());
        out.block = self.current_block_pose();
        out.phase = self.phase.kind();
        out.moves = self.moves;
        out.falls = self.falls;
        out.elapsed_ms = self.elapsed_ms;
        out.paused = self.paused;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

fn ratio(num: u32, den: u32) -> f32 {
    if den == 0 {
        return 1.0;
    }
    (num as f32 / den as f32).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LevelDef;
    use crate::types::{BridgeState, Coord, Orientation, SwitchId};

    fn controller(rows: &[&str]) -> LevelController {
        let catalog = LevelCatalog::from_defs(&[LevelDef::new("test", rows)]).unwrap();
        LevelController::new(catalog, 0).unwrap()
    }

    fn settle(c: &mut LevelController) {
        for _ in 0..1000 {
            if c.is_idle() || c.is_game_complete() {
                return;
            }
            c.tick(16);
        }
        panic!("controller never settled: {:?}", c.phase());
    }

    #[test]
    fn new_controller_starts_idle_on_start_tile() {
        let c = controller(&["S#T"]);
        assert!(c.is_idle());
        assert_eq!(c.current_block_pose().block.anchor, Coord::new(0, 0));
        assert_eq!(c.move_count(), 0);
    }

    #[test]
    fn roll_takes_nine_frames_at_default_step() {
        let mut c = controller(&["S###T"]);
        assert!(c.submit_move(Direction::Right).unwrap());
        for _ in 0..8 {
            c.tick(16);
            assert_eq!(c.phase().kind(), PhaseKind::Rolling);
        }
        c.tick(16);
        assert!(c.is_idle());
        let pose = c.current_block_pose().block;
        assert_eq!(pose.orientation, Orientation::LyingX);
        assert_eq!(pose.anchor, Coord::new(0, 1));
    }

    #[test]
    fn intents_are_dropped_while_rolling() {
        let mut c = controller(&["S#####T"]);
        assert!(c.submit_move(Direction::Right).unwrap());
        assert!(!c.submit_move(Direction::Right).unwrap());
        assert_eq!(c.move_count(), 1);
    }

    #[test]
    fn paused_controller_ignores_ticks_and_intents() {
        let mut c = controller(&["S###T"]);
        c.toggle_pause();
        assert!(!c.submit_move(Direction::Right).unwrap());
        c.tick(16);
        assert_eq!(c.elapsed_ms(), 0);
        c.toggle_pause();
        c.tick(16);
        assert_eq!(c.elapsed_ms(), 16);
    }

    #[test]
    fn fall_resets_to_start_and_keeps_move_count() {
        let mut c = controller(&["S#.T"]);
        c.submit_move(Direction::Left).unwrap();
        settle(&mut c);
        assert_eq!(c.current_block_pose().block, Block::standing(Coord::new(0, 0)));
        assert_eq!(c.move_count(), 1);
        assert_eq!(c.fall_count(), 1);
    }

    #[test]
    fn switch_opens_bridge_and_reset_closes_it() {
        let mut c = controller(&["S#1.", "####", "##aT"]);
        // Right: lying on (0,1)-(0,2), pressing switch 1.
        c.submit_move(Direction::Right).unwrap();
        settle(&mut c);
        assert_eq!(c.current_board().bridge_state(SwitchId(1)), Some(BridgeState::Open));
        assert!(c.session().latch().is_armed(SwitchId(1)));

        // Up: off the board, fall and reset.
        c.submit_move(Direction::Up).unwrap();
        settle(&mut c);
        assert_eq!(c.current_board().bridge_state(SwitchId(1)), Some(BridgeState::Closed));
        assert!(!c.session().latch().is_armed(SwitchId(1)));
    }

    #[test]
    fn winning_last_level_completes_game() {
        let mut c = controller(&["S##T"]);
        c.submit_move(Direction::Right).unwrap();
        settle(&mut c);
        c.submit_move(Direction::Right).unwrap();
        settle(&mut c);
        assert!(c.is_game_complete());
        assert_eq!(c.phase().kind(), PhaseKind::GameComplete);

        // Time stops once the catalog is exhausted.
        let t = c.elapsed_ms();
        c.tick(16);
        assert_eq!(c.elapsed_ms(), t);
    }

    #[test]
    fn lying_across_the_target_falls() {
        let mut c = controller(&["S#T"]);
        c.submit_move(Direction::Right).unwrap();
        settle(&mut c);
        assert_eq!(c.fall_count(), 1);
        assert!(c.is_idle());
    }

    #[test]
    fn zero_roll_step_still_finishes_the_roll() {
        let catalog = LevelCatalog::from_defs(&[LevelDef::new("test", &["S###T"])]).unwrap();
        let timing = Timing {
            roll_step_degrees: 0,
            ..Timing::default()
        };
        let mut c = LevelController::with_timing(catalog, 0, timing).unwrap();
        assert_eq!(c.timing().roll_step_degrees, 1);

        c.submit_move(Direction::Right).unwrap();
        for _ in 0..ROLL_DEGREES {
            c.tick(16);
        }
        assert!(c.is_idle());
        assert!(c.submit_move(Direction::Right).unwrap());
    }

    #[test]
    fn oversized_roll_step_is_one_frame() {
        let catalog = LevelCatalog::from_defs(&[LevelDef::new("test", &["S###T"])]).unwrap();
        let timing = Timing {
            roll_step_degrees: 1_000,
            ..Timing::default()
        };
        let mut c = LevelController::with_timing(catalog, 0, timing).unwrap();
        c.submit_move(Direction::Right).unwrap();
        c.tick(16);
        assert!(c.is_idle());
    }

    #[test]
    fn restart_only_from_idle() {
        let mut c = controller(&["S###T"]);
        c.submit_move(Direction::Right).unwrap();
        assert!(!c.restart_level());
        settle(&mut c);
        assert!(c.restart_level());
        assert_eq!(c.current_block_pose().block, Block::standing(Coord::new(0, 0)));
        assert_eq!(c.fall_count(), 0);
    }
}
