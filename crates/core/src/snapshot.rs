use crate::block::Block;
use crate::types::{BridgeState, Cell, Coord, Direction};

/// Controller phase without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PhaseKind {
    #[default]
    Idle,
    Rolling,
    Falling,
    Resetting,
    Advancing,
    GameComplete,
}

impl PhaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseKind::Idle => "idle",
            PhaseKind::Rolling => "rolling",
            PhaseKind::Falling => "falling",
            PhaseKind::Resetting => "resetting",
            PhaseKind::Advancing => "advancing",
            PhaseKind::GameComplete => "gameComplete",
        }
    }
}

/// What the block is doing this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Motion {
    #[default]
    Resting,
    /// Tipping from the view's pose towards `to`
    Rolling { direction: Direction, to: Block },
    /// Sinking below the board after leaving it
    Falling,
    /// Dropping through the target hole
    Sinking,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockView {
    pub block: Block,
    /// Animation progress in `[0, 1]`
    pub progress: f32,
    pub motion: Motion,
}

impl Default for BlockView {
    fn default() -> Self {
        Self {
            block: Block::standing(Coord::default()),
            progress: 0.0,
            motion: Motion::Resting,
        }
    }
}

/// One board cell as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    pub coord: Coord,
    pub cell: Cell,
    /// Live open/closed flag for bridge cells
    pub bridge: Option<BridgeState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardView {
    pub rows: u16,
    pub cols: u16,
    /// Row-major
    pub cells: Vec<Cell>,
}

impl BoardView {
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        if coord.row < 0
            || coord.col < 0
            || coord.row >= self.rows as i16
            || coord.col >= self.cols as i16
        {
            return None;
        }
        self.cells
            .get(coord.row as usize * self.cols as usize + coord.col as usize)
            .copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = CellView> + '_ {
        let cols = self.cols.max(1) as usize;
        self.cells.iter().enumerate().map(move |(i, &cell)| CellView {
            coord: Coord::new((i / cols) as i16, (i % cols) as i16),
            cell,
            bridge: cell.bridge_state(),
        })
    }
}

/// Everything a front end needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub level_index: usize,
    pub level_count: usize,
    pub level_name: String,
    pub board: BoardView,
    pub block: BlockView,
    pub phase: PhaseKind,
    pub moves: u32,
    pub falls: u32,
    pub elapsed_ms: u64,
    pub paused: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.level_index = 0;
        self.level_count = 0;
        self.level_name.clear();
        self.board.rows = 0;
        self.board.cols = 0;
        self.board.cells.clear();
        self.block = BlockView::default();
        self.phase = PhaseKind::Idle;
        self.moves = 0;
        self.falls = 0;
        self.elapsed_ms = 0;
        self.paused = false;
    }

    /// Whether the engine would accept a move intent right now
    pub fn accepts_input(&self) -> bool {
        self.phase == PhaseKind::Idle && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            level_index: 0,
            level_count: 0,
            level_name: String::new(),
            board: BoardView::default(),
            block: BlockView::default(),
            phase: PhaseKind::Idle,
            moves: 0,
            falls: 0,
            elapsed_ms: 0,
            paused: false,
        }
    }
}
