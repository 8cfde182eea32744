//! Shared vocabulary for the rolling-block puzzle.
//!
//! Every type here is plain data with no external dependencies so it can be
//! used from the rules engine, the terminal front end and the input mapping
//! alike.
//!
//! # Coordinates
//!
//! Boards are addressed as `(row, col)`:
//!
//! - **row** grows downwards (`Up` decreases it, `Down` increases it)
//! - **col** grows to the right (`Left` decreases it, `Right` increases it)
//!
//! Coordinates are signed so a block rolled past the board edge still has a
//! well-defined (out-of-bounds) position.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval of the terminal runner (~60 FPS) |
//! | `ROLL_DEGREES` | 90 | Angular distance of one roll |
//! | `ROLL_STEP_DEGREES` | 10 | Default per-frame roll increment |
//! | `FALL_FRAMES` | 24 | Frames spent sinking below the board after a fall |
//! | `ADVANCE_FRAMES` | 36 | Frames spent dropping into the target before the next level |
//!
//! # Examples
//!
//! ```
//! use bloxorz_types::{Cell, Coord, Direction, GameAction, SwitchId};
//!
//! let origin = Coord::new(2, 3);
//! assert_eq!(origin.step(Direction::Right, 2), Coord::new(2, 5));
//!
//! assert_eq!(Direction::from_str("north"), Some(Direction::Up));
//! assert_eq!(Direction::Up.opposite(), Direction::Down);
//!
//! assert_eq!(Cell::from_glyph('3'), Some(Cell::Switch(SwitchId(3))));
//! assert_eq!(GameAction::from_str("rollLeft"), Some(GameAction::Roll(Direction::Left)));
//! ```

use std::fmt;

/// Frame interval of the terminal runner in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Angular distance covered by one roll
pub const ROLL_DEGREES: u32 = 90;

/// Default roll animation increment per frame
pub const ROLL_STEP_DEGREES: u32 = 10;

/// Frames the block spends sinking after leaving the board
pub const FALL_FRAMES: u32 = 24;

/// Frames the block spends dropping through the target hole
pub const ADVANCE_FRAMES: u32 = 36;

/// Side length of the block's square face, in cells
pub const DEFAULT_SHORT_SPAN: u8 = 1;

/// Length of the block's long edge, in cells
pub const DEFAULT_LONG_SPAN: u8 = 2;

/// Upper bound on the number of cells a block footprint may cover
pub const MAX_FOOTPRINT: usize = 8;

/// Highest switch id a level may use (`1`..=`9` in level text)
pub const MAX_SWITCH_ID: u8 = 9;


/// A board coordinate as `(row, col)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coord {
    pub row: i16,
    pub col: i16,
}

impl Coord {
    pub const fn new(row: i16, col: i16) -> Self {
        Self { row, col }
    }

    /// Offset by raw row/column deltas
    pub const fn offset(self, d_row: i16, d_col: i16) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Move `distance` cells in `direction`
    pub fn step(self, direction: Direction, distance: i16) -> Self {
        let (dr, dc) = direction.delta();
        self.offset(dr * distance, dc * distance)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Roll direction, aligned to the two grid axes
///
/// - **Up**: North, towards row 0
/// - **Down**: South
/// - **Left**: West, towards column 0
/// - **Right**: East
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit `(row, col)` delta
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// True for moves along the column axis (`Left`/`Right`)
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// True when the move increases the coordinate on its axis
    pub fn is_forward(&self) -> bool {
        matches!(self, Direction::Down | Direction::Right)
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Parse direction from string
    ///
    /// Accepts screen names or compass names (case-insensitive):
    /// "up" | "north" | "n", "down" | "south" | "s",
    /// "left" | "west" | "w", "right" | "east" | "e"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "north" | "n" => Some(Direction::Up),
            "down" | "south" | "s" => Some(Direction::Down),
            "left" | "west" | "w" => Some(Direction::Left),
            "right" | "east" | "e" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Block orientation
///
/// - **Standing**: upright on its square face, one cell footprint
/// - **LyingX**: flat with the long edge along a row (spans columns)
/// - **LyingZ**: flat with the long edge along a column (spans rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Standing,
    LyingX,
    LyingZ,
}

impl Orientation {
    pub const ALL: [Orientation; 3] = [
        Orientation::Standing,
        Orientation::LyingX,
        Orientation::LyingZ,
    ];

    pub fn is_lying(&self) -> bool {
        !matches!(self, Orientation::Standing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Standing => "standing",
            Orientation::LyingX => "lyingX",
            Orientation::LyingZ => "lyingZ",
        }
    }
}

/// Identifier binding a switch tile to its bridge cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SwitchId(pub u8);

impl SwitchId {
    /// Ids that have a level-text glyph (`1..=MAX_SWITCH_ID`)
    pub fn is_valid(self) -> bool {
        (1..=MAX_SWITCH_ID).contains(&self.0)
    }
}

impl fmt::Display for SwitchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Live state of a bridge: `Open` bears weight like floor, `Closed` is a gap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BridgeState {
    Open,
    #[default]
    Closed,
}

impl BridgeState {
    pub fn toggled(self) -> Self {
        match self {
            BridgeState::Open => BridgeState::Closed,
            BridgeState::Closed => BridgeState::Open,
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, BridgeState::Open)
    }
}

/// How much of the block's weight a single footprint cell has to carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    /// Standing block: one cell carries everything
    Full,
    /// Lying block: weight is shared across the footprint
    Partial,
}

/// A board tile
///
/// Level text glyphs:
///
/// | Glyph | Cell |
/// |-------|------|
/// | `.` or ` ` | `Empty` |
/// | `#` | `Floor` |
/// | `T` | `Target` |
/// | `~` | `Fragile` |
/// | `1`..`9` | `Switch(id)` |
/// | `a`..`i` | `Bridge { id, Closed }` (`a` belongs to switch 1) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Floor,
    Target,
    Fragile,
    Switch(SwitchId),
    Bridge { id: SwitchId, state: BridgeState },
}

impl Cell {
    /// Parse a level-text glyph. Bridges always start `Closed`.
    pub fn from_glyph(ch: char) -> Option<Self> {
        match ch {
            '.' | ' ' => Some(Cell::Empty),
            '#' => Some(Cell::Floor),
            'T' => Some(Cell::Target),
            '~' => Some(Cell::Fragile),
            '1'..='9' => Some(Cell::Switch(SwitchId(ch as u8 - b'0'))),
            'a'..='i' => Some(Cell::Bridge {
                id: SwitchId(ch as u8 - b'a' + 1),
                state: BridgeState::Closed,
            }),
            _ => None,
        }
    }

    /// Level-text glyph for this cell (bridge state is not encoded).
    /// Switches and bridges with an id outside `1..=MAX_SWITCH_ID` map to `?`.
    pub fn glyph(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Floor => '#',
            Cell::Target => 'T',
            Cell::Fragile => '~',
            Cell::Switch(id) if id.is_valid() => (b'0' + id.0) as char,
            Cell::Bridge { id, .. } if id.is_valid() => (b'a' + id.0 - 1) as char,
            Cell::Switch(_) | Cell::Bridge { .. } => '?',
        }
    }

    /// Bridge state if this is a bridge cell
    pub fn bridge_state(&self) -> Option<BridgeState> {
        match self {
            Cell::Bridge { state, .. } => Some(*state),
            _ => None,
        }
    }

    /// Whether the cell can hold the block under the given weight
    pub fn supports(&self, weight: Weight) -> bool {
        match self {
            Cell::Floor | Cell::Switch(_) => true,
            Cell::Bridge { state, .. } => state.is_open(),
            Cell::Fragile => weight == Weight::Partial,
            Cell::Target => weight == Weight::Full,
            Cell::Empty => false,
        }
    }
}

/// Abstract actions the front end feeds into the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Roll the block one step
    Roll(Direction),
    /// Put the block back on the start tile of the current level
    Restart,
    /// Toggle pause state
    Pause,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use bloxorz_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("rollUp"), Some(GameAction::Roll(Direction::Up)));
    /// assert_eq!(GameAction::from_str("restart"), Some(GameAction::Restart));
    /// assert_eq!(GameAction::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rollup" => Some(GameAction::Roll(Direction::Up)),
            "rolldown" => Some(GameAction::Roll(Direction::Down)),
            "rollleft" => Some(GameAction::Roll(Direction::Left)),
            "rollright" => Some(GameAction::Roll(Direction::Right)),
            "restart" => Some(GameAction::Restart),
            "pause" => Some(GameAction::Pause),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Roll(Direction::Up) => "rollUp",
            GameAction::Roll(Direction::Down) => "rollDown",
            GameAction::Roll(Direction::Left) => "rollLeft",
            GameAction::Roll(Direction::Right) => "rollRight",
            GameAction::Restart => "restart",
            GameAction::Pause => "pause",
        }
    }
}
