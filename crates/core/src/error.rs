//! Error types for the rules engine.

use thiserror::Error;

use crate::types::{Coord, Direction, Orientation, SwitchId};

/// Board queries outside the grid.
///
/// Resolution treats this as an unsupported cell; it never reaches the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("coordinate {coord} is outside the {rows}x{cols} board")]
    OutOfBounds { coord: Coord, rows: u16, cols: u16 },
}

/// Faults in the block state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The roll produced extents that match no orientation. The transition
    /// function is total for valid dimensions, so this is a logic fault.
    #[error("no orientation results from rolling {orientation:?} {direction:?}")]
    InvalidTransition {
        orientation: Orientation,
        direction: Direction,
    },

    #[error("invalid block dimensions {short_span}x{long_span}")]
    InvalidDimensions { short_span: u8, long_span: u8 },
}

/// Malformed level text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("level has no rows")]
    Empty,

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown tile {ch:?} at row {row}, column {col}")]
    UnknownTile { row: usize, col: usize, ch: char },

    #[error("level has no start tile 'S'")]
    MissingStart,

    #[error("second start tile at {0}")]
    DuplicateStart(Coord),

    #[error("level has no target tile 'T'")]
    MissingTarget,

    #[error("bridge {0} has no switch")]
    OrphanBridge(SwitchId),

    #[error("switch id {id} at row {row}, column {col} is out of range")]
    BadSwitchId { id: SwitchId, row: usize, col: usize },

    #[error("level is larger than {max}x{max}")]
    TooLarge { max: usize },
}

/// Failures while building or querying a level catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Requested index past the end of the catalog. The controller turns this
    /// into the terminal `GameComplete` phase.
    #[error("no level {index} (catalog has {count})")]
    NoSuchLevel { index: usize, count: usize },

    #[error("catalog contains no levels")]
    Empty,

    #[error("level {index} ({name}): {source}")]
    Level {
        index: usize,
        name: String,
        #[source]
        source: LevelError,
    },

    #[error("invalid level catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}
