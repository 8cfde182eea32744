//! Core rules engine - pure, deterministic, and testable
//!
//! This crate contains the board, the rolling block, move resolution, the
//! switch/bridge latch and the level controller. It has **no dependencies**
//! on terminals, windows or input devices: a front end feeds it move intents
//! and draws the snapshots it returns.
//!
//! # Module Structure
//!
//! - [`levels`]: level text format, built-in catalog and JSON catalogs
//! - [`board`]: grid of cells, support queries, bridge wiring
//! - [`block`]: block pose, footprint and the roll transition
//! - [`resolve`]: safe / fall / win decision for a tentative pose
//! - [`latch`]: edge-triggered switch handling
//! - [`controller`]: session ownership and the frame-driven phase machine
//! - [`snapshot`]: render-facing views of the controller state
//!
//! # Game Rules
//!
//! - **Floor**, **switches** and **open bridges** hold the block in any orientation
//! - **Fragile** tiles break under a standing block; a lying block may rest on
//!   them as long as part of it is on something sturdier
//! - The **target** is a hole that only takes a standing block: that wins the level
//! - Anything else (gaps, closed bridges, off the board) is a fall and restarts the level
//! - A switch flips its bridges once each time the block lands on it
//!
//! # Example
//!
//! ```
//! use bloxorz_core::{LevelCatalog, LevelController};
//! use bloxorz_types::Direction;
//!
//! let mut game = LevelController::new(LevelCatalog::builtin(), 0).unwrap();
//!
//! // Roll right and let the animation play out.
//! game.submit_move(Direction::Right).unwrap();
//! while !game.is_idle() {
//!     game.tick(16);
//! }
//!
//! assert_eq!(game.move_count(), 1);
//! ```
//!
//! # Timing
//!
//! The controller advances one animation step per call to
//! [`LevelController::tick`](controller::LevelController::tick) (or
//! [`advance`](controller::LevelController::advance)), independent of wall-clock
//! time; the elapsed milliseconds passed in only feed the session clock.

pub mod block;
pub mod board;
pub mod controller;
pub mod error;
pub mod latch;
pub mod levels;
pub mod resolve;
pub mod snapshot;

pub use bloxorz_types as types;

// Re-export commonly used types for convenience
pub use block::{Block, BlockDims, Footprint};
pub use board::{Board, SwitchMap, Wire};
pub use controller::{LevelController, Phase, Session, Timing};
pub use error::{BoardError, CatalogError, EngineError, LevelError};
pub use latch::BridgeLatch;
pub use levels::{Level, LevelCatalog, LevelDef};
pub use resolve::{resolve, Outcome, Resolution, ToggleRequests};
pub use snapshot::{BlockView, BoardView, CellView, GameSnapshot, Motion, PhaseKind};
