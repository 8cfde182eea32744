//! Terminal front end for the puzzle.
//!
//! Renders controller snapshots into a character framebuffer and flushes it to
//! the terminal with crossterm. No widget toolkit: each board cell is drawn as
//! two columns so tiles come out roughly square.
//!
//! - [`fb`]: framebuffer, glyphs and styles
//! - [`game_view`]: snapshot to framebuffer (pure, unit-testable)
//! - [`renderer`]: raw-mode screen session with diffed presents

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use bloxorz_core as core;
pub use bloxorz_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{format_clock, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, Screen};
