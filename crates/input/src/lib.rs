//! Terminal input mapping.
//!
//! Translates `crossterm` key events into [`crate::types::GameAction`]s. Rolls
//! are discrete, so there is no key-repeat handling: one press is one intent,
//! and intents the engine is not ready for are simply dropped by it.

pub mod map;

pub use bloxorz_types as types;

pub use map::{handle_key_event, should_quit};
