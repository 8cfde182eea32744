//! Bloxorz (workspace facade crate).
//!
//! The rules engine, input mapping and terminal front end live in dedicated
//! crates under `crates/`; this package re-exports them as
//! `bloxorz::{core,input,term,types}` and owns the runtime configuration.

pub mod config;

pub use bloxorz_core as core;
pub use bloxorz_input as input;
pub use bloxorz_term as term;
pub use bloxorz_types as types;

pub use config::{Args, GameConfig};
