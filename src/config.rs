//! Runtime configuration for the terminal game.
//!
//! Values come from `BLOXORZ_*` environment variables, then command-line flags
//! override them.

use std::env;
use std::fs::File;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use bloxorz_core::{LevelCatalog, Timing};
use bloxorz_types::{ROLL_DEGREES, ROLL_STEP_DEGREES};

/// Command-line flags. Each one overrides its environment variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(name = "bloxorz", about = "Roll the block into the hole")]
pub struct Args {
    /// Level to start on, counting from 1
    #[arg(long)]
    pub level: Option<NonZeroUsize>,

    /// JSON file with the level catalog
    #[arg(long)]
    pub levels: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Zero-based index of the first level to play
    pub start_level: usize,
    /// JSON level catalog; the built-in levels when unset
    pub levels_path: Option<PathBuf>,
    /// Roll animation speed in degrees per frame
    pub roll_step_degrees: u32,
    /// Log file; logging stays off when unset (the terminal is in raw mode)
    pub log_path: Option<PathBuf>,
    /// `env_logger` filter directives
    pub log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start_level: 0,
            levels_path: None,
            roll_step_degrees: ROLL_STEP_DEGREES,
            log_path: None,
            log_filter: "info".to_string(),
        }
    }
}

impl GameConfig {
    /// Read the `BLOXORZ_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Unparsable numbers fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let start_level = non_empty("BLOXORZ_START_LEVEL")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.start_level);
        let roll_step_degrees = non_empty("BLOXORZ_ROLL_STEP")
            .and_then(|s| s.parse::<u32>().ok())
            .map(|d| d.clamp(1, ROLL_DEGREES))
            .unwrap_or(defaults.roll_step_degrees);

        Self {
            start_level,
            levels_path: non_empty("BLOXORZ_LEVELS_PATH").map(PathBuf::from),
            roll_step_degrees,
            log_path: non_empty("BLOXORZ_LOG_PATH").map(PathBuf::from),
            log_filter: non_empty("BLOXORZ_LOG").unwrap_or(defaults.log_filter),
        }
    }

    /// Overlay command-line flags on top of this config
    pub fn with_args(mut self, args: Args) -> Self {
        if let Some(level) = args.level {
            self.start_level = level.get() - 1;
        }
        if let Some(path) = args.levels {
            self.levels_path = Some(path);
        }
        self
    }

    pub fn timing(&self) -> Timing {
        Timing::default().with_roll_step(self.roll_step_degrees)
    }

    /// The configured catalog, falling back to the built-in levels
    pub fn load_catalog(&self) -> Result<LevelCatalog> {
        let Some(path) = &self.levels_path else {
            return Ok(LevelCatalog::builtin());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading level catalog {}", path.display()))?;
        let catalog = LevelCatalog::from_json(&json)
            .with_context(|| format!("parsing level catalog {}", path.display()))?;
        log::info!("loaded {} levels from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Install the file logger if a log path is configured
    pub fn init_logging(&self) -> Result<()> {
        let Some(path) = &self.log_path else {
            return Ok(());
        };
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        env_logger::Builder::new()
            .parse_filters(&self.log_filter)
            .target(env_logger::Target::Pipe(Box::new(file)))
            .try_init()
            .context("installing logger")?;
        Ok(())
    }
}
