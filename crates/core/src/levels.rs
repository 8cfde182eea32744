//! Level catalog - board layouts, switch wiring and start poses
//!
//! Levels are written as rows of glyphs (see [`Cell::from_glyph`]) plus `S`
//! for the start tile, a floor cell where the block starts standing. The
//! switch map is derived from the bridge letters.
//!
//! ```text
//! ###.......
//! #S####....     S  start        #  floor      T  target
//! #########.     ~  fragile      1-9  switch   a-i  bridge of switch 1-9
//! .#########     .  empty
//! .....##T##
//! ......###.
//! ```
//!
//! A catalog is either the built-in set or a JSON array of
//! `{"name": ..., "rows": [...]}` objects.

use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::board::Board;
use crate::error::{CatalogError, LevelError};
use crate::types::{Cell, Coord, SwitchId};

/// Serialized form of a level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDef {
    pub name: String,
    pub rows: Vec<String>,
}

impl LevelDef {
    pub fn new(name: &str, rows: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            rows: rows.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// A parsed, validated level. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    name: String,
    board: Board,
    start: Block,
}

impl Level {
    pub fn parse(def: &LevelDef) -> Result<Self, LevelError> {
        if def.rows.is_empty() {
            return Err(LevelError::Empty);
        }

        let expected = def.rows[0].chars().count();
        let mut start: Option<Coord> = None;
        let mut grid = Vec::with_capacity(def.rows.len());

        for (row, text) in def.rows.iter().enumerate() {
            let found = text.chars().count();
            if found != expected {
                return Err(LevelError::RaggedRow {
                    row,
                    expected,
                    found,
                });
            }

            let mut line = Vec::with_capacity(found);
            for (col, ch) in text.chars().enumerate() {
                let cell = if ch == 'S' {
                    let here = Coord::new(row as i16, col as i16);
                    if start.replace(here).is_some() {
                        return Err(LevelError::DuplicateStart(here));
                    }
                    Cell::Floor
                } else {
                    Cell::from_glyph(ch).ok_or(LevelError::UnknownTile { row, col, ch })?
                };
                line.push(cell);
            }
            grid.push(line);
        }

        let start = start.ok_or(LevelError::MissingStart)?;
        let board = Board::from_cells(grid)?;

        if board.find(Cell::Target).is_none() {
            return Err(LevelError::MissingTarget);
        }

        let level = Self {
            name: def.name.clone(),
            board,
            start: Block::standing(start),
        };
        let switches = level.switch_ids();
        for id in level.board.switch_map().ids() {
            if switches.binary_search(&id).is_err() {
                return Err(LevelError::OrphanBridge(id));
            }
        }
        Ok(level)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Initial board (every bridge closed)
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn start(&self) -> Block {
        self.start
    }

    /// Switch ids present on the board, ascending
    pub fn switch_ids(&self) -> Vec<SwitchId> {
        let mut ids: Vec<SwitchId> = self
            .board
            .cells()
            .iter()
            .filter_map(|c| match c {
                Cell::Switch(id) => Some(*id),
                _ => None,
            })
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }
}

/// Ordered sequence of levels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    pub fn from_defs(defs: &[LevelDef]) -> Result<Self, CatalogError> {
        if defs.is_empty() {
            return Err(CatalogError::Empty);
        }
        let levels = defs
            .iter()
            .enumerate()
            .map(|(index, def)| {
                Level::parse(def).map_err(|source| CatalogError::Level {
                    index,
                    name: def.name.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { levels })
    }

    /// Parse a JSON array of level definitions
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let defs: Vec<LevelDef> = serde_json::from_str(json)?;
        Self::from_defs(&defs)
    }

    /// The levels compiled into the game
    pub fn builtin() -> Self {
        let levels = builtin_defs()
            .iter()
            .filter_map(|def| match Level::parse(def) {
                Ok(level) => Some(level),
                Err(err) => {
                    log::error!("built-in level {:?} is invalid: {}", def.name, err);
                    None
                }
            })
            .collect();
        Self { levels }
    }

    pub fn get(&self, index: usize) -> Result<&Level, CatalogError> {
        self.levels.get(index).ok_or(CatalogError::NoSuchLevel {
            index,
            count: self.levels.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Definitions of the built-in levels
pub fn builtin_defs() -> Vec<LevelDef> {
    vec![
        LevelDef::new(
            "Welcome",
            &[
                "###.......",
                "#S####....",
                "#########.",
                ".#########",
                ".....##T##",
                "......###.",
            ],
        ),
        LevelDef::new(
            "Switchback",
            &[
                "######..####",
                "#S#1##..#T##",
                "######aa####",
                "######..####",
            ],
        ),
        LevelDef::new(
            "Thin Ice",
            &[
                "###...........",
                "#S##~#~#~#~###",
                "###~#~#~#~#~T#",
                "...........###",
            ],
        ),
        LevelDef::new(
            "Relay",
            &[
                "######..####..####",
                "#S#1##aa##2#bb##T#",
                "######..####..####",
            ],
        ),
    ]
}
