#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use render::*;
pub use tile::*;
pub use types::*;

mod board;
mod engine;
mod error;
mod generator;
mod render;
mod tile;
mod types;

/// Most mines a game can hold, the first touched cell always stays safe.
pub const MAX_MINES: CellCount = TOTAL_CELLS - 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(mines: CellCount) -> Self {
        Self { mines }
    }

    pub fn new(mines: CellCount) -> Result<Self> {
        if mines > MAX_MINES {
            log::warn!("Requested {} mines but the grid fits {}", mines, MAX_MINES);
            return Err(GameError::TooManyMines { max: MAX_MINES });
        }
        Ok(Self::new_unchecked(mines))
    }

    pub const fn total_cells(&self) -> CellCount {
        TOTAL_CELLS
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        TOTAL_CELLS - self.mines
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    Marked,
    Unmarked,
    Won,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}
