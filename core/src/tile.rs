use serde::{Deserialize, Serialize};

pub const HIDDEN_GLYPH: char = '.';
pub const MARKED_GLYPH: char = '*';

/// Value held by a touched board cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    /// Mine placed by the generator, indistinguishable from a hidden cell.
    UnexploredMine,
    /// Revealed cell without adjacent mines.
    Free,
    /// Revealed cell with 1 to 8 adjacent mines.
    Near(u8),
    /// Mine uncovered once the game is lost.
    ExplodedMine,
}

impl CellValue {
    /// Classifies a freshly revealed safe cell by its adjacent mine count.
    ///
    /// A cell has at most 8 neighbours, any larger count is a broken board.
    pub const fn from_adjacent(count: u8) -> Self {
        match count {
            0 => Self::Free,
            1..=8 => Self::Near(count),
            _ => panic!("adjacent mine count out of range"),
        }
    }

    pub const fn has_mine(self) -> bool {
        matches!(self, Self::UnexploredMine | Self::ExplodedMine)
    }

    pub const fn glyph(self) -> char {
        match self {
            Self::UnexploredMine => HIDDEN_GLYPH,
            Self::Free => '/',
            Self::Near(count) => (b'0' + count) as char,
            Self::ExplodedMine => 'X',
        }
    }
}

/// Player-visible state of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Marked,
    Revealed(CellValue),
}

impl CellState {
    pub const fn glyph(self) -> char {
        match self {
            Self::Hidden => HIDDEN_GLYPH,
            Self::Marked => MARKED_GLYPH,
            Self::Revealed(value) => value.glyph(),
        }
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}
