use alloc::vec::Vec;

use super::*;

/// Places a predetermined set of mines, used for replays and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineGenerator {
    mines: Vec<Coord2>,
}

impl FixedMineGenerator {
    pub fn new(mines: impl IntoIterator<Item = Coord2>) -> Self {
        Self {
            mines: mines.into_iter().collect(),
        }
    }
}

impl MineGenerator for FixedMineGenerator {
    fn generate(&mut self, board: &mut Board, config: &GameConfig, start: Coord2) -> Result<()> {
        for &coords in &self.mines {
            if coords == start {
                log::warn!("Fixed mine at {:?} is the starting cell, skipped", coords);
                continue;
            }
            board.place_mine_at(coords)?;
        }

        // double check mine count
        let count = board.mine_count();
        if count != config.mines {
            log::warn!(
                "Fixed layout mine count mismatch, actual: {}, requested: {}",
                count,
                config.mines
            );
        }
        Ok(())
    }
}
