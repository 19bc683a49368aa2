use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Purely random placement, only the starting cell is guaranteed to be safe.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator {
    seed: u64,
    rng: SmallRng,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(&mut self, board: &mut Board, config: &GameConfig, start: Coord2) -> Result<()> {
        log::debug!(
            "Placing {} mines with seed {}, keeping {:?} safe",
            config.mines,
            self.seed,
            start
        );
        board.place_mines(config.mines, start, &mut self.rng)
    }
}
