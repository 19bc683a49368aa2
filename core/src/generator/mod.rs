use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Places the mines of a game on the first move, keeping `start` safe.
pub trait MineGenerator {
    fn generate(&mut self, board: &mut Board, config: &GameConfig, start: Coord2) -> Result<()>;
}
