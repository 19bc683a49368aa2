use alloc::collections::VecDeque;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Ready,
    Active,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Ready
    }
}

/// One game from the mine-count prompt to its end.
///
/// Mines are placed lazily by `G` on the first command so the first cell the
/// player touches is never a mine.
#[derive(Clone, Debug)]
pub struct PlayEngine<G = RandomMineGenerator> {
    config: GameConfig,
    board: Board,
    marks: HashSet<Coord2>,
    generator: G,
    pending_generation: bool,
    state: EngineState,
    triggered_mine: Option<Coord2>,
}

impl<G: MineGenerator> PlayEngine<G> {
    pub fn new(config: GameConfig, generator: G) -> Self {
        Self {
            config,
            board: Board::new(),
            marks: HashSet::new(),
            generator,
            pending_generation: true,
            state: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn mark_count(&self) -> usize {
        self.marks.len()
    }

    pub fn is_marked(&self, coords: Coord2) -> bool {
        self.marks.contains(&coords)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_at(&self, coords: Coord2) -> CellState {
        if self.is_marked(coords) {
            return CellState::Marked;
        }

        match self.board.get(coords) {
            None | Some(CellValue::UnexploredMine) => CellState::Hidden,
            Some(value) => CellState::Revealed(value),
        }
    }

    /// Claims a cell as free, cascading over cells without adjacent mines.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = validate_coords(coords)?;
        self.check_not_finished()?;
        self.ensure_generated(coords)?;

        let outcome = self.reveal_cell(coords);
        if outcome == RevealOutcome::HitMine {
            self.lose(coords);
            return Ok(outcome);
        }

        Ok(if self.evaluate() {
            RevealOutcome::Won
        } else {
            outcome
        })
    }

    /// Sets or clears a mine mark. Revealed cells can be marked too.
    pub fn toggle_mark(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = validate_coords(coords)?;
        self.check_not_finished()?;
        self.ensure_generated(coords)?;

        let outcome = if self.marks.remove(&coords) {
            MarkOutcome::Unmarked
        } else {
            self.marks.insert(coords);
            MarkOutcome::Marked
        };
        log::debug!("{:?} at {:?}, {} marks set", outcome, coords, self.marks.len());

        Ok(if self.evaluate() {
            MarkOutcome::Won
        } else {
            outcome
        })
    }

    /// Whether exactly the mines are marked.
    pub fn all_mines_marked(&self) -> bool {
        if self.marks.len() != usize::from(self.config.mines) {
            return false;
        }
        self.marks.iter().all(|&coords| self.board.has_mine(coords))
    }

    /// Whether every cell is touched, which means every safe cell is revealed.
    pub fn all_cells_explored(&self) -> bool {
        self.board.is_fully_touched()
    }

    pub fn check_win(&self) -> bool {
        self.all_mines_marked() || self.all_cells_explored()
    }

    pub fn summary(&self) -> GameSummary {
        let mines = self.board.mine_count();
        let revealed = self.board.touched_count() - mines;
        let correct_marks = self
            .marks
            .iter()
            .filter(|&&coords| self.board.has_mine(coords))
            .count();

        GameSummary {
            state: self.state,
            mines: self.config.mines,
            revealed,
            marks: self.marks.len(),
            correct_marks,
            triggered_mine: self.triggered_mine,
        }
    }

    fn ensure_generated(&mut self, start: Coord2) -> Result<()> {
        if !self.pending_generation {
            return Ok(());
        }

        self.generator
            .generate(&mut self.board, &self.config, start)?;
        self.pending_generation = false;
        self.state = EngineState::Active;
        Ok(())
    }

    fn reveal_cell(&mut self, coords: Coord2) -> RevealOutcome {
        if self.board.has_mine(coords) {
            return RevealOutcome::HitMine;
        }

        let already_revealed = self.board.contains(coords);
        let value = self.board.classify(coords);
        self.board.set(coords, value);
        let unmarked = self.marks.remove(&coords);
        log::debug!("Reveal cell at {:?}, value: {:?}", coords, value);

        if value == CellValue::Free {
            let mut to_visit: VecDeque<_> = iter_neighbors(coords)
                .filter(|&pos| !self.board.contains(pos))
                .collect();
            log::trace!("Starting flood-fill from {:?}, initial neighbors: {:?}", coords, to_visit);

            while let Some(visit_coords) = to_visit.pop_front() {
                if self.board.contains(visit_coords) {
                    continue;
                }

                let visit_value = self.board.classify(visit_coords);
                self.board.set(visit_coords, visit_value);
                self.marks.remove(&visit_coords);
                log::trace!("Flood revealed cell at {:?}, value: {:?}", visit_coords, visit_value);

                if visit_value == CellValue::Free {
                    to_visit.extend(
                        iter_neighbors(visit_coords).filter(|&pos| !self.board.contains(pos)),
                    );
                }
            }
        }

        if already_revealed && !unmarked {
            RevealOutcome::NoChange
        } else {
            RevealOutcome::Revealed
        }
    }

    fn evaluate(&mut self) -> bool {
        let won = self.check_win();
        if won {
            log::debug!(
                "Game won, marked: {}, explored: {}",
                self.all_mines_marked(),
                self.all_cells_explored()
            );
            self.state = EngineState::Won;
        }
        won
    }

    fn lose(&mut self, coords: Coord2) {
        log::debug!("Stepped on the mine at {:?}", coords);
        self.triggered_mine = Some(coords);
        self.board.explode_mines();
        self.state = EngineState::Lost;
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

fn validate_coords(coords: Coord2) -> Result<Coord2> {
    if is_valid_coords(coords) {
        Ok(coords)
    } else {
        Err(GameError::InvalidCoords)
    }
}

/// End-of-game report, logged by front ends.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub state: EngineState,
    pub mines: CellCount,
    pub revealed: CellCount,
    pub marks: usize,
    pub correct_marks: usize,
    pub triggered_mine: Option<Coord2>,
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    fn engine(mines: &[Coord2]) -> PlayEngine<FixedMineGenerator> {
        let config = GameConfig::new(mines.len().try_into().unwrap()).unwrap();
        PlayEngine::new(config, FixedMineGenerator::new(mines.iter().copied()))
    }

    /// Mines on the whole third column.
    fn walled_engine() -> PlayEngine<FixedMineGenerator> {
        let wall: alloc::vec::Vec<_> = (0..LIMIT).map(|row| (row, 2)).collect();
        engine(&wall)
    }

    #[test]
    fn first_command_places_mines_away_from_it() {
        let mut engine = engine(&[(8, 8)]);
        assert!(engine.state().is_ready());
        assert_eq!(engine.board().touched_count(), 0);

        engine.toggle_mark((3, 3)).unwrap();

        assert_eq!(engine.state(), EngineState::Active);
        assert!(engine.board().has_mine((8, 8)));
    }

    #[test]
    fn single_mine_cascade_explores_whole_grid() {
        let mut engine = engine(&[(8, 8)]);

        let outcome = engine.reveal((0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::Won);
        assert_eq!(engine.state(), EngineState::Won);
        assert!(engine.all_cells_explored());
        assert_eq!(engine.cell_at((0, 0)), CellState::Revealed(CellValue::Free));
        assert_eq!(engine.cell_at((7, 7)), CellState::Revealed(CellValue::Near(1)));
        assert_eq!(engine.cell_at((8, 7)), CellState::Revealed(CellValue::Near(1)));
        assert_eq!(engine.cell_at((8, 8)), CellState::Hidden);
    }

    #[test]
    fn cascade_stops_at_numbered_border() {
        let mut engine = walled_engine();

        assert_eq!(engine.reveal((4, 0)).unwrap(), RevealOutcome::Revealed);

        for row in 0..LIMIT {
            assert_eq!(engine.cell_at((row, 0)), CellState::Revealed(CellValue::Free));
            let expected = if row == 0 || row == 8 { 2 } else { 3 };
            assert_eq!(
                engine.cell_at((row, 1)),
                CellState::Revealed(CellValue::Near(expected))
            );
            for column in 2..LIMIT {
                assert_eq!(engine.cell_at((row, column)), CellState::Hidden);
            }
        }
        // 9 mines plus two revealed columns
        assert_eq!(engine.board().touched_count(), 27);
        assert_eq!(engine.state(), EngineState::Active);
    }

    #[test]
    fn numbered_cell_does_not_cascade() {
        let mut engine = walled_engine();

        engine.reveal((4, 3)).unwrap();

        assert_eq!(engine.cell_at((4, 3)), CellState::Revealed(CellValue::Near(3)));
        assert_eq!(engine.board().touched_count(), 10);
    }

    #[test]
    fn revealing_again_leaves_board_unchanged() {
        let mut engine = walled_engine();
        engine.reveal((0, 0)).unwrap();
        let before = engine.board().clone();

        let outcome = engine.reveal((0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::NoChange);
        assert_eq!(engine.board(), &before);
    }

    #[test]
    fn reveal_clears_marks_in_cascade() {
        let mut engine = walled_engine();
        engine.toggle_mark((6, 0)).unwrap();
        engine.toggle_mark((6, 1)).unwrap();

        engine.reveal((0, 0)).unwrap();

        assert!(!engine.is_marked((6, 0)));
        assert!(!engine.is_marked((6, 1)));
        assert_eq!(engine.mark_count(), 0);
    }

    #[test]
    fn reveal_unmarks_a_revealed_cell() {
        let mut engine = walled_engine();
        engine.reveal((0, 0)).unwrap();
        engine.toggle_mark((0, 0)).unwrap();

        assert_eq!(engine.reveal((0, 0)).unwrap(), RevealOutcome::Revealed);
        assert!(!engine.is_marked((0, 0)));
    }

    #[test]
    fn marking_twice_clears_the_mark() {
        let mut engine = engine(&[(0, 0)]);

        assert_eq!(engine.toggle_mark((5, 5)).unwrap(), MarkOutcome::Marked);
        assert!(engine.is_marked((5, 5)));
        assert_eq!(engine.toggle_mark((5, 5)).unwrap(), MarkOutcome::Unmarked);
        assert!(!engine.is_marked((5, 5)));
    }

    #[test]
    fn revealed_cell_can_be_marked() {
        let mut engine = walled_engine();
        engine.reveal((0, 0)).unwrap();

        assert_eq!(engine.toggle_mark((0, 0)).unwrap(), MarkOutcome::Marked);

        assert_eq!(engine.cell_at((0, 0)), CellState::Marked);
        assert_eq!(engine.board().get((0, 0)), Some(CellValue::Free));
        assert!(engine.render().to_string().contains("1│*"));
    }

    #[test]
    fn marking_every_mine_wins() {
        let mut engine = engine(&[(1, 2), (7, 0)]);
        engine.toggle_mark((8, 8)).unwrap();
        engine.toggle_mark((8, 8)).unwrap();

        assert_eq!(engine.toggle_mark((1, 2)).unwrap(), MarkOutcome::Marked);
        assert_eq!(engine.toggle_mark((7, 0)).unwrap(), MarkOutcome::Won);
        assert_eq!(engine.state(), EngineState::Won);
    }

    #[test]
    fn extra_mark_prevents_mark_win() {
        let mut engine = engine(&[(1, 2), (7, 0)]);
        engine.toggle_mark((4, 4)).unwrap();
        engine.toggle_mark((1, 2)).unwrap();
        engine.toggle_mark((7, 0)).unwrap();

        assert!(!engine.all_mines_marked());
        assert_eq!(engine.state(), EngineState::Active);

        assert_eq!(engine.toggle_mark((4, 4)).unwrap(), MarkOutcome::Won);
    }

    #[test]
    fn wrong_mark_prevents_mark_win() {
        let mut engine = engine(&[(1, 2), (7, 0)]);
        engine.toggle_mark((7, 1)).unwrap();

        assert_eq!(engine.toggle_mark((1, 2)).unwrap(), MarkOutcome::Marked);
        assert_eq!(engine.mark_count(), 2);
        assert!(!engine.check_win());
    }

    #[test]
    fn stepping_on_a_mine_explodes_every_mine() {
        let mut engine = engine(&[(0, 1), (5, 5)]);
        engine.reveal((0, 0)).unwrap();

        let outcome = engine.reveal((5, 5)).unwrap();

        assert_eq!(outcome, RevealOutcome::HitMine);
        assert_eq!(engine.state(), EngineState::Lost);
        assert_eq!(engine.triggered_mine(), Some((5, 5)));
        assert_eq!(
            engine.cell_at((0, 1)),
            CellState::Revealed(CellValue::ExplodedMine)
        );
        assert_eq!(
            engine.cell_at((5, 5)),
            CellState::Revealed(CellValue::ExplodedMine)
        );
    }

    #[test]
    fn revealing_a_marked_mine_still_loses() {
        let mut engine = engine(&[(0, 1), (2, 2)]);
        engine.toggle_mark((5, 5)).unwrap();
        engine.toggle_mark((5, 5)).unwrap();
        engine.toggle_mark((2, 2)).unwrap();

        assert_eq!(engine.reveal((2, 2)).unwrap(), RevealOutcome::HitMine);
        assert_eq!(engine.state(), EngineState::Lost);
        assert_eq!(engine.cell_at((2, 2)), CellState::Marked);
        assert!(!engine.check_win());
    }

    #[test]
    fn moves_after_the_end_are_rejected() {
        let mut engine = engine(&[(0, 1)]);
        engine.reveal((0, 0)).unwrap();
        engine.reveal((0, 1)).unwrap();

        assert_eq!(engine.reveal((4, 4)), Err(GameError::AlreadyEnded));
        assert_eq!(engine.toggle_mark((4, 4)), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn invalid_coords_are_rejected_before_generation() {
        let mut engine = engine(&[(0, 1)]);

        assert_eq!(engine.reveal((9, 0)), Err(GameError::InvalidCoords));
        assert_eq!(engine.toggle_mark((0, 200)), Err(GameError::InvalidCoords));
        assert!(engine.state().is_ready());
    }

    #[test]
    fn zero_mines_win_on_first_command() {
        let mut engine = engine(&[]);

        assert_eq!(engine.toggle_mark((2, 2)).unwrap(), MarkOutcome::Marked);
        assert_eq!(engine.state(), EngineState::Active);

        let mut engine = self::engine(&[]);
        assert_eq!(engine.reveal((2, 2)).unwrap(), RevealOutcome::Won);
    }

    #[test]
    fn summary_counts_revealed_and_marked_cells() {
        let mut engine = walled_engine();
        engine.reveal((0, 0)).unwrap();
        engine.toggle_mark((0, 2)).unwrap();
        engine.toggle_mark((0, 5)).unwrap();

        let summary = engine.summary();

        assert_eq!(summary.state, EngineState::Active);
        assert_eq!(summary.mines, 9);
        assert_eq!(summary.revealed, 18);
        assert_eq!(summary.marks, 2);
        assert_eq!(summary.correct_marks, 1);
        assert_eq!(summary.triggered_mine, None);
    }
}
