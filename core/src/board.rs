use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// The grid, where every cell is either untouched or holds a [`CellValue`].
///
/// Only mines chosen by the generator and cells processed by a reveal are ever
/// touched, so an untouched cell is always a safe hidden one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Option<CellValue>>,
    touched: CellCount,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: Array2::default((LIMIT, LIMIT).to_nd_index()),
            touched: 0,
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<CellValue> {
        if is_valid_coords(coords) {
            self.cells[coords.to_nd_index()]
        } else {
            None
        }
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.get(coords).is_some()
    }

    /// Number of touched cells, mines included.
    pub fn touched_count(&self) -> CellCount {
        self.touched
    }

    pub fn is_fully_touched(&self) -> bool {
        self.touched == TOTAL_CELLS
    }

    pub fn has_mine(&self, coords: Coord2) -> bool {
        self.get(coords).is_some_and(CellValue::has_mine)
    }

    pub fn mine_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.is_some_and(CellValue::has_mine))
            .count()
            .try_into()
            .unwrap()
    }

    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        all_coords().filter(|&coords| self.has_mine(coords))
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.cells
            .iter_neighbor_cells(coords)
            .filter(|cell| cell.is_some_and(CellValue::has_mine))
            .count()
            .try_into()
            .unwrap()
    }

    pub fn classify(&self, coords: Coord2) -> CellValue {
        CellValue::from_adjacent(self.adjacent_mine_count(coords))
    }

    pub(crate) fn set(&mut self, coords: Coord2, value: CellValue) {
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_none() {
            self.touched += 1;
        }
        *cell = Some(value);
    }

    /// Puts a mine on an untouched cell, returns whether one was placed.
    pub fn place_mine_at(&mut self, coords: Coord2) -> Result<bool> {
        if !is_valid_coords(coords) {
            return Err(GameError::InvalidCoords);
        }

        if self.contains(coords) {
            return Ok(false);
        }

        self.set(coords, CellValue::UnexploredMine);
        Ok(true)
    }

    /// Places `count` mines on distinct untouched cells other than `excluded`.
    ///
    /// Uses rejection sampling, so the request is checked against the free
    /// capacity first to guarantee termination.
    pub fn place_mines<R: Rng>(
        &mut self,
        count: CellCount,
        excluded: Coord2,
        rng: &mut R,
    ) -> Result<()> {
        let excluded_free = is_valid_coords(excluded) && !self.contains(excluded);
        let capacity = TOTAL_CELLS - self.touched - CellCount::from(excluded_free);
        if count > capacity {
            return Err(GameError::TooManyMines { max: capacity });
        }

        for _ in 0..count {
            loop {
                let coords = (rng.random_range(0..LIMIT), rng.random_range(0..LIMIT));
                if coords != excluded && !self.contains(coords) {
                    self.set(coords, CellValue::UnexploredMine);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Turns every mine into its exploded variant.
    pub(crate) fn explode_mines(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.is_some_and(CellValue::has_mine) {
                *cell = Some(CellValue::ExplodedMine);
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
