use ndarray::Array2;

use crate::{GameError, Result};

/// Single coordinate axis used for rows and columns.
pub type Coord = u8;

/// Count type used for mine counts and touched-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, column)`.
pub type Coord2 = (Coord, Coord);

/// Side length of the square grid.
pub const LIMIT: Coord = 9;

/// Number of cells on the grid.
pub const TOTAL_CELLS: CellCount = mult(LIMIT, LIMIT);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub const fn is_valid_coords((row, column): Coord2) -> bool {
    row < LIMIT && column < LIMIT
}

/// Converts one-based player input, given column first, into `(row, column)` coordinates.
pub fn coords_from_input(column: i64, row: i64) -> Result<Coord2> {
    Ok((axis_from_ordinal(row)?, axis_from_ordinal(column)?))
}

fn axis_from_ordinal(ordinal: i64) -> Result<Coord> {
    ordinal
        .checked_sub(1)
        .and_then(|index| Coord::try_from(index).ok())
        .filter(|&index| index < LIMIT)
        .ok_or(GameError::InvalidCoords)
}

/// Iterates every coordinate of the grid in row-major order.
pub fn all_coords() -> impl Iterator<Item = Coord2> {
    (0..LIMIT).flat_map(|row| (0..LIMIT).map(move |column| (row, column)))
}

/// Iterates the in-grid neighbours of `coords`.
pub fn iter_neighbors(coords: Coord2) -> NeighborIter {
    NeighborIter::new(coords, (LIMIT, LIMIT))
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let dim = self.dim();
        let size = (dim.0.try_into().unwrap(), dim.1.try_into().unwrap());
        NeighborIter::new(index, size)
    }
}

pub trait NeighborCellIterExt<T>: NeighborIterExt {
    fn iter_neighbor_cells_with_index(&self, index: Coord2) -> impl Iterator<Item = (Coord2, T)>;

    fn iter_neighbor_cells(&self, index: Coord2) -> impl Iterator<Item = T> {
        self.iter_neighbor_cells_with_index(index)
            .map(|(_, cell)| cell)
    }
}

impl<T: Copy> NeighborCellIterExt<T> for Array2<T> {
    fn iter_neighbor_cells_with_index(&self, index: Coord2) -> impl Iterator<Item = (Coord2, T)> {
        self.iter_neighbors(index)
            .map(|index| (index, self[index.to_nd_index()]))
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (row, column) = coords;
    let (d_row, d_column) = delta;
    let (max_row, max_column) = bounds;

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= max_row {
        return None;
    }

    let next_column = column.checked_add_signed(d_column)?;
    if next_column >= max_column {
        return None;
    }

    Some((next_row, next_column))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
