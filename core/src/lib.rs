#![no_std]

extern crate alloc;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use autoplay::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use inference::*;
pub use types::*;

mod autoplay;
mod engine;
mod error;
mod generator;
mod inference;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Dims,
    pub mines: CellCount,
}

impl BoardConfig {
    pub const fn new_unchecked(size: Dims, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new((rows, cols): Dims, mines: CellCount) -> Self {
        let rows = rows.clamp(1, Coord::MAX);
        let cols = cols.clamp(1, Coord::MAX);
        let mines = mines.clamp(1, cell_count(rows, cols));
        Self::new_unchecked((rows, cols), mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_count(self.size.0, self.size.1)
    }
}

/// Ground-truth mine placement. Only the engine, the generator, and tests
/// look at this; the inference side never does.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineField {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineField {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap();
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Dims, mine_cells: &[Cell]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &cell in mine_cells {
            if cell.0 >= size.0 || cell.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[cell.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn config(&self) -> BoardConfig {
        BoardConfig {
            size: self.size(),
            mines: self.mine_count,
        }
    }

    pub fn validate_cell(&self, cell: Cell) -> Result<Cell> {
        let size = self.size();
        if cell.0 < size.0 && cell.1 < size.1 {
            Ok(cell)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Dims {
        let dim = self.mine_mask.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len().try_into().unwrap()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, cell: Cell) -> bool {
        self.mine_mask[cell.to_nd_index()]
    }

    pub fn adjacent_mine_count(&self, cell: Cell) -> u8 {
        self.mine_mask
            .iter_neighbors(cell)
            .filter(|&pos| self.contains_mine(pos))
            .count()
            .try_into()
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_clamps_degenerate_sizes() {
        let config = BoardConfig::new((0, 5), 99);
        assert_eq!(config.size, (1, 5));
        assert_eq!(config.mines, 5);
    }

    #[test]
    fn mine_coords_outside_the_board_are_rejected() {
        assert_eq!(
            MineField::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn adjacent_mine_count_ignores_the_cell_itself() {
        let field = MineField::from_mine_coords((3, 3), &[(1, 1), (0, 0)]).unwrap();

        assert_eq!(field.adjacent_mine_count((1, 1)), 1);
        assert_eq!(field.adjacent_mine_count((2, 2)), 1);
        assert_eq!(field.adjacent_mine_count((0, 1)), 2);
    }

    #[test]
    fn counts_derive_from_the_mask() {
        let field = MineField::from_mine_coords((4, 2), &[(0, 0), (3, 1)]).unwrap();

        assert_eq!(field.mine_count(), 2);
        assert_eq!(field.total_cells(), 8);
        assert_eq!(field.safe_cell_count(), 6);
        assert_eq!(field.config(), BoardConfig::new_unchecked((4, 2), 2));
    }
}
