use alloc::vec::Vec;

use ndarray::Array2;
use rand::{RngExt, SeedableRng};
use rand::rngs::SmallRng;

use super::*;

/// Seeded uniform mine placement, optionally keeping one cell mine-free for
/// an opening move.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomMineFieldGenerator {
    seed: u64,
    reserved_safe: Option<Cell>,
}

impl RandomMineFieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            reserved_safe: None,
        }
    }

    pub fn with_safe_cell(seed: u64, cell: Cell) -> Self {
        Self {
            seed,
            reserved_safe: Some(cell),
        }
    }
}

impl MineFieldGenerator for RandomMineFieldGenerator {
    fn generate(self, config: BoardConfig) -> MineField {
        let (rows, cols) = config.size;
        let total = config.total_cells();

        let reserved = match self.reserved_safe {
            Some(cell) if cell.0 >= rows || cell.1 >= cols => {
                log::warn!(
                    "reserved safe cell ({}, {}) is out of bounds, ignoring",
                    cell.0,
                    cell.1
                );
                None
            }
            Some(cell) if config.mines >= total => {
                log::warn!("board is full, cannot keep ({}, {}) safe", cell.0, cell.1);
                None
            }
            other => other,
        };

        let mut free: Vec<Cell> = Vec::with_capacity(total.into());
        for row in 0..rows {
            for col in 0..cols {
                if reserved != Some((row, col)) {
                    free.push((row, col));
                }
            }
        }

        let mines = usize::from(config.mines).min(free.len());
        if mines < usize::from(config.mines) {
            log::warn!(
                "requested {} mines but only {} cells are placeable",
                config.mines,
                free.len()
            );
        }

        let mut mask: Array2<bool> = Array2::default((usize::from(rows), usize::from(cols)));
        let mut rng = SmallRng::seed_from_u64(self.seed);
        for _ in 0..mines {
            let index = rng.random_range(0..free.len());
            let cell = free.swap_remove(index);
            mask[cell.to_nd_index()] = true;
        }

        MineField::from_mine_mask(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_generates_the_same_field() {
        let config = BoardConfig::new((8, 8), 10);

        let first = RandomMineFieldGenerator::new(42).generate(config);
        let second = RandomMineFieldGenerator::new(42).generate(config);

        assert_eq!(first, second);
    }

    #[test]
    fn requested_mine_count_is_placed() {
        let config = BoardConfig::new((8, 8), 10);

        let field = RandomMineFieldGenerator::new(7).generate(config);

        assert_eq!(field.mine_count(), 10);
    }

    #[test]
    fn reserved_cell_stays_mine_free() {
        let config = BoardConfig::new((4, 4), 15);

        for seed in 0..32 {
            let field = RandomMineFieldGenerator::with_safe_cell(seed, (2, 2)).generate(config);
            assert!(!field.contains_mine((2, 2)));
            assert_eq!(field.mine_count(), 15);
        }
    }

    #[test]
    fn full_board_drops_the_reservation() {
        let config = BoardConfig::new((2, 2), 4);

        let field = RandomMineFieldGenerator::with_safe_cell(5, (0, 0)).generate(config);

        assert_eq!(field.mine_count(), 4);
        assert!(field.contains_mine((0, 0)));
    }
}
