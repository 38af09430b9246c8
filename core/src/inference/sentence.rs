use alloc::collections::BTreeSet;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::Cell;

/// Logical statement that exactly `count` of `cells` are mines.
///
/// Cells leave the set as their status becomes known; equality is by cell
/// set and count, which is what duplicate removal keys on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    cells: BTreeSet<Cell>,
    count: u8,
}

impl Sentence {
    pub fn new(cells: BTreeSet<Cell>, count: u8) -> Self {
        debug_assert!(usize::from(count) <= cells.len());
        Self { cells, count }
    }

    pub fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    /// A sentence with no cells left carries no further information.
    pub fn is_spent(&self) -> bool {
        self.cells.is_empty()
    }

    /// Every cell is a mine once as many mines remain as cells. The nonzero
    /// guard keeps a fully resolved sentence from flagging anything.
    pub fn known_mines(&self) -> BTreeSet<Cell> {
        if self.count != 0 && usize::from(self.count) == self.cells.len() {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// Every cell is safe once no mines remain among them.
    pub fn known_safes(&self) -> BTreeSet<Cell> {
        if self.count == 0 {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// Removal and decrement happen together; an absent cell is a no-op.
    pub fn resolve_mine(&mut self, cell: Cell) {
        if self.cells.remove(&cell) {
            debug_assert!(self.count > 0, "mine resolved against an exhausted sentence");
            self.count = self.count.saturating_sub(1);
        }
    }

    /// Safe cells leave the set with the count untouched.
    pub fn resolve_safe(&mut self, cell: Cell) {
        self.cells.remove(&cell);
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (row, col)) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({row}, {col})")?;
        }
        write!(f, "}} = {}", self.count)
    }
}
