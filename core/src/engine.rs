use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// What a single reveal told the player.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    /// The cell was safe; carries the number of mines among its neighbors.
    Clue(u8),
    HitMine,
}

/// Play-state over a [`MineField`]: which cells have been revealed and
/// whether the game is still running. Reveals one cell at a time; the caller
/// forwards each clue to whatever is choosing the moves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    field: MineField,
    revealed: Array2<bool>,
    revealed_count: CellCount,
    state: GameState,
    triggered_mine: Option<Cell>,
}

impl Game {
    pub fn new(field: MineField) -> Self {
        let size = field.size();
        Self {
            field,
            revealed: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            state: GameState::InProgress,
            triggered_mine: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Dims {
        self.field.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.field.mine_count()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn is_revealed(&self, cell: Cell) -> bool {
        self.revealed[cell.to_nd_index()]
    }

    pub fn triggered_mine(&self) -> Option<Cell> {
        self.triggered_mine
    }

    /// Reveals one hidden cell. A mine ends the game; otherwise the clue for
    /// that cell is reported and the game is won once every safe cell has
    /// been revealed.
    pub fn reveal(&mut self, cell: Cell) -> Result<RevealOutcome> {
        let cell = self.field.validate_cell(cell)?;
        if self.state.is_finished() {
            return Err(GameError::AlreadyEnded);
        }
        if self.revealed[cell.to_nd_index()] {
            return Err(GameError::AlreadyRevealed);
        }

        if self.field.contains_mine(cell) {
            self.triggered_mine = Some(cell);
            self.state = GameState::Lost;
            return Ok(RevealOutcome::HitMine);
        }

        self.revealed[cell.to_nd_index()] = true;
        self.revealed_count += 1;
        if self.revealed_count == self.field.safe_cell_count() {
            self.state = GameState::Won;
        }

        Ok(RevealOutcome::Clue(self.field.adjacent_mine_count(cell)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(size: Dims, mines: &[Cell]) -> Game {
        Game::new(MineField::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn revealing_a_mine_loses_and_records_the_trigger() {
        let mut game = game((2, 2), &[(0, 0)]);

        assert_eq!(game.reveal((0, 0)).unwrap(), RevealOutcome::HitMine);
        assert_eq!(game.state(), GameState::Lost);
        assert_eq!(game.triggered_mine(), Some((0, 0)));
    }

    #[test]
    fn clues_count_adjacent_mines() {
        let mut game = game((3, 3), &[(0, 0), (2, 2)]);

        assert_eq!(game.reveal((1, 1)).unwrap(), RevealOutcome::Clue(2));
        assert_eq!(game.reveal((0, 2)).unwrap(), RevealOutcome::Clue(0));
    }

    #[test]
    fn revealing_every_safe_cell_wins() {
        let mut game = game((2, 1), &[(0, 0)]);

        assert_eq!(game.reveal((1, 0)).unwrap(), RevealOutcome::Clue(1));
        assert_eq!(game.state(), GameState::Won);
        assert!(game.is_finished());
    }

    #[test]
    fn repeat_reveal_is_rejected() {
        let mut game = game((3, 3), &[(0, 0)]);

        game.reveal((2, 2)).unwrap();

        assert_eq!(game.reveal((2, 2)), Err(GameError::AlreadyRevealed));
    }

    #[test]
    fn moves_after_the_end_are_rejected() {
        let mut game = game((2, 2), &[(0, 0)]);

        game.reveal((0, 0)).unwrap();

        assert_eq!(game.reveal((1, 1)), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn out_of_bounds_reveal_is_rejected() {
        let mut game = game((2, 2), &[(0, 0)]);

        assert_eq!(game.reveal((5, 5)), Err(GameError::InvalidCoords));
    }
}
