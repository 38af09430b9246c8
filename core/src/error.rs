use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Cell has already been revealed")]
    AlreadyRevealed,
    #[error("Cell has already been observed")]
    DuplicateObservation,
    #[error("Neighbor mine count must be at most 8")]
    CountOutOfRange,
    #[error("Clue is impossible for the remaining undetermined neighbors")]
    InconsistentObservation,
    #[error("Deduction would mark a cell both safe and mined")]
    ContradictoryKnowledge,
}

pub type Result<T> = core::result::Result<T, GameError>;
