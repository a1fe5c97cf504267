use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Cannot draw {requested} distinct values from a population of {population}")]
    InvalidSampleSize { requested: usize, population: usize },
    #[error("Category does not hold the expected number of clues")]
    InvalidCategoryShape,
    #[error("Board does not hold the expected number of categories")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
