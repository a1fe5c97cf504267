use serde::{Deserialize, Serialize};

use crate::{
    Clue, Coord2, GameError, Result, RevealOutcome, CATEGORY_COUNT, CLUES_PER_CATEGORY,
};

/// A named column of exactly [`CLUES_PER_CATEGORY`] clues.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    title: String,
    clues: Vec<Clue>,
}

impl Category {
    pub fn new(title: impl Into<String>, clues: Vec<Clue>) -> Result<Self> {
        if clues.len() != CLUES_PER_CATEGORY {
            return Err(GameError::InvalidCategoryShape);
        }
        Ok(Self {
            title: title.into(),
            clues,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }
}

/// The full grid for one game session: [`CATEGORY_COUNT`] categories in
/// display order, each holding [`CLUES_PER_CATEGORY`] clues.
///
/// A board is built fresh per game and replaced wholesale on restart; clue
/// reveal state is the only thing that mutates during its lifetime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    categories: Vec<Category>,
}

impl Board {
    pub fn new(categories: Vec<Category>) -> Result<Self> {
        if categories.len() != CATEGORY_COUNT {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (col, row) = coords;
        if usize::from(col) < CATEGORY_COUNT && usize::from(row) < CLUES_PER_CATEGORY {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn clue_at(&self, coords: Coord2) -> Result<&Clue> {
        let (col, row) = self.validate_coords(coords)?;
        Ok(&self.categories[usize::from(col)].clues[usize::from(row)])
    }

    /// Advances the clue at `coords` one reveal step.
    pub fn activate(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let (col, row) = self.validate_coords(coords)?;
        let outcome = self.categories[usize::from(col)].clues[usize::from(row)].activate();
        log::debug!("activate cell at {:?}: {:?}", coords, outcome);
        Ok(outcome)
    }
}
