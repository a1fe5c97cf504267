/// Single coordinate axis used for board columns and rows.
pub type Coord = u8;

/// Two-dimensional cell coordinates `(column, row)`.
pub type Coord2 = (Coord, Coord);

/// Number of categories on a full board.
pub const CATEGORY_COUNT: usize = 6;

/// Number of clues in every category.
pub const CLUES_PER_CATEGORY: usize = 5;
