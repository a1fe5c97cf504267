pub use board::*;
pub use clue::*;
pub use error::*;
pub use sample::*;
pub use types::*;

mod board;
mod clue;
mod error;
mod sample;
mod types;
