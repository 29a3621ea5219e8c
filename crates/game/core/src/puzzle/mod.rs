//! Puzzle support: the word-search grid generator and the signal contract
//! shared with every puzzle type.

pub mod generator;
pub mod grid;
pub mod request;
pub mod word_search;

pub use generator::generate;
pub use grid::{GridPos, Orientation, Placement, PuzzleGrid, WordPlacement};
pub use request::{PuzzleRequest, PuzzleSignal};
pub use word_search::WordSearch;
