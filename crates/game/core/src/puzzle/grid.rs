//! Letter grid produced by the word-search generator.

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Position `steps` cells further along `orientation`.
    pub const fn step(self, orientation: Orientation, steps: usize) -> Self {
        match orientation {
            Orientation::Horizontal => Self::new(self.row, self.col + steps),
            Orientation::Vertical => Self::new(self.row + steps, self.col),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Where a word sits in the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub origin: GridPos,
    pub orientation: Orientation,
}

impl Placement {
    /// Last cell of a word of `len` letters.
    pub const fn end(&self, len: usize) -> GridPos {
        self.origin.step(self.orientation, len.saturating_sub(1))
    }
}

/// A requested word and, if it fit, its placement.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordPlacement {
    /// Normalized word: only `A`-`Z`, accents folded, other characters removed.
    pub word: String,
    /// `None` when the generator gave up on this word.
    pub placement: Option<Placement>,
}

impl WordPlacement {
    pub fn is_placed(&self) -> bool {
        self.placement.is_some()
    }

    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }
}

/// Rectangular letter matrix with no empty cells.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PuzzleGrid {
    rows: usize,
    cols: usize,
    /// Row-major, `rows * cols` uppercase letters.
    cells: Vec<char>,
    words: Vec<WordPlacement>,
}

impl PuzzleGrid {
    pub(crate) fn from_parts(
        rows: usize,
        cols: usize,
        cells: Vec<char>,
        words: Vec<WordPlacement>,
    ) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self {
            rows,
            cols,
            cells,
            words,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<char> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).copied()
    }

    /// All requested words, in request order.
    pub fn words(&self) -> &[WordPlacement] {
        &self.words
    }

    pub fn placed_words(&self) -> impl Iterator<Item = (usize, &WordPlacement, Placement)> {
        self.words
            .iter()
            .enumerate()
            .filter_map(|(index, word)| word.placement.map(|placement| (index, word, placement)))
    }

    /// Reads `len` letters starting at the placement's origin.
    ///
    /// Returns `None` if the run leaves the grid.
    pub fn read(&self, placement: &Placement, len: usize) -> Option<String> {
        (0..len)
            .map(|offset| {
                let pos = placement.origin.step(placement.orientation, offset);
                self.cell(pos.row, pos.col)
            })
            .collect()
    }

    /// Index of the placed word whose run is exactly `start..=end`, in
    /// either direction.
    pub fn word_at_selection(&self, start: GridPos, end: GridPos) -> Option<usize> {
        self.placed_words().find_map(|(index, word, placement)| {
            let first = placement.origin;
            let last = placement.end(word.len());
            let matches = (start == first && end == last) || (start == last && end == first);
            matches.then_some(index)
        })
    }

    /// One string per row, top to bottom.
    pub fn lines(&self) -> Vec<String> {
        self.cells
            .chunks(self.cols.max(1))
            .map(|row| row.iter().collect())
            .collect()
    }
}

impl fmt::Display for PuzzleGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            let spaced: Vec<String> = line.chars().map(String::from).collect();
            writeln!(f, "{}", spaced.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PuzzleGrid {
        // C A T
        // X D O
        // Q Z G
        let cells = "CATXDOQZG".chars().collect();
        let words = vec![
            WordPlacement {
                word: "CAT".to_string(),
                placement: Some(Placement {
                    origin: GridPos::new(0, 0),
                    orientation: Orientation::Horizontal,
                }),
            },
            WordPlacement {
                word: "DOG".to_string(),
                placement: None,
            },
        ];
        PuzzleGrid::from_parts(3, 3, cells, words)
    }

    #[test]
    fn read_follows_orientation() {
        let grid = sample();
        let down = Placement {
            origin: GridPos::new(0, 2),
            orientation: Orientation::Vertical,
        };
        assert_eq!(grid.read(&down, 3).as_deref(), Some("TOG"));
        assert_eq!(grid.read(&down, 4), None);
        assert_eq!(grid.cell(3, 0), None);
    }

    #[test]
    fn selection_matches_in_both_directions() {
        let grid = sample();
        assert_eq!(
            grid.word_at_selection(GridPos::new(0, 0), GridPos::new(0, 2)),
            Some(0)
        );
        assert_eq!(
            grid.word_at_selection(GridPos::new(0, 2), GridPos::new(0, 0)),
            Some(0)
        );
        assert_eq!(
            grid.word_at_selection(GridPos::new(0, 0), GridPos::new(0, 1)),
            None
        );
    }

    #[test]
    fn unplaced_words_are_not_listed() {
        let grid = sample();
        let placed: Vec<_> = grid.placed_words().map(|(i, _, _)| i).collect();
        assert_eq!(placed, vec![0]);
        assert_eq!(grid.lines(), vec!["CAT", "XDO", "QZG"]);
    }
}
