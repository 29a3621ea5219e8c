//! Scoring for word-search puzzles built on [`PuzzleGrid`].

use super::grid::{GridPos, PuzzleGrid};
use super::request::PuzzleSignal;

/// Tracks which placed words a learner has found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordSearch {
    grid: PuzzleGrid,
    found: Vec<bool>,
}

impl WordSearch {
    pub fn new(grid: PuzzleGrid) -> Self {
        let found = vec![false; grid.words().len()];
        Self { grid, found }
    }

    pub fn grid(&self) -> &PuzzleGrid {
        &self.grid
    }

    pub fn remaining(&self) -> usize {
        self.grid
            .placed_words()
            .filter(|(index, _, _)| !self.found[*index])
            .count()
    }

    pub fn is_solved(&self) -> bool {
        self.remaining() == 0
    }

    /// Scores a straight selection.
    ///
    /// A new word is one hero hit and advances once the last word is found.
    /// A selection matching no word is a wrong answer. Re-selecting a word
    /// already found emits nothing.
    pub fn select(&mut self, start: GridPos, end: GridPos) -> Option<PuzzleSignal> {
        let Some(index) = self.grid.word_at_selection(start, end) else {
            return Some(PuzzleSignal::Wrong);
        };
        if std::mem::replace(&mut self.found[index], true) {
            return None;
        }
        Some(PuzzleSignal::Correct {
            hits: 1,
            advance: self.is_solved(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridRules;
    use crate::puzzle::generate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn finding_every_word_advances() {
        let mut rng = StdRng::seed_from_u64(11);
        let grid = generate(&["CAT", "DOG", "BIRD"], &GridRules::default(), &mut rng);
        let runs: Vec<_> = grid
            .placed_words()
            .map(|(_, word, placement)| (placement.origin, placement.end(word.len())))
            .collect();
        let mut search = WordSearch::new(grid);

        let mut signals = Vec::new();
        for (start, end) in &runs {
            signals.push(search.select(*end, *start));
        }

        assert!(search.is_solved());
        let last = signals.pop().flatten();
        assert_eq!(
            last,
            Some(PuzzleSignal::Correct {
                hits: 1,
                advance: true
            })
        );
        for signal in signals {
            assert_eq!(
                signal,
                Some(PuzzleSignal::Correct {
                    hits: 1,
                    advance: false
                })
            );
        }
    }

    #[test]
    fn repeated_and_wrong_selections() {
        let mut rng = StdRng::seed_from_u64(5);
        let grid = generate(&["LEMON", "PEAR"], &GridRules::default(), &mut rng);
        let (_, word, placement) = grid.placed_words().next().unwrap();
        let (start, end) = (placement.origin, placement.end(word.len()));
        let mut search = WordSearch::new(grid.clone());

        assert!(matches!(
            search.select(start, end),
            Some(PuzzleSignal::Correct { .. })
        ));
        assert_eq!(search.select(start, end), None);

        let far = GridPos::new(grid.rows() + 5, grid.cols() + 5);
        assert_eq!(search.select(far, far), Some(PuzzleSignal::Wrong));
    }
}
