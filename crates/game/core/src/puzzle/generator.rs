//! Word-search grid generation.
//!
//! # Algorithm
//!
//! 1. Normalize words (uppercase `A`-`Z` only, accents folded, everything
//!    else dropped) and order them by
//!    descending length; ties keep request order.
//! 2. Start from a square of side `max(longest, ceil(sqrt(letters * size_factor)))`.
//! 3. Place the longest word horizontally, centered on the middle row.
//! 4. Every other word gets up to `placement_attempts` random placements. A
//!    valid placement only overlaps empty cells or equal letters. It is taken
//!    at once if it crosses an existing letter; after
//!    `relax_intersection_after` attempts any valid placement is taken.
//!    Words that never find a spot stay unplaced.
//! 5. Crop to the bounding box of all placed letters.
//! 6. Fill the remaining holes with random uppercase letters.
//!
//! The generator is pure given the random source, so a seeded RNG always
//! yields the same grid.

use rand::Rng;

use super::grid::{GridPos, Orientation, Placement, PuzzleGrid, WordPlacement};
use crate::config::GridRules;

/// Builds a grid containing as many of `words` as fit.
pub fn generate<S, R>(words: &[S], rules: &GridRules, rng: &mut R) -> PuzzleGrid
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let normalized: Vec<Vec<char>> = words.iter().map(|w| normalize(w.as_ref())).collect();

    let mut order: Vec<usize> = (0..normalized.len()).collect();
    order.sort_by(|&a, &b| normalized[b].len().cmp(&normalized[a].len()));

    let longest = match order.first() {
        Some(&index) if !normalized[index].is_empty() => index,
        _ => return single_cell(&normalized, rng),
    };

    let total_letters: usize = normalized.iter().map(Vec::len).sum();
    let size = initial_size(normalized[longest].len(), total_letters, rules.size_factor);
    let mut board = Board::new(size);
    let mut placements: Vec<Option<Placement>> = vec![None; normalized.len()];

    let centered = Placement {
        origin: GridPos::new(size / 2, (size - normalized[longest].len()) / 2),
        orientation: Orientation::Horizontal,
    };
    board.write(&normalized[longest], &centered);
    placements[longest] = Some(centered);

    for &index in order.iter().skip(1) {
        let word = &normalized[index];
        if word.is_empty() || word.len() > size {
            continue;
        }
        placements[index] = place_word(&mut board, word, rules, rng);
    }

    board.into_grid(normalized, placements, rng)
}

/// Reduces a word to the letters a grid cell can hold.
///
/// Filler cells are `A`-`Z`, so placed words must be too: common Latin
/// accents fold to their base letter and anything else (spaces, hyphens,
/// apostrophes, digits) is dropped.
fn normalize(word: &str) -> Vec<char> {
    word.chars()
        .flat_map(char::to_uppercase)
        .map(fold_accent)
        .filter(char::is_ascii_uppercase)
        .collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'Ç' => 'C',
        'È' | 'É' | 'Ê' | 'Ë' => 'E',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'Ñ' => 'N',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => 'O',
        'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
        'Ý' | 'Ÿ' => 'Y',
        other => other,
    }
}

fn initial_size(longest: usize, total_letters: usize, size_factor: f64) -> usize {
    let factor = if size_factor.is_finite() && size_factor > 0.0 {
        size_factor
    } else {
        1.0
    };
    let area = (total_letters as f64 * factor).sqrt().ceil() as usize;
    longest.max(area).max(1)
}

fn random_letter<R: Rng + ?Sized>(rng: &mut R) -> char {
    char::from(b'A' + rng.gen_range(0..26u8))
}

fn single_cell<R: Rng + ?Sized>(words: &[Vec<char>], rng: &mut R) -> PuzzleGrid {
    let placements = words
        .iter()
        .map(|word| WordPlacement {
            word: word.iter().collect(),
            placement: None,
        })
        .collect();
    PuzzleGrid::from_parts(1, 1, vec![random_letter(rng)], placements)
}

fn place_word<R: Rng + ?Sized>(
    board: &mut Board,
    word: &[char],
    rules: &GridRules,
    rng: &mut R,
) -> Option<Placement> {
    let size = board.size;
    for attempt in 0..rules.placement_attempts {
        let orientation = if rng.gen_bool(0.5) {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let line = rng.gen_range(0..size);
        let offset = rng.gen_range(0..=size - word.len());
        let origin = match orientation {
            Orientation::Horizontal => GridPos::new(line, offset),
            Orientation::Vertical => GridPos::new(offset, line),
        };
        let candidate = Placement {
            origin,
            orientation,
        };

        let Some(crossings) = board.fit(word, &candidate) else {
            continue;
        };
        if crossings > 0 || attempt >= rules.relax_intersection_after {
            board.write(word, &candidate);
            return Some(candidate);
        }
    }
    None
}

/// Square working area; `None` marks an empty cell.
struct Board {
    size: usize,
    cells: Vec<Option<char>>,
}

impl Board {
    fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    fn index(&self, pos: GridPos) -> usize {
        pos.row * self.size + pos.col
    }

    /// Number of letters `word` would share with the board, or `None` if it
    /// clashes with a different letter.
    fn fit(&self, word: &[char], placement: &Placement) -> Option<usize> {
        let mut crossings = 0;
        for (offset, &letter) in word.iter().enumerate() {
            let pos = placement.origin.step(placement.orientation, offset);
            match self.cells[self.index(pos)] {
                None => {}
                Some(existing) if existing == letter => crossings += 1,
                Some(_) => return None,
            }
        }
        Some(crossings)
    }

    fn write(&mut self, word: &[char], placement: &Placement) {
        for (offset, &letter) in word.iter().enumerate() {
            let index = self.index(placement.origin.step(placement.orientation, offset));
            self.cells[index] = Some(letter);
        }
    }

    /// Crops to the filled bounding box and fills the holes.
    fn into_grid<R: Rng + ?Sized>(
        self,
        words: Vec<Vec<char>>,
        placements: Vec<Option<Placement>>,
        rng: &mut R,
    ) -> PuzzleGrid {
        let (mut top, mut left, mut bottom, mut right) = (self.size, self.size, 0, 0);
        for row in 0..self.size {
            for col in 0..self.size {
                if self.cells[row * self.size + col].is_some() {
                    top = top.min(row);
                    left = left.min(col);
                    bottom = bottom.max(row);
                    right = right.max(col);
                }
            }
        }

        let rows = bottom - top + 1;
        let cols = right - left + 1;
        let mut cells = Vec::with_capacity(rows * cols);
        for row in top..=bottom {
            for col in left..=right {
                let letter = self.cells[row * self.size + col];
                cells.push(letter.unwrap_or_else(|| random_letter(rng)));
            }
        }

        let words = words
            .into_iter()
            .zip(placements)
            .map(|(word, placement)| WordPlacement {
                word: word.into_iter().collect(),
                placement: placement.map(|p| Placement {
                    origin: GridPos::new(p.origin.row - top, p.origin.col - left),
                    orientation: p.orientation,
                }),
            })
            .collect();

        PuzzleGrid::from_parts(rows, cols, cells, words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn assert_placed_words_readable(grid: &PuzzleGrid) {
        for (_, word, placement) in grid.placed_words() {
            assert_eq!(
                grid.read(&placement, word.len()).as_deref(),
                Some(word.word.as_str())
            );
        }
    }

    fn assert_all_letters(grid: &PuzzleGrid) {
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let cell = grid.cell(row, col).unwrap();
                assert!(cell.is_ascii_uppercase(), "cell {cell:?} at {row},{col}");
            }
        }
    }

    #[test]
    fn cat_dog_bird() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = generate(&["CAT", "DOG", "BIRD"], &GridRules::default(), &mut rng);

        assert_all_letters(&grid);
        assert_placed_words_readable(&grid);
        assert!(grid.words()[2].is_placed(), "longest word is always placed");
    }

    #[test]
    fn longest_word_is_centered_horizontally_before_crop() {
        let mut rng = StdRng::seed_from_u64(1);
        let grid = generate(&["elephant"], &GridRules::default(), &mut rng);

        assert_eq!(grid.rows(), 1);
        assert_eq!(grid.cols(), 8);
        assert_eq!(grid.lines(), vec!["ELEPHANT"]);
        let placement = grid.words()[0].placement.unwrap();
        assert_eq!(placement.origin, GridPos::new(0, 0));
        assert_eq!(placement.orientation, Orientation::Horizontal);
    }

    #[test]
    fn words_are_normalized() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = generate(&["ice cream", "Cone"], &GridRules::default(), &mut rng);

        assert_eq!(grid.words()[0].word, "ICECREAM");
        assert_eq!(grid.words()[1].word, "CONE");
        assert_placed_words_readable(&grid);
    }

    #[test]
    fn punctuation_and_accents_never_reach_the_grid() {
        let words = ["o'clock", "t-shirt", "café", "ice-cream", "no. 1"];
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = generate(&words, &GridRules::default(), &mut rng);
            assert_all_letters(&grid);
            assert_placed_words_readable(&grid);
        }

        let grid = generate(&words, &GridRules::default(), &mut StdRng::seed_from_u64(1));
        let normalized: Vec<&str> = grid.words().iter().map(|w| w.word.as_str()).collect();
        assert_eq!(normalized, ["OCLOCK", "TSHIRT", "CAFE", "ICECREAM", "NO"]);
    }

    #[test]
    fn empty_input_yields_single_cell() {
        let mut rng = StdRng::seed_from_u64(0);
        let empty: [&str; 0] = [];
        let grid = generate(&empty, &GridRules::default(), &mut rng);
        assert_eq!((grid.rows(), grid.cols()), (1, 1));
        assert_all_letters(&grid);

        let grid = generate(&["", "  "], &GridRules::default(), &mut rng);
        assert_eq!((grid.rows(), grid.cols()), (1, 1));
        assert!(grid.words().iter().all(|w| !w.is_placed()));
    }

    #[test]
    fn same_seed_same_grid() {
        let words = ["apple", "banana", "cherry", "date", "fig"];
        let a = generate(&words, &GridRules::default(), &mut StdRng::seed_from_u64(42));
        let b = generate(&words, &GridRules::default(), &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn unplaceable_word_is_reported_not_fatal() {
        // No attempts at all: only the longest word can be placed.
        let rules = GridRules {
            placement_attempts: 0,
            ..GridRules::default()
        };
        let mut rng = StdRng::seed_from_u64(9);
        let grid = generate(&["SUN", "MOONLIGHT"], &rules, &mut rng);

        assert!(!grid.words()[0].is_placed());
        assert!(grid.words()[1].is_placed());
        assert_eq!(grid.lines(), vec!["MOONLIGHT"]);
    }

    #[test]
    fn many_seeds_keep_invariants() {
        let words = ["river", "stone", "forest", "cloud", "owl", "maple", "wind"];
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = generate(&words, &GridRules::default(), &mut rng);
            assert_all_letters(&grid);
            assert_placed_words_readable(&grid);
        }
    }
}
