//! Word-search grid preview
//!
//! Runs the same generator the puzzle layer uses and prints the result, so
//! content authors can check how a word list lays out.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;

use quest_content::{ConfigLoader, bundled_data_dir};
use quest_core::{GridRules, puzzle};

/// Generate a word-search grid
#[derive(Parser)]
pub struct Grid {
    /// Words to place
    #[arg(value_name = "WORDS", required = true)]
    words: Vec<String>,

    /// Seed for a reproducible layout
    #[arg(short, long, value_name = "SEED")]
    seed: Option<u64>,

    /// Read generator tunables from this config.toml instead of the bundled one
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Grid {
    pub fn execute(self) -> Result<()> {
        let rules = self.rules()?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let grid = puzzle::generate(self.words.as_slice(), &rules, &mut rng);

        println!(
            "{} {}x{}",
            style("Grid:").bold().cyan(),
            grid.rows(),
            grid.cols()
        );
        if let Some(seed) = self.seed {
            println!("{} {}", style("Seed:").bold().cyan(), seed);
        }
        println!();

        for line in grid.lines() {
            let spaced: Vec<String> = line.chars().map(String::from).collect();
            println!("  {}", spaced.join(" "));
        }
        println!();

        println!("{}", style("Words:").bold().yellow());
        for word in grid.words() {
            match word.placement {
                Some(placement) => println!(
                    "  {} {} at ({}, {}) {}",
                    style("✓").green(),
                    style(&word.word).bold(),
                    placement.origin.row,
                    placement.origin.col,
                    style(placement.orientation).dim()
                ),
                None => println!(
                    "  {} {} {}",
                    style("✗").red(),
                    style(&word.word).bold(),
                    style("(not placed)").dim()
                ),
            }
        }

        Ok(())
    }

    fn rules(&self) -> Result<GridRules> {
        let path = self
            .config
            .clone()
            .unwrap_or_else(|| bundled_data_dir().join("config.toml"));
        let config = ConfigLoader::load(&path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;
        Ok(config.grid)
    }
}
