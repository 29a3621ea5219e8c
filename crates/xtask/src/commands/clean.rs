//! Clean save data command
//!
//! Removes stored session snapshots, either for one player or all of them.
//!
//! Safety: Always prompts for confirmation before deletion.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::io::{self, Write};
use std::path::PathBuf;

use quest_core::PlayerId;
use quest_runtime::{FileSessionRepository, SessionRepository};

use crate::dirs;

/// Clean save data
#[derive(Parser, Debug)]
pub struct Clean {
    /// Only delete this player's snapshot
    #[arg(long, value_name = "PLAYER_ID")]
    pub player: Option<u64>,

    /// Custom data directory (defaults to platform-specific location)
    #[arg(short, long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Skip confirmation prompt (dangerous!)
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl Clean {
    pub fn execute(self) -> Result<()> {
        let data_dir = dirs::data_dir_or(self.data_dir.clone());

        if !data_dir.exists() {
            println!(
                "{}",
                style("Nothing to clean - save directory doesn't exist yet").dim()
            );
            return Ok(());
        }

        let repo = FileSessionRepository::new(&data_dir)
            .with_context(|| format!("Failed to open save directory: {}", data_dir.display()))?;

        let targets: Vec<PlayerId> = match self.player {
            Some(id) if repo.exists(PlayerId(id)) => vec![PlayerId(id)],
            Some(id) => {
                eprintln!(
                    "{} No save for player {}",
                    style("✗").red().bold(),
                    style(id).cyan()
                );
                anyhow::bail!("Save file does not exist");
            }
            None => repo.list_players().context("Failed to list save files")?,
        };

        if targets.is_empty() {
            println!("{}", style("Nothing to clean - no saves stored").dim());
            return Ok(());
        }

        println!("{}", style("🧹 Clean Save Data").yellow().bold());
        println!();
        println!("The following will be deleted:");
        for player in &targets {
            println!("  {} {}", style("→").cyan(), style(player).bold());
            println!("    {}", style(repo.session_path(*player).display()).dim());
        }
        println!();

        if !self.yes && !self.confirm()? {
            println!("{}", style("Cancelled").dim());
            return Ok(());
        }

        for player in targets {
            print!("Deleting {}... ", player);
            io::stdout().flush()?;

            repo.delete(player)
                .with_context(|| format!("Failed to delete save of {}", player))?;

            println!("{}", style("✓").green());
        }

        println!();
        println!("{}", style("✓ Cleanup complete!").green().bold());

        Ok(())
    }

    /// Prompt user for confirmation
    fn confirm(&self) -> Result<bool> {
        print!("{} ", style("Proceed? [y/N]").yellow().bold());
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let input = input.trim().to_lowercase();
        Ok(input == "y" || input == "yes")
    }
}
