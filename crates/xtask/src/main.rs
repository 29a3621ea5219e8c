//! Development tasks for the word-quest workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;

use anyhow::Result;
use clap::Parser;
use commands::{Clean, Grid, ReadSave, Simulate};

/// Development tasks for the word-quest workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for word-quest", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Read and inspect a player's saved session
    ReadSave(ReadSave),

    /// Clean save data
    Clean(Clean),

    /// Generate a word-search grid
    Grid(Grid),

    /// Run a headless scripted session against a content pack
    Simulate(Simulate),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for SAVE_DATA_DIR and other env vars)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.command {
        Command::ReadSave(cmd) => cmd.execute(),
        Command::Clean(cmd) => cmd.execute(),
        Command::Grid(cmd) => cmd.execute(),
        Command::Simulate(cmd) => cmd.execute(),
    }
}
