//! Read and inspect saved sessions from the persistence layer
//!
//! Deserializes session_{player}.bin files and displays their contents.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use quest_core::{PlayerId, SavedSession};
use quest_runtime::{FileSessionRepository, SessionRepository};

use crate::dirs;

/// Read and inspect saved sessions
#[derive(Parser)]
pub struct ReadSave {
    /// Player whose snapshot to read; lists stored players when omitted
    #[arg(value_name = "PLAYER_ID")]
    player: Option<u64>,

    /// Custom data directory (defaults to platform-specific location)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Summary view (hero, position, profile, monster)
    Summary,
    /// Full JSON output
    Json,
    /// Pretty-printed debug format
    Debug,
}

impl ReadSave {
    pub fn execute(self) -> Result<()> {
        let data_dir = dirs::data_dir_or(self.data_dir);
        if !data_dir.exists() {
            anyhow::bail!(
                "Data directory does not exist: {}\n\
                 No saves found. Play a session first.",
                data_dir.display()
            );
        }

        let repo = FileSessionRepository::new(&data_dir)
            .with_context(|| format!("Failed to open save directory: {}", data_dir.display()))?;

        let Some(player) = self.player.map(PlayerId) else {
            return list_players(&repo);
        };

        let path = repo.session_path(player);
        let saved = repo
            .load(player)
            .with_context(|| format!("Failed to read save file: {}", path.display()))?
            .with_context(|| {
                format!(
                    "Save file not found: {}\n\nHint: run without PLAYER_ID to list saves",
                    path.display()
                )
            })?;
        let size = std::fs::metadata(&path).map(|meta| meta.len()).unwrap_or(0);

        println!("{} {}", style("Save File:").bold().cyan(), path.display());
        println!("{} {}", style("File Size:").bold().cyan(), format_bytes(size));
        println!("{} {}", style("Player:").bold().cyan(), saved.player_id);
        println!();

        match self.format {
            OutputFormat::Summary => print_summary(&saved),
            OutputFormat::Json => print_json(&saved)?,
            OutputFormat::Debug => print_debug(&saved),
        }

        Ok(())
    }
}

fn list_players(repo: &FileSessionRepository) -> Result<()> {
    let players = repo.list_players().context("Failed to list save files")?;
    if players.is_empty() {
        println!("{}", style("No saves found").dim());
        return Ok(());
    }

    println!("{}", style("Stored saves:").bold().green());
    for player in players {
        println!(
            "  {} {}",
            style(player.0).cyan(),
            style(repo.session_path(player).display()).dim()
        );
    }
    Ok(())
}

fn print_summary(saved: &SavedSession) {
    println!("{}", style("=== Saved Session Summary ===").bold().green());
    println!();

    println!("{}", style("Learner:").bold().yellow());
    println!("  Name: {}", saved.display_name);
    println!("  Hero: {}", saved.hero);
    println!("  HP: {}", saved.hp);
    println!();

    let profile = &saved.profile;
    println!("{}", style("Profile:").bold().yellow());
    println!("  Level: {} ({} exp)", profile.level, profile.exp);
    println!("  Currency: {}", profile.currency);
    println!(
        "  Bonuses: +{} attack, +{} defense",
        profile.attack_bonus, profile.defense_bonus
    );
    if !profile.unlocked_heroes.is_empty() {
        let heroes: Vec<_> = profile.unlocked_heroes.iter().map(|h| h.as_str()).collect();
        println!("  Unlocked Heroes: {}", heroes.join(", "));
    }
    println!();

    println!("{}", style("Progress:").bold().yellow());
    println!("  Location: {}", saved.position.location);
    println!("  Station: {}", saved.position.station);
    println!("  Step: {}", saved.position.step_index);
    println!();

    if let Some(monster) = &saved.monster {
        println!("{}", style("Monster:").bold().yellow());
        println!("  Template: {}", monster.template_id);
        println!("  HP: {}", monster.hp);
        println!();
    }
}

fn print_json(saved: &SavedSession) -> Result<()> {
    let json =
        serde_json::to_string_pretty(saved).context("Failed to serialize save to JSON")?;
    println!("{}", json);
    Ok(())
}

fn print_debug(saved: &SavedSession) {
    println!("{:#?}", saved);
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
