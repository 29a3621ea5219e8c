//! Headless scripted session
//!
//! Starts a session with zero pacing, feeds it a fixed pattern of puzzle
//! answers, and prints every event the runtime publishes. Handy for checking
//! a content pack end to end without a puzzle front end.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing_subscriber::EnvFilter;

use quest_content::{ContentFactory, bundled_data_dir};
use quest_core::{PlayerId, PlayerSetup, PuzzleSignal, SessionState};
use quest_runtime::{
    Event, EventBus, GameSession, InMemorySessionRepo, OracleManager, SessionConfig,
    SessionHandle, Topic,
};

/// Run a headless scripted session
#[derive(Parser)]
pub struct Simulate {
    /// Content directory (defaults to the bundled sample pack)
    #[arg(short, long, value_name = "DIR")]
    content_dir: Option<PathBuf>,

    /// Answers to replay: `c` for a correct answer, `w` for a wrong one
    #[arg(short, long, value_name = "PATTERN", default_value = "ccw")]
    pattern: String,

    /// Maximum number of answers to send
    #[arg(short, long, value_name = "N", default_value_t = 50)]
    rounds: usize,

    /// Hero to play
    #[arg(long, value_name = "HERO", default_value = "knight")]
    hero: String,

    /// Player id used for the session
    #[arg(long, value_name = "PLAYER_ID", default_value_t = 1)]
    player_id: u64,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();

        let signals = parse_pattern(&self.pattern)?;

        let runtime = tokio::runtime::Runtime::new().context("Failed to build tokio runtime")?;
        runtime.block_on(self.run(signals))
    }

    async fn run(self, signals: Vec<PuzzleSignal>) -> Result<()> {
        let dir = self.content_dir.clone().unwrap_or_else(bundled_data_dir);
        let pack = ContentFactory::new(&dir)
            .load_all()
            .with_context(|| format!("Failed to load content from {}", dir.display()))?;

        for entry in pack.dangling_monsters() {
            println!(
                "{} {} uses unknown monster {}",
                style("!").yellow().bold(),
                entry.station,
                style(&entry.monster).yellow()
            );
        }

        let bus = EventBus::new();
        let mut receivers = bus.subscribe_multiple(&Topic::ALL);

        let setup = PlayerSetup::new(PlayerId(self.player_id), "simulator", self.hero.as_str());
        let session = GameSession::builder()
            .config(SessionConfig::instant())
            .oracles(OracleManager::from_content(pack))
            .repository(Arc::new(InMemorySessionRepo::new()))
            .event_bus(bus)
            .start(setup)
            .await
            .context("Failed to start session")?;
        let handle = session.handle();
        tracing::info!(
            "Simulating {} answers from pattern {:?}",
            self.rounds,
            self.pattern
        );

        println!("{}", style("=== Simulation ===").bold().green());
        drain(&mut receivers);

        let mut sent = 0;
        for signal in signals.iter().copied().cycle().take(self.rounds) {
            match handle.signal(signal).await {
                Ok(report) => {
                    sent += 1;
                    println!(
                        "{} {:?} -> {:?}",
                        style(format!("#{}", report.ticket.round)).cyan(),
                        signal,
                        report.follow_up
                    );
                }
                Err(err) => {
                    println!("{} {:?}: {}", style("✗").red(), signal, err);
                }
            }

            let state = settle(&handle).await?;
            drain(&mut receivers);

            if state.status.is_terminal() {
                break;
            }
        }

        let state = handle.query().await?;
        println!();
        println!("{}", style("=== Result ===").bold().green());
        println!("  Answers sent: {}", sent);
        println!("  Status: {:?}", state.status);
        println!("  Position: {}", state.player.position);
        println!(
            "  Level: {} ({} exp, {} currency)",
            state.player.level, state.player.exp, state.player.currency
        );

        handle.end().await?;
        drain(&mut receivers);
        session.shutdown().await?;
        Ok(())
    }
}

fn parse_pattern(pattern: &str) -> Result<Vec<PuzzleSignal>> {
    let signals = pattern
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c.to_ascii_lowercase() {
            'c' => Ok(PuzzleSignal::Correct {
                hits: 1,
                advance: true,
            }),
            'w' => Ok(PuzzleSignal::Wrong),
            other => anyhow::bail!("Unknown answer '{}' in pattern (use c or w)", other),
        })
        .collect::<Result<Vec<_>>>()?;

    if signals.is_empty() {
        anyhow::bail!("Pattern is empty");
    }
    Ok(signals)
}

/// Polls the session until its open round (if any) has been finished.
async fn settle(handle: &SessionHandle) -> Result<SessionState> {
    loop {
        let state = handle.query().await?;
        if state.guard.in_flight().is_none() {
            return Ok(state);
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
}

fn drain(receivers: &mut HashMap<Topic, broadcast::Receiver<Event>>) {
    for topic in Topic::ALL {
        let Some(rx) = receivers.get_mut(&topic) else {
            continue;
        };
        loop {
            match rx.try_recv() {
                Ok(event) => println!("  {} {:?}", style(format!("{:?}", topic)).dim(), event),
                Err(TryRecvError::Lagged(skipped)) => {
                    println!("  {} skipped {} events", style("!").yellow(), skipped);
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
    }
}
