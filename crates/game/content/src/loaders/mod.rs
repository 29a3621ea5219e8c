//! Content loaders for reading game data from files.
//!
//! Each loader turns one RON/TOML file into quest-core types and rejects data
//! the engine could not traverse (duplicate ids, clashing order keys, steps
//! outside a station). Missing step or monster entries are not rejected: the
//! encounter factory covers them with the default monster.

pub mod config;
pub mod factory;
pub mod heroes;
pub mod monsters;
pub mod steps;
pub mod world;

pub use config::ConfigLoader;
pub use factory::{ContentFactory, ContentPack};
pub use heroes::HeroLoader;
pub use monsters::MonsterLoader;
pub use steps::{StepEntry, StepLoader};
pub use world::{WorldGraph, WorldLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
