//! Game configuration loader.

use std::path::Path;

use quest_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Fields missing from the file keep their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        anyhow::ensure!(
            config.total_steps_per_station >= 1,
            "total_steps_per_station must be at least 1"
        );
        anyhow::ensure!(
            config.grid.relax_intersection_after <= config.grid.placement_attempts,
            "grid.relax_intersection_after ({}) exceeds grid.placement_attempts ({})",
            config.grid.relax_intersection_after,
            config.grid.placement_attempts
        );
        Ok(config)
    }
}
