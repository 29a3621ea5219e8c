//! Hero template loader.

use std::collections::HashSet;
use std::path::Path;

use quest_core::HeroTemplate;

use crate::loaders::{LoadResult, read_file};

/// Loader for hero templates from RON files.
pub struct HeroLoader;

impl HeroLoader {
    /// RON format: `Vec<HeroTemplate>`.
    pub fn load(path: &Path) -> LoadResult<Vec<HeroTemplate>> {
        let content = read_file(path)?;
        let heroes: Vec<HeroTemplate> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse hero catalog RON: {}", e))?;

        let mut ids = HashSet::new();
        for hero in &heroes {
            anyhow::ensure!(ids.insert(hero.id.clone()), "duplicate hero '{}'", hero.id);
        }
        Ok(heroes)
    }
}
