//! Monster template loader.

use std::collections::HashSet;
use std::path::Path;

use quest_core::MonsterTemplate;

use crate::loaders::{LoadResult, read_file};

/// Loader for monster templates from RON files.
pub struct MonsterLoader;

impl MonsterLoader {
    /// RON format: `Vec<MonsterTemplate>`.
    pub fn load(path: &Path) -> LoadResult<Vec<MonsterTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<MonsterTemplate>> {
        let templates: Vec<MonsterTemplate> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse monster catalog RON: {}", e))?;

        let mut ids = HashSet::new();
        for template in &templates {
            anyhow::ensure!(
                ids.insert(template.id.clone()),
                "duplicate monster template '{}'",
                template.id
            );
            anyhow::ensure!(
                template.base_hp > 0,
                "monster template '{}' has zero base_hp",
                template.id
            );
        }
        Ok(templates)
    }
}
