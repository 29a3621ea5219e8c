//! Step configuration loader.

use std::collections::HashSet;
use std::path::Path;

use quest_core::{MonsterTemplateId, PuzzleTypeId, StationId, StepConfig};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// One row of `steps.ron`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StepEntry {
    pub station: StationId,
    pub step: u32,
    pub monster: MonsterTemplateId,
    pub puzzle: PuzzleTypeId,
}

impl StepEntry {
    pub fn config(&self) -> StepConfig {
        StepConfig {
            monster: self.monster.clone(),
            puzzle: self.puzzle.clone(),
        }
    }
}

/// Loader for per-step monster and puzzle bindings.
pub struct StepLoader;

impl StepLoader {
    /// Load step entries, rejecting steps outside `1..=total_steps` and
    /// duplicate `(station, step)` pairs.
    pub fn load(path: &Path, total_steps: u32) -> LoadResult<Vec<StepEntry>> {
        let content = read_file(path)?;
        Self::parse(&content, total_steps)
    }

    pub fn parse(content: &str, total_steps: u32) -> LoadResult<Vec<StepEntry>> {
        let entries: Vec<StepEntry> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse steps RON: {}", e))?;

        let mut seen = HashSet::new();
        for entry in &entries {
            anyhow::ensure!(
                (1..=total_steps).contains(&entry.step),
                "step {} of station '{}' is outside 1..={}",
                entry.step,
                entry.station,
                total_steps
            );
            anyhow::ensure!(
                seen.insert((entry.station.clone(), entry.step)),
                "step {} of station '{}' is configured twice",
                entry.step,
                entry.station
            );
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entries() {
        let entries = StepLoader::parse(
            r#"[
                (station: "gate", step: 1, monster: "slime", puzzle: "word_search"),
                (station: "gate", step: 2, monster: "wolf", puzzle: "spelling"),
            ]"#,
            10,
        )
        .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].config().monster, MonsterTemplateId::new("wolf"));
    }

    #[test]
    fn out_of_range_step_rejected() {
        let result = StepLoader::parse(
            r#"[(station: "gate", step: 11, monster: "slime", puzzle: "word_search")]"#,
            10,
        );
        assert!(result.is_err());

        let result = StepLoader::parse(
            r#"[(station: "gate", step: 0, monster: "slime", puzzle: "word_search")]"#,
            10,
        );
        assert!(result.is_err());
    }

    #[test]
    fn duplicate_step_rejected() {
        let result = StepLoader::parse(
            r#"[
                (station: "gate", step: 3, monster: "slime", puzzle: "word_search"),
                (station: "gate", step: 3, monster: "wolf", puzzle: "spelling"),
            ]"#,
            10,
        );
        assert!(result.is_err());
    }
}
