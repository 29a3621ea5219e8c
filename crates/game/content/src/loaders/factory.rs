//! Content factory for building oracles from data files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use quest_core::{GameConfig, HeroTemplate, MonsterTemplate};

use crate::loaders::{
    ConfigLoader, HeroLoader, LoadResult, MonsterLoader, StepEntry, StepLoader, WorldGraph,
    WorldLoader,
};

/// Everything a session needs, loaded and cross-checked.
#[derive(Clone, Debug)]
pub struct ContentPack {
    pub config: GameConfig,
    pub world: WorldGraph,
    pub steps: Vec<StepEntry>,
    pub monsters: Vec<MonsterTemplate>,
    pub heroes: Vec<HeroTemplate>,
}

impl ContentPack {
    /// Step entries whose monster template does not exist.
    ///
    /// These are playable (the default monster stands in) but usually point
    /// at an authoring mistake.
    pub fn dangling_monsters(&self) -> Vec<&StepEntry> {
        let known: HashSet<_> = self.monsters.iter().map(|m| &m.id).collect();
        self.steps
            .iter()
            .filter(|entry| !known.contains(&entry.monster))
            .collect()
    }
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── world.ron
/// ├── steps.ron
/// ├── monsters.ron
/// └── heroes.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the world graph from `world.ron`.
    pub fn load_world(&self) -> LoadResult<WorldGraph> {
        WorldLoader::load(&self.data_dir.join("world.ron"))
    }

    /// Load step bindings from `steps.ron`.
    pub fn load_steps(&self, total_steps: u32) -> LoadResult<Vec<StepEntry>> {
        StepLoader::load(&self.data_dir.join("steps.ron"), total_steps)
    }

    /// Load monster templates from `monsters.ron`.
    pub fn load_monsters(&self) -> LoadResult<Vec<MonsterTemplate>> {
        MonsterLoader::load(&self.data_dir.join("monsters.ron"))
    }

    /// Load hero templates from `heroes.ron`.
    pub fn load_heroes(&self) -> LoadResult<Vec<HeroTemplate>> {
        HeroLoader::load(&self.data_dir.join("heroes.ron"))
    }

    /// Load every file and check that steps only reference known stations.
    pub fn load_all(&self) -> LoadResult<ContentPack> {
        let config = self.load_config()?;
        let world = self.load_world()?;
        let steps = self.load_steps(config.steps_per_station())?;
        let monsters = self.load_monsters()?;
        let heroes = self.load_heroes()?;

        let stations: HashSet<_> = world.stations.iter().map(|s| &s.id).collect();
        for entry in &steps {
            anyhow::ensure!(
                stations.contains(&entry.station),
                "steps.ron references unknown station '{}'",
                entry.station
            );
        }
        anyhow::ensure!(!heroes.is_empty(), "heroes.ron defines no hero");

        Ok(ContentPack {
            config,
            world,
            steps,
            monsters,
            heroes,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
