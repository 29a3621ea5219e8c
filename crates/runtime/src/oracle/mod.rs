//! Runtime wrappers around static game content oracles.
//!
//! These implementations expose `quest-core` oracle traits and bundle them into
//! an [`OracleManager`] so the runtime can build [`quest_core::GameEnv`]
//! views on demand. The data is immutable at runtime; dynamic state lives in
//! the session worker and in repositories.
mod config;
mod heroes;
mod monsters;
mod steps;
mod world;

use std::sync::Arc;

use quest_content::ContentPack;
use quest_core::{Env, GameConfig, GameEnv};

pub use config::ConfigOracleImpl;
pub use heroes::HeroOracleImpl;
pub use monsters::MonsterOracleImpl;
pub use steps::StepOracleImpl;
pub use world::WorldOracleImpl;

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) world: Arc<WorldOracleImpl>,
    pub(crate) steps: Arc<StepOracleImpl>,
    pub(crate) monsters: Arc<MonsterOracleImpl>,
    pub(crate) heroes: Arc<HeroOracleImpl>,
    pub(crate) config: Arc<ConfigOracleImpl>,
}

impl OracleManager {
    pub fn new(
        world: Arc<WorldOracleImpl>,
        steps: Arc<StepOracleImpl>,
        monsters: Arc<MonsterOracleImpl>,
        heroes: Arc<HeroOracleImpl>,
        config: Arc<ConfigOracleImpl>,
    ) -> Self {
        Self {
            world,
            steps,
            monsters,
            heroes,
            config,
        }
    }

    /// Builds every oracle from a loaded content pack.
    pub fn from_content(pack: ContentPack) -> Self {
        let ContentPack {
            config,
            world,
            steps,
            monsters,
            heroes,
        } = pack;

        Self::new(
            Arc::new(WorldOracleImpl::new(world)),
            Arc::new(StepOracleImpl::from_entries(steps)),
            Arc::new(MonsterOracleImpl::from_templates(monsters)),
            Arc::new(HeroOracleImpl::from_templates(heroes)),
            Arc::new(ConfigOracleImpl::new(config)),
        )
    }

    /// Converts oracle manager into GameEnv for quest-core
    pub fn as_game_env(&self) -> GameEnv<'_> {
        Env::with_all(
            self.world.as_ref(),
            self.steps.as_ref(),
            self.monsters.as_ref(),
            self.heroes.as_ref(),
            self.config.as_ref(),
        )
        .into_game_env()
    }

    pub fn game_config(&self) -> &GameConfig {
        use quest_core::ConfigOracle;
        self.config.game_config()
    }

    pub fn heroes(&self) -> &HeroOracleImpl {
        &self.heroes
    }
}
