//! Traits describing read-only game content.
//!
//! Oracles expose the world graph, per-step configuration, monster and hero
//! templates, and balance configuration. The [`Env`] aggregate bundles them so
//! the engine can access everything it needs without hard coupling to concrete
//! implementations.
mod config;
mod error;
mod heroes;
mod monsters;
mod steps;
mod world;

pub use config::ConfigOracle;
pub use error::OracleError;
pub use heroes::{HeroOracle, HeroTemplate};
pub use monsters::{MonsterOracle, MonsterTemplate, MonsterTemplateBuilder};
pub use steps::{StepConfig, StepOracle};
pub use world::{Location, Station, WorldOracle};

use crate::config::GameConfig;

/// Aggregates read-only oracles required by the battle engine.
#[derive(Debug)]
pub struct Env<'a, W, S, M, H, C>
where
    W: WorldOracle + ?Sized,
    S: StepOracle + ?Sized,
    M: MonsterOracle + ?Sized,
    H: HeroOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
    world: Option<&'a W>,
    steps: Option<&'a S>,
    monsters: Option<&'a M>,
    heroes: Option<&'a H>,
    config: Option<&'a C>,
}

// Manual impls: the derives would demand `W: Clone`, which trait objects lack.
impl<W, S, M, H, C> Clone for Env<'_, W, S, M, H, C>
where
    W: WorldOracle + ?Sized,
    S: StepOracle + ?Sized,
    M: MonsterOracle + ?Sized,
    H: HeroOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<W, S, M, H, C> Copy for Env<'_, W, S, M, H, C>
where
    W: WorldOracle + ?Sized,
    S: StepOracle + ?Sized,
    M: MonsterOracle + ?Sized,
    H: HeroOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
}

pub type GameEnv<'a> = Env<
    'a,
    dyn WorldOracle + 'a,
    dyn StepOracle + 'a,
    dyn MonsterOracle + 'a,
    dyn HeroOracle + 'a,
    dyn ConfigOracle + 'a,
>;

impl<'a, W, S, M, H, C> Env<'a, W, S, M, H, C>
where
    W: WorldOracle + ?Sized,
    S: StepOracle + ?Sized,
    M: MonsterOracle + ?Sized,
    H: HeroOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
    pub fn new(
        world: Option<&'a W>,
        steps: Option<&'a S>,
        monsters: Option<&'a M>,
        heroes: Option<&'a H>,
        config: Option<&'a C>,
    ) -> Self {
        Self {
            world,
            steps,
            monsters,
            heroes,
            config,
        }
    }

    pub fn with_all(
        world: &'a W,
        steps: &'a S,
        monsters: &'a M,
        heroes: &'a H,
        config: &'a C,
    ) -> Self {
        Self::new(
            Some(world),
            Some(steps),
            Some(monsters),
            Some(heroes),
            Some(config),
        )
    }

    pub fn empty() -> Self {
        Self {
            world: None,
            steps: None,
            monsters: None,
            heroes: None,
            config: None,
        }
    }

    /// Returns the WorldOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::WorldNotAvailable` if no world oracle was provided.
    pub fn world(&self) -> Result<&'a W, OracleError> {
        self.world.ok_or(OracleError::WorldNotAvailable)
    }

    /// Returns the StepOracle, or an error if not available.
    pub fn steps(&self) -> Result<&'a S, OracleError> {
        self.steps.ok_or(OracleError::StepsNotAvailable)
    }

    /// Returns the MonsterOracle, or an error if not available.
    pub fn monsters(&self) -> Result<&'a M, OracleError> {
        self.monsters.ok_or(OracleError::MonstersNotAvailable)
    }

    /// Returns the HeroOracle, or an error if not available.
    pub fn heroes(&self) -> Result<&'a H, OracleError> {
        self.heroes.ok_or(OracleError::HeroesNotAvailable)
    }

    /// Returns the ConfigOracle, or an error if not available.
    pub fn config(&self) -> Result<&'a C, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }

    /// Shortcut for the balance configuration behind the config oracle.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ConfigNotAvailable` if no config oracle was provided.
    pub fn game_config(&self) -> Result<&'a GameConfig, OracleError> {
        Ok(self.config()?.game_config())
    }
}

impl<'a, W, S, M, H, C> Env<'a, W, S, M, H, C>
where
    W: WorldOracle + 'a,
    S: StepOracle + 'a,
    M: MonsterOracle + 'a,
    H: HeroOracle + 'a,
    C: ConfigOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv` (consumes self).
    pub fn into_game_env(self) -> GameEnv<'a> {
        self.as_game_env()
    }

    /// Converts this environment into a trait-object based `GameEnv` (borrows self).
    pub fn as_game_env(&self) -> GameEnv<'a> {
        let world: Option<&'a dyn WorldOracle> = self.world.map(|world| world as _);
        let steps: Option<&'a dyn StepOracle> = self.steps.map(|steps| steps as _);
        let monsters: Option<&'a dyn MonsterOracle> = self.monsters.map(|monsters| monsters as _);
        let heroes: Option<&'a dyn HeroOracle> = self.heroes.map(|heroes| heroes as _);
        let config: Option<&'a dyn ConfigOracle> = self.config.map(|config| config as _);
        Env::new(world, steps, monsters, heroes, config)
    }
}
