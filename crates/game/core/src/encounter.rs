//! Resolves a progression position to a concrete monster.
//!
//! Missing content never fails a session: a step without configuration, or
//! configuration naming an unknown template, yields the default monster from
//! [`GameConfig::fallback_monster`]. The reason is carried in
//! [`EncounterOrigin`] so callers can log it.

use crate::config::GameConfig;
use crate::env::{MonsterOracle, MonsterTemplate, StepOracle};
use crate::state::{EncounterId, Monster, MonsterTemplateId, ProgressionPosition, PuzzleTypeId};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FallbackReason {
    /// No step configuration for the position.
    MissingStep,
    /// The step names a template the monster oracle does not know.
    MissingTemplate(MonsterTemplateId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncounterOrigin {
    Configured,
    Fallback(FallbackReason),
}

impl EncounterOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// A freshly spawned monster plus the puzzle type to fight it with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encounter {
    pub monster: Monster,
    pub puzzle: PuzzleTypeId,
    pub position: ProgressionPosition,
    pub origin: EncounterOrigin,
}

pub struct EncounterFactory<'a, S, M>
where
    S: StepOracle + ?Sized,
    M: MonsterOracle + ?Sized,
{
    steps: &'a S,
    monsters: &'a M,
    config: &'a GameConfig,
}

impl<'a, S, M> EncounterFactory<'a, S, M>
where
    S: StepOracle + ?Sized,
    M: MonsterOracle + ?Sized,
{
    pub fn new(steps: &'a S, monsters: &'a M, config: &'a GameConfig) -> Self {
        Self {
            steps,
            monsters,
            config,
        }
    }

    /// Spawns the monster for `position` at full health.
    pub fn spawn(&self, position: &ProgressionPosition, encounter: EncounterId) -> Encounter {
        let (template, puzzle, origin) =
            match self.steps.lookup(&position.station, position.step_index) {
                None => (
                    self.fallback_template(),
                    self.config.default_puzzle_type.clone(),
                    EncounterOrigin::Fallback(FallbackReason::MissingStep),
                ),
                Some(step) => match self.monsters.template(&step.monster) {
                    Some(template) => (template, step.puzzle, EncounterOrigin::Configured),
                    None => (
                        self.fallback_template(),
                        step.puzzle,
                        EncounterOrigin::Fallback(FallbackReason::MissingTemplate(step.monster)),
                    ),
                },
            };

        Encounter {
            monster: Monster::from_template(&template, encounter),
            puzzle,
            position: position.clone(),
            origin,
        }
    }

    fn fallback_template(&self) -> MonsterTemplate {
        MonsterTemplate::fallback(&self.config.fallback_monster)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::env::StepConfig;
    use crate::state::{Combatant, MonsterTier, StationId};

    #[derive(Default)]
    struct Steps(HashMap<(StationId, u32), StepConfig>);

    impl StepOracle for Steps {
        fn lookup(&self, station: &StationId, step_index: u32) -> Option<StepConfig> {
            self.0.get(&(station.clone(), step_index)).cloned()
        }
    }

    #[derive(Default)]
    struct Monsters(HashMap<MonsterTemplateId, MonsterTemplate>);

    impl MonsterOracle for Monsters {
        fn template(&self, id: &MonsterTemplateId) -> Option<MonsterTemplate> {
            self.0.get(id).cloned()
        }
    }

    fn position(step: u32) -> ProgressionPosition {
        ProgressionPosition::new("forest".into(), "gate".into(), step)
    }

    fn fixtures() -> (Steps, Monsters) {
        let mut steps = Steps::default();
        steps.0.insert(
            ("gate".into(), 1),
            StepConfig {
                monster: "wolf".into(),
                puzzle: "spelling".into(),
            },
        );
        steps.0.insert(
            ("gate".into(), 2),
            StepConfig {
                monster: "ghost".into(),
                puzzle: "fill_blank".into(),
            },
        );
        let mut monsters = Monsters::default();
        monsters.0.insert(
            "wolf".into(),
            MonsterTemplate::builder("wolf")
                .tier(MonsterTier::Elite)
                .hp(40)
                .build(),
        );
        (steps, monsters)
    }

    #[test]
    fn configured_step_spawns_template_at_full_hp() {
        let (steps, monsters) = fixtures();
        let config = GameConfig::default();
        let factory = EncounterFactory::new(&steps, &monsters, &config);

        let encounter = factory.spawn(&position(1), EncounterId(3));

        assert_eq!(encounter.origin, EncounterOrigin::Configured);
        assert_eq!(encounter.monster.template_id, MonsterTemplateId::new("wolf"));
        assert_eq!(encounter.monster.hp(), 40);
        assert_eq!(encounter.monster.vitals.max_hp(), 40);
        assert!(!encounter.monster.has_dropped_reward);
        assert_eq!(encounter.monster.encounter, EncounterId(3));
        assert_eq!(encounter.puzzle, PuzzleTypeId::new("spelling"));
    }

    #[test]
    fn missing_step_yields_default_monster() {
        let (steps, monsters) = fixtures();
        let config = GameConfig::default();
        let factory = EncounterFactory::new(&steps, &monsters, &config);

        let encounter = factory.spawn(&position(7), EncounterId(1));

        assert_eq!(
            encounter.origin,
            EncounterOrigin::Fallback(FallbackReason::MissingStep)
        );
        assert_eq!(
            encounter.monster.template_id.as_str(),
            GameConfig::FALLBACK_MONSTER_ID
        );
        assert_eq!(encounter.monster.tier, MonsterTier::Normal);
        assert_eq!(encounter.monster.hp(), config.fallback_monster.base_hp);
        assert_eq!(encounter.puzzle, config.default_puzzle_type);
    }

    #[test]
    fn unknown_template_keeps_configured_puzzle() {
        let (steps, monsters) = fixtures();
        let config = GameConfig::default();
        let factory = EncounterFactory::new(&steps, &monsters, &config);

        let encounter = factory.spawn(&position(2), EncounterId(1));

        assert_eq!(
            encounter.origin,
            EncounterOrigin::Fallback(FallbackReason::MissingTemplate("ghost".into()))
        );
        assert_eq!(encounter.puzzle, PuzzleTypeId::new("fill_blank"));
        assert!(encounter.origin.is_fallback());
    }
}
