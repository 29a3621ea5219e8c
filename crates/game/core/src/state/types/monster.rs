//! Monster combatants and their reward bookkeeping.

use super::combatant::{CombatRole, Combatant, Vitals};
use super::common::{EncounterId, HeroId, MonsterTemplateId};
use crate::env::MonsterTemplate;

/// Monster strength category; drives the reward policy.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MonsterTier {
    #[default]
    Normal,
    Elite,
    Boss,
    FinalBoss,
}

/// A spawned monster. Replaced by a fresh instance after every defeat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Monster {
    pub template_id: MonsterTemplateId,
    pub name: String,
    pub tier: MonsterTier,
    pub vitals: Vitals,
    pub exp_reward: u64,
    pub currency_reward: u64,
    pub unlocks_hero: Option<HeroId>,
    /// Set once the defeat reward has been paid out.
    pub has_dropped_reward: bool,
    /// Spawn serial this instance was issued under.
    pub encounter: EncounterId,
}

impl Monster {
    /// Instantiates a template at full health.
    pub fn from_template(template: &MonsterTemplate, encounter: EncounterId) -> Self {
        Self {
            template_id: template.id.clone(),
            name: template.name.clone(),
            tier: template.tier,
            vitals: Vitals::new(template.base_hp, template.attack, template.defense),
            exp_reward: template.exp_reward,
            currency_reward: template.currency_reward,
            unlocks_hero: template.unlocks_hero.clone(),
            has_dropped_reward: false,
            encounter,
        }
    }

    /// Marks the reward as paid. Returns false if it already was.
    pub fn take_reward(&mut self) -> bool {
        !std::mem::replace(&mut self.has_dropped_reward, true)
    }
}

impl Combatant for Monster {
    fn role(&self) -> CombatRole {
        CombatRole::Monster
    }

    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn tier_parses_snake_case() {
        assert_eq!(MonsterTier::from_str("final_boss"), Ok(MonsterTier::FinalBoss));
        assert_eq!(MonsterTier::from_str("Elite"), Ok(MonsterTier::Elite));
        assert_eq!(MonsterTier::Boss.to_string(), "boss");
    }

    #[test]
    fn reward_can_only_be_taken_once() {
        let template = MonsterTemplate::builder("slime").hp(12).build();
        let mut monster = Monster::from_template(&template, EncounterId(1));

        assert!(monster.take_reward());
        assert!(!monster.take_reward());
        assert!(monster.has_dropped_reward);
    }
}
