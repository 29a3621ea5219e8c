//! Monster template definitions and oracle interface.
//!
//! Templates are authored as data and spawned into [`crate::Monster`]
//! instances by the encounter factory.

use crate::config::FallbackMonster;
use crate::config::GameConfig;
use crate::state::{HeroId, MonsterTemplateId, MonsterTier};

/// Static description of a monster kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterTemplate {
    pub id: MonsterTemplateId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tier: MonsterTier,
    pub base_hp: u32,
    pub attack: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub exp_reward: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub currency_reward: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub unlocks_hero: Option<HeroId>,
}

impl MonsterTemplate {
    /// Create a builder for constructing monster templates
    pub fn builder(id: impl Into<String>) -> MonsterTemplateBuilder {
        MonsterTemplateBuilder::new(id)
    }

    /// The documented default monster, used whenever content is missing.
    pub fn fallback(stats: &FallbackMonster) -> Self {
        Self {
            id: MonsterTemplateId::new(GameConfig::FALLBACK_MONSTER_ID),
            name: stats.name.clone(),
            tier: MonsterTier::Normal,
            base_hp: stats.base_hp,
            attack: stats.attack,
            defense: stats.defense,
            exp_reward: stats.exp_reward,
            currency_reward: stats.currency_reward,
            unlocks_hero: None,
        }
    }
}

/// Builder for constructing monster templates.
pub struct MonsterTemplateBuilder {
    template: MonsterTemplate,
}

impl MonsterTemplateBuilder {
    fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            template: MonsterTemplate {
                name: id.clone(),
                id: MonsterTemplateId(id),
                tier: MonsterTier::Normal,
                base_hp: 10,
                attack: 1,
                defense: 0,
                exp_reward: 0,
                currency_reward: 0,
                unlocks_hero: None,
            },
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.template.name = name.into();
        self
    }

    pub fn tier(mut self, tier: MonsterTier) -> Self {
        self.template.tier = tier;
        self
    }

    pub fn hp(mut self, base_hp: u32) -> Self {
        self.template.base_hp = base_hp;
        self
    }

    pub fn attack(mut self, attack: u32) -> Self {
        self.template.attack = attack;
        self
    }

    pub fn defense(mut self, defense: u32) -> Self {
        self.template.defense = defense;
        self
    }

    pub fn rewards(mut self, exp: u64, currency: u64) -> Self {
        self.template.exp_reward = exp;
        self.template.currency_reward = currency;
        self
    }

    pub fn unlocks_hero(mut self, hero: impl Into<String>) -> Self {
        self.template.unlocks_hero = Some(HeroId::new(hero));
        self
    }

    pub fn build(self) -> MonsterTemplate {
        self.template
    }
}

/// Oracle providing monster templates by id.
pub trait MonsterOracle: Send + Sync {
    fn template(&self, id: &MonsterTemplateId) -> Option<MonsterTemplate>;
}
