//! Hero oracle implementing [`quest_core::HeroOracle`].

use std::collections::HashMap;

use quest_core::{HeroId, HeroOracle, HeroTemplate};

/// Oracle providing selectable hero templates.
#[derive(Debug, Default)]
pub struct HeroOracleImpl {
    heroes: HashMap<HeroId, HeroTemplate>,
}

impl HeroOracleImpl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_templates(heroes: impl IntoIterator<Item = HeroTemplate>) -> Self {
        let mut oracle = Self::new();
        for hero in heroes {
            oracle.add(hero);
        }
        oracle
    }

    pub fn add(&mut self, hero: HeroTemplate) {
        self.heroes.insert(hero.id.clone(), hero);
    }

    /// Hero ids sorted for stable listings.
    pub fn ids(&self) -> Vec<HeroId> {
        let mut ids: Vec<_> = self.heroes.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl HeroOracle for HeroOracleImpl {
    fn hero(&self, id: &HeroId) -> Option<HeroTemplate> {
        self.heroes.get(id).cloned()
    }
}
