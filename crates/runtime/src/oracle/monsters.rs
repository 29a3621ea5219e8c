//! Monster oracle implementing [`quest_core::MonsterOracle`].

use std::collections::HashMap;

use quest_core::{MonsterOracle, MonsterTemplate, MonsterTemplateId};

/// Oracle providing monster templates.
#[derive(Debug, Default)]
pub struct MonsterOracleImpl {
    templates: HashMap<MonsterTemplateId, MonsterTemplate>,
}

impl MonsterOracleImpl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_templates(templates: impl IntoIterator<Item = MonsterTemplate>) -> Self {
        let mut oracle = Self::new();
        for template in templates {
            oracle.add(template);
        }
        oracle
    }

    pub fn add(&mut self, template: MonsterTemplate) {
        self.templates.insert(template.id.clone(), template);
    }

    pub fn contains(&self, id: &MonsterTemplateId) -> bool {
        self.templates.contains_key(id)
    }
}

impl MonsterOracle for MonsterOracleImpl {
    fn template(&self, id: &MonsterTemplateId) -> Option<MonsterTemplate> {
        self.templates.get(id).cloned()
    }
}
