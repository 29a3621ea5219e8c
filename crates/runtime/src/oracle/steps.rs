//! Step configuration served through [`quest_core::StepOracle`].

use std::collections::HashMap;

use quest_content::StepEntry;
use quest_core::{StationId, StepConfig, StepOracle};

/// Oracle mapping `(station, step)` to the monster and puzzle of that step.
#[derive(Debug, Default)]
pub struct StepOracleImpl {
    steps: HashMap<(StationId, u32), StepConfig>,
}

impl StepOracleImpl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = StepEntry>) -> Self {
        let mut oracle = Self::new();
        for entry in entries {
            let config = entry.config();
            oracle.add(entry.station, entry.step, config);
        }
        oracle
    }

    /// Registers a step, replacing any previous entry for the same key.
    pub fn add(&mut self, station: StationId, step: u32, config: StepConfig) {
        self.steps.insert((station, step), config);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl StepOracle for StepOracleImpl {
    fn lookup(&self, station: &StationId, step_index: u32) -> Option<StepConfig> {
        self.steps.get(&(station.clone(), step_index)).cloned()
    }
}
