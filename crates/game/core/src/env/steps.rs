use crate::state::{MonsterTemplateId, PuzzleTypeId, StationId};

/// Content bound to a single step.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepConfig {
    pub monster: MonsterTemplateId,
    pub puzzle: PuzzleTypeId,
}

/// Read-only step-configuration provider.
///
/// A `None` lookup is an expected condition (content not authored yet) and is
/// handled by the encounter factory.
pub trait StepOracle: Send + Sync {
    fn lookup(&self, station: &StationId, step_index: u32) -> Option<StepConfig>;
}
