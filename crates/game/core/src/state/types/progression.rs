use std::fmt;

use super::common::{LocationId, StationId};

/// The learner's place in the world graph.
///
/// Invariant: `step_index` lies within `[1, total_steps_per_station]`.
/// Overflowing a station is expressed as a transition to a new position, never
/// as an out-of-range index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressionPosition {
    pub location: LocationId,
    pub station: StationId,
    pub step_index: u32,
}

impl ProgressionPosition {
    pub const FIRST_STEP: u32 = 1;

    pub fn new(location: LocationId, station: StationId, step_index: u32) -> Self {
        Self {
            location,
            station,
            step_index: step_index.max(Self::FIRST_STEP),
        }
    }

    /// Position at the first step of a station.
    pub fn first_step(location: LocationId, station: StationId) -> Self {
        Self::new(location, station, Self::FIRST_STEP)
    }

    /// Returns a copy with `step_index` clamped into `[1, total_steps]`.
    ///
    /// Used when restoring a snapshot taken under a different station length.
    #[must_use]
    pub fn normalized(&self, total_steps: u32) -> Self {
        Self {
            location: self.location.clone(),
            station: self.station.clone(),
            step_index: self.step_index.clamp(Self::FIRST_STEP, total_steps.max(1)),
        }
    }

    pub fn is_last_step(&self, total_steps: u32) -> bool {
        self.step_index >= total_steps
    }
}

impl fmt::Display for ProgressionPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.location, self.station, self.step_index)
    }
}
