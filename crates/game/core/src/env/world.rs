use crate::state::{LocationId, StationId};

/// Top level of the world graph.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    /// Strictly increasing traversal key.
    pub order: u32,
}

/// A station inside a location; holds `total_steps_per_station` steps.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    pub id: StationId,
    pub location: LocationId,
    pub name: String,
    /// Traversal key, unique within the owning location.
    pub order: u32,
}

/// Read-only world graph provider.
///
/// "Next" always means the lowest order key strictly greater than the given
/// one. There is no wraparound.
pub trait WorldOracle: Send + Sync {
    fn first_location(&self) -> Option<Location>;

    fn first_station(&self, location: &LocationId) -> Option<Station>;

    fn next_station(&self, location: &LocationId, after_order: u32) -> Option<Station>;

    fn next_location(&self, after_order: u32) -> Option<Location>;

    fn location(&self, id: &LocationId) -> Option<Location>;

    fn station(&self, id: &StationId) -> Option<Station>;
}
