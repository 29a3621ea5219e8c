//! World-graph traversal: step, station, location, game complete.
//!
//! [`ProgressionTracker`] is stateless apart from the station length; the
//! current position lives on the player. Advancing consults the
//! [`WorldOracle`] for "next" entries, which are always the lowest order key
//! strictly greater than the current one.

pub mod reward;

pub use reward::{RewardSummary, claim_reward};

use crate::config::GameConfig;
use crate::env::{OracleError, WorldOracle};
use crate::state::ProgressionPosition;

/// Coarse state of the progression machine after an advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ProgressionPhase {
    InStation,
    StationComplete,
    LocationComplete,
    GameComplete,
}

/// Result of advancing past a defeated monster.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transition {
    /// Next step in the same station.
    Step(ProgressionPosition),
    /// First step of the next station in the same location.
    Station(ProgressionPosition),
    /// First step of the first station of the next location.
    Location(ProgressionPosition),
    /// No next location exists. Terminal.
    GameComplete,
}

impl Transition {
    pub fn phase(&self) -> ProgressionPhase {
        match self {
            Self::Step(_) => ProgressionPhase::InStation,
            Self::Station(_) => ProgressionPhase::StationComplete,
            Self::Location(_) => ProgressionPhase::LocationComplete,
            Self::GameComplete => ProgressionPhase::GameComplete,
        }
    }

    pub fn position(&self) -> Option<&ProgressionPosition> {
        match self {
            Self::Step(pos) | Self::Station(pos) | Self::Location(pos) => Some(pos),
            Self::GameComplete => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressionTracker {
    total_steps: u32,
}

impl ProgressionTracker {
    pub fn new(total_steps: u32) -> Self {
        Self {
            total_steps: total_steps.max(1),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.steps_per_station())
    }

    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    /// Step 1 of the first station of the first playable location.
    ///
    /// Locations without stations are skipped.
    ///
    /// # Errors
    ///
    /// `OracleError::EmptyWorld` if no location has a station.
    pub fn start_position<W>(&self, world: &W) -> Result<ProgressionPosition, OracleError>
    where
        W: WorldOracle + ?Sized,
    {
        let first = world.first_location().ok_or(OracleError::EmptyWorld)?;
        if let Some(station) = world.first_station(&first.id) {
            return Ok(ProgressionPosition::first_step(first.id, station.id));
        }
        match self.next_playable_location(world, first.order)? {
            Some(position) => Ok(position),
            None => Err(OracleError::EmptyWorld),
        }
    }

    /// Advances `position` past the current step.
    ///
    /// # Errors
    ///
    /// Fails when the position references a station or location the world
    /// does not know, or when the world returns a non-increasing order key.
    pub fn advance<W>(
        &self,
        world: &W,
        position: &ProgressionPosition,
    ) -> Result<Transition, OracleError>
    where
        W: WorldOracle + ?Sized,
    {
        let position = position.normalized(self.total_steps);
        if !position.is_last_step(self.total_steps) {
            return Ok(Transition::Step(ProgressionPosition {
                step_index: position.step_index + 1,
                ..position
            }));
        }

        let station = world
            .station(&position.station)
            .ok_or_else(|| OracleError::StationNotFound(position.station.clone()))?;
        if let Some(next) = world.next_station(&position.location, station.order) {
            ensure_increasing(station.order, next.order)?;
            return Ok(Transition::Station(ProgressionPosition::first_step(
                position.location.clone(),
                next.id,
            )));
        }

        let location = world
            .location(&position.location)
            .ok_or_else(|| OracleError::LocationNotFound(position.location.clone()))?;
        Ok(self
            .next_playable_location(world, location.order)?
            .map_or(Transition::GameComplete, Transition::Location))
    }

    fn next_playable_location<W>(
        &self,
        world: &W,
        mut after: u32,
    ) -> Result<Option<ProgressionPosition>, OracleError>
    where
        W: WorldOracle + ?Sized,
    {
        while let Some(location) = world.next_location(after) {
            ensure_increasing(after, location.order)?;
            if let Some(station) = world.first_station(&location.id) {
                return Ok(Some(ProgressionPosition::first_step(location.id, station.id)));
            }
            after = location.order;
        }
        Ok(None)
    }
}

fn ensure_increasing(after: u32, returned: u32) -> Result<(), OracleError> {
    if returned > after {
        Ok(())
    } else {
        Err(OracleError::OrderNotIncreasing { after, returned })
    }
}
