//! Oracle access errors.
//!
//! Errors related to oracle availability and world-graph consistency. Missing
//! step or monster entries are deliberately absent: the encounter factory
//! degrades to the default monster instead.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{LocationId, StationId};

/// Errors that occur when accessing Oracle data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// WorldOracle is not available in the environment.
    #[error("WorldOracle not available")]
    WorldNotAvailable,

    /// StepOracle is not available in the environment.
    #[error("StepOracle not available")]
    StepsNotAvailable,

    /// MonsterOracle is not available in the environment.
    #[error("MonsterOracle not available")]
    MonstersNotAvailable,

    /// HeroOracle is not available in the environment.
    #[error("HeroOracle not available")]
    HeroesNotAvailable,

    /// ConfigOracle is not available in the environment.
    #[error("ConfigOracle not available")]
    ConfigNotAvailable,

    /// The world graph has no location with at least one station.
    #[error("world graph has no playable location")]
    EmptyWorld,

    /// Location referenced by a progression position does not exist.
    #[error("location '{0}' not found")]
    LocationNotFound(LocationId),

    /// Station referenced by a progression position does not exist.
    #[error("station '{0}' not found")]
    StationNotFound(StationId),

    /// The world oracle returned a "next" entry that does not move forward.
    #[error("world graph order key {returned} does not follow {after}")]
    OrderNotIncreasing { after: u32, returned: u32 },
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            // Missing oracles are fatal - engine cannot proceed
            WorldNotAvailable | StepsNotAvailable | MonstersNotAvailable | HeroesNotAvailable
            | ConfigNotAvailable | EmptyWorld => ErrorSeverity::Fatal,

            // Not found errors are validation errors - invalid references
            LocationNotFound(_) | StationNotFound(_) => ErrorSeverity::Validation,

            OrderNotIncreasing { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            WorldNotAvailable => "ORACLE_WORLD_NOT_AVAILABLE",
            StepsNotAvailable => "ORACLE_STEPS_NOT_AVAILABLE",
            MonstersNotAvailable => "ORACLE_MONSTERS_NOT_AVAILABLE",
            HeroesNotAvailable => "ORACLE_HEROES_NOT_AVAILABLE",
            ConfigNotAvailable => "ORACLE_CONFIG_NOT_AVAILABLE",
            EmptyWorld => "ORACLE_EMPTY_WORLD",
            LocationNotFound(_) => "ORACLE_LOCATION_NOT_FOUND",
            StationNotFound(_) => "ORACLE_STATION_NOT_FOUND",
            OrderNotIncreasing { .. } => "ORACLE_ORDER_NOT_INCREASING",
        }
    }
}
