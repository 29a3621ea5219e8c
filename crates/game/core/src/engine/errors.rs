//! Errors surfaced by the battle engine.

use crate::combat::{GuardError, RoundTicket};
use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{HeroId, SessionStatus};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleError {
    /// A round was requested while another is still in flight.
    #[error("round {} is still in flight", .0.round)]
    RoundInFlight(RoundTicket),

    #[error("no round in flight")]
    NoRoundInFlight,

    /// A continuation was issued for an earlier session or monster.
    #[error("stale round ticket {presented:?}, current round is {expected:?}")]
    StaleRound {
        presented: RoundTicket,
        expected: RoundTicket,
    },

    #[error("a correct answer must carry at least one hit")]
    InvalidHits,

    #[error("session is {0}, not active")]
    SessionInactive(SessionStatus),

    #[error("no monster spawned")]
    NoEncounter,

    #[error("hero '{0}' not found")]
    UnknownHero(HeroId),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl From<GuardError> for BattleError {
    fn from(error: GuardError) -> Self {
        match error {
            GuardError::RoundInFlight(ticket) => Self::RoundInFlight(ticket),
            GuardError::NoRoundInFlight => Self::NoRoundInFlight,
            GuardError::StaleRound {
                presented,
                expected,
            } => Self::StaleRound {
                presented,
                expected,
            },
        }
    }
}

impl BattleError {
    /// True for rejections that leave the session untouched and can simply be
    /// ignored by the caller.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::RoundInFlight(_) | Self::StaleRound { .. } | Self::NoRoundInFlight
        )
    }
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::RoundInFlight(_) | Self::StaleRound { .. } => ErrorSeverity::Recoverable,
            Self::NoRoundInFlight | Self::InvalidHits | Self::SessionInactive(_) => {
                ErrorSeverity::Validation
            }
            Self::NoEncounter => ErrorSeverity::Internal,
            Self::UnknownHero(_) => ErrorSeverity::Validation,
            Self::Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::RoundInFlight(_) => "BATTLE_ROUND_IN_FLIGHT",
            Self::NoRoundInFlight => "BATTLE_NO_ROUND_IN_FLIGHT",
            Self::StaleRound { .. } => "BATTLE_STALE_ROUND",
            Self::InvalidHits => "BATTLE_INVALID_HITS",
            Self::SessionInactive(_) => "BATTLE_SESSION_INACTIVE",
            Self::NoEncounter => "BATTLE_NO_ENCOUNTER",
            Self::UnknownHero(_) => "BATTLE_UNKNOWN_HERO",
            Self::Oracle(error) => error.error_code(),
        }
    }
}
