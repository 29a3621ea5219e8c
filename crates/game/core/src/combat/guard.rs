//! Single-flight bookkeeping for combat rounds.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EncounterId, SessionId};

/// Identity a round was issued under.
///
/// Completing a round requires presenting the same ticket; a ticket issued
/// for an earlier session or monster is stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundTicket {
    pub session: SessionId,
    pub encounter: EncounterId,
    /// Per-session round serial.
    pub round: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GuardError {
    #[error("round {} is still in flight", .0.round)]
    RoundInFlight(RoundTicket),

    #[error("no round in flight")]
    NoRoundInFlight,

    #[error("stale round ticket {presented:?}, expected {expected:?}")]
    StaleRound {
        presented: RoundTicket,
        expected: RoundTicket,
    },
}

impl GameError for GuardError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::RoundInFlight(_) | Self::StaleRound { .. } => ErrorSeverity::Recoverable,
            Self::NoRoundInFlight => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::RoundInFlight(_) => "GUARD_ROUND_IN_FLIGHT",
            Self::NoRoundInFlight => "GUARD_NO_ROUND_IN_FLIGHT",
            Self::StaleRound { .. } => "GUARD_STALE_ROUND",
        }
    }
}

/// At most one round per session may be between `begin` and `complete`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundGuard {
    in_flight: Option<RoundTicket>,
    issued: u64,
}

impl RoundGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_none()
    }

    pub fn in_flight(&self) -> Option<RoundTicket> {
        self.in_flight
    }

    /// Opens a round. Fails without touching the guard if one is open.
    pub fn begin(
        &mut self,
        session: SessionId,
        encounter: EncounterId,
    ) -> Result<RoundTicket, GuardError> {
        if let Some(open) = self.in_flight {
            return Err(GuardError::RoundInFlight(open));
        }
        self.issued += 1;
        let ticket = RoundTicket {
            session,
            encounter,
            round: self.issued,
        };
        self.in_flight = Some(ticket);
        Ok(ticket)
    }

    /// Checks that `ticket` is the open round without closing it.
    pub fn check(&self, ticket: &RoundTicket) -> Result<(), GuardError> {
        match self.in_flight {
            None => Err(GuardError::NoRoundInFlight),
            Some(open) if open != *ticket => Err(GuardError::StaleRound {
                presented: *ticket,
                expected: open,
            }),
            Some(_) => Ok(()),
        }
    }

    /// Closes the round opened for `ticket`.
    pub fn complete(&mut self, ticket: &RoundTicket) -> Result<(), GuardError> {
        self.check(ticket)?;
        self.in_flight = None;
        Ok(())
    }

    /// Drops the open round, if any, and returns its ticket.
    pub fn cancel(&mut self) -> Option<RoundTicket> {
        self.in_flight.take()
    }
}
