//! Authoritative session state.
//!
//! [`SessionState`] owns the current player, monster and round bookkeeping
//! for exactly one session. Runtime layers clone or query it but mutate it
//! exclusively through [`crate::BattleEngine`].
pub mod snapshot;
pub mod types;

pub use snapshot::{MonsterSnapshot, SavedSession};
pub use types::{
    CombatRole, Combatant, EncounterId, HeroId, LocationId, Monster, MonsterTemplateId,
    MonsterTier, Player, PlayerId, PlayerProfile, ProgressionPosition, PuzzleTypeId, SessionId,
    StationId, Vitals,
};

use crate::combat::{FollowUp, RoundGuard};
use crate::puzzle::PuzzleRequest;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SessionStatus {
    /// Built but no encounter spawned yet.
    #[default]
    Pending,
    Active,
    /// The player fell. Terminal.
    Defeated,
    /// The world graph is exhausted. Terminal.
    Complete,
    /// Returned to menu. Terminal.
    Ended,
}

impl SessionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Defeated | Self::Complete | Self::Ended)
    }
}

/// What a new session is built from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSetup {
    pub id: PlayerId,
    pub display_name: String,
    pub hero: HeroId,
    pub profile: PlayerProfile,
}

impl PlayerSetup {
    pub fn new(id: PlayerId, display_name: impl Into<String>, hero: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            hero: HeroId::new(hero),
            profile: PlayerProfile::default(),
        }
    }

    #[must_use]
    pub fn with_profile(mut self, profile: PlayerProfile) -> Self {
        self.profile = profile;
        self
    }
}

/// Everything one session owns.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionState {
    pub session: SessionId,
    pub player: Player,
    /// `None` before the first spawn and after the game completes.
    pub monster: Option<Monster>,
    /// Puzzle type bound to the current step.
    pub puzzle: Option<PuzzleTypeId>,
    pub status: SessionStatus,
    pub guard: RoundGuard,
    /// Follow-up of the round currently in flight.
    pending: Option<FollowUp>,
    /// Last spawn serial handed out.
    last_encounter: EncounterId,
}

impl SessionState {
    pub fn new(session: SessionId, player: Player) -> Self {
        Self {
            session,
            player,
            monster: None,
            puzzle: None,
            status: SessionStatus::Pending,
            guard: RoundGuard::new(),
            pending: None,
            last_encounter: EncounterId::default(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    pub fn pending(&self) -> Option<FollowUp> {
        self.pending
    }

    pub(crate) fn set_pending(&mut self, follow_up: Option<FollowUp>) {
        self.pending = follow_up;
    }

    /// Allocates the serial for the next monster.
    pub(crate) fn next_encounter(&mut self) -> EncounterId {
        self.last_encounter = self.last_encounter.next();
        self.last_encounter
    }

    /// Request for the puzzle bound to the current monster, if any.
    pub fn current_request(&self) -> Option<PuzzleRequest> {
        let monster = self.monster.as_ref()?;
        let puzzle = self.puzzle.clone()?;
        Some(PuzzleRequest {
            session: self.session,
            encounter: monster.encounter,
            position: self.player.position.clone(),
            puzzle,
        })
    }

    pub fn snapshot(&self) -> SavedSession {
        SavedSession::capture(self)
    }
}
