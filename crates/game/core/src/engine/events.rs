//! Data-only notifications produced by the battle engine.
//!
//! The engine never renders anything; presentation layers subscribe to these
//! through the runtime's event bus.

use crate::combat::{HitRecord, RoundOutcome, RoundTicket};
use crate::encounter::EncounterOrigin;
use crate::progression::ProgressionPhase;
use crate::state::{
    EncounterId, HeroId, MonsterTemplateId, MonsterTier, ProgressionPosition, PuzzleTypeId,
};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    EncounterStarted {
        encounter: EncounterId,
        monster: MonsterTemplateId,
        name: String,
        tier: MonsterTier,
        hp: u32,
        position: ProgressionPosition,
        puzzle: PuzzleTypeId,
        origin: EncounterOrigin,
    },
    RoundResolved {
        ticket: RoundTicket,
        outcome: RoundOutcome,
        hits: Vec<HitRecord>,
        player_hp: u32,
        monster_hp: u32,
    },
    MonsterDefeated {
        tier: MonsterTier,
        exp_reward: u64,
        currency_reward: u64,
    },
    HpRestored {
        amount: u32,
        hp: u32,
    },
    HeroUnlocked {
        hero_id: HeroId,
    },
    PlayerLeveledUp {
        level: u32,
    },
    PositionAdvanced {
        from: ProgressionPosition,
        to: ProgressionPosition,
        phase: ProgressionPhase,
    },
    GameComplete {
        position: ProgressionPosition,
    },
    PlayerDefeated {
        position: ProgressionPosition,
    },
}

impl BattleEvent {
    /// Short snake_case name, used for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::EncounterStarted { .. } => "encounter_started",
            Self::RoundResolved { .. } => "round_resolved",
            Self::MonsterDefeated { .. } => "monster_defeated",
            Self::HpRestored { .. } => "hp_restored",
            Self::HeroUnlocked { .. } => "hero_unlocked",
            Self::PlayerLeveledUp { .. } => "player_leveled_up",
            Self::PositionAdvanced { .. } => "position_advanced",
            Self::GameComplete { .. } => "game_complete",
            Self::PlayerDefeated { .. } => "player_defeated",
        }
    }
}
