pub mod combatant;
pub mod common;
pub mod monster;
pub mod player;
pub mod progression;

// Re-export combatant capability types
pub use combatant::{CombatRole, Combatant, Vitals};

// Re-export identifiers
pub use common::{
    EncounterId, HeroId, LocationId, MonsterTemplateId, PlayerId, PuzzleTypeId, SessionId,
    StationId,
};

// Re-export combatants
pub use monster::{Monster, MonsterTier};
pub use player::{Player, PlayerProfile};

// Re-export progression position
pub use progression::ProgressionPosition;
