//! Deterministic battle and progression rules for the word-quest game.
//!
//! `quest-core` defines the canonical rules (combat rounds, world-graph
//! progression, encounter spawning, the word-search generator) and exposes
//! pure APIs that are reused by the runtime and offline tools. All session
//! mutation flows through [`engine::BattleEngine`]; content reaches the core
//! only through the read-only oracles in [`env`].
pub mod combat;
pub mod config;
pub mod encounter;
pub mod engine;
pub mod env;
pub mod error;
pub mod progression;
pub mod puzzle;
pub mod state;

pub use combat::{
    AttackGroup, FollowUp, GuardError, HitRecord, RoundGuard, RoundOutcome, RoundResolution,
    RoundTicket, calculate_damage, resolve_round,
};
pub use config::{FallbackMonster, GameConfig, GridRules, GrowthRules, RewardTable};
pub use encounter::{Encounter, EncounterFactory, EncounterOrigin, FallbackReason};
pub use engine::{
    BattleEngine, BattleError, BattleEvent, Opening, RoundCompletion, RoundReport,
    is_fallback_spawn,
};
pub use env::{
    ConfigOracle, Env, GameEnv, HeroOracle, HeroTemplate, Location, MonsterOracle,
    MonsterTemplate, OracleError, Station, StepConfig, StepOracle, WorldOracle,
};
pub use error::{ErrorSeverity, GameError};
pub use progression::{ProgressionPhase, ProgressionTracker, RewardSummary, Transition};
pub use puzzle::{
    GridPos, Orientation, Placement, PuzzleGrid, PuzzleRequest, PuzzleSignal, WordPlacement,
    WordSearch,
};
pub use state::{
    CombatRole, Combatant, EncounterId, HeroId, LocationId, Monster, MonsterSnapshot,
    MonsterTemplateId, MonsterTier, Player, PlayerId, PlayerProfile, PlayerSetup,
    ProgressionPosition, PuzzleTypeId, SavedSession, SessionId, SessionState, SessionStatus,
    StationId, Vitals,
};
