//! Combat resolution system.
//!
//! Pure, deterministic functions that apply batches of hits between the
//! player and the current monster.
//!
//! # Core Functions
//!
//! - `calculate_damage`: per-hit damage with a floor of [`crate::GameConfig::MIN_DAMAGE`]
//! - `resolve_round`: ordered attacker groups, stopping at the first death
//!
//! The single-flight rule (one round in flight per session) is tracked by
//! [`RoundGuard`], which the battle engine keeps inside the session state.

pub mod damage;
pub mod guard;
pub mod resolver;

pub use damage::{apply_damage, calculate_damage};
pub use guard::{GuardError, RoundGuard, RoundTicket};
pub use resolver::{AttackGroup, FollowUp, HitRecord, RoundOutcome, RoundResolution, resolve_round};
