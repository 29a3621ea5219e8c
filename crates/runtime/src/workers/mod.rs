//! Worker tasks that back the session orchestration.
//!
//! The session worker owns the authoritative [`quest_core::SessionState`],
//! executes commands through the battle engine, and paces round follow-ups.

mod session;

pub use session::{Command, SessionWorker};
