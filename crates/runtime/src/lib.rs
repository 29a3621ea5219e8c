//! Async session shell around the `quest-core` battle engine.
//!
//! Modules are organized by responsibility:
//! - [`session`]: session orchestrator, builder, and configuration
//! - [`api`]: public handle, errors, and the puzzle dispatcher seam
//! - [`events`]: topic-based notification sink
//! - [`workers`]: the background task that owns session state and paces rounds
//! - [`oracle`]: content-backed implementations of the core oracle traits
//! - [`repository`]: persistence gateway for saved sessions
//!
//! Content and balance data come from `quest-content`; every rule lives in
//! `quest-core`. This crate only sequences commands, timing, and I/O.
pub mod api;
pub mod events;
pub mod oracle;
pub mod repository;
pub mod session;
pub mod workers;

pub use api::{
    ChannelDispatcher, NullDispatcher, PuzzleDispatcher, Result, SessionError, SessionHandle,
};
pub use events::{Event, EventBus, SessionEvent, Topic};
pub use oracle::{
    ConfigOracleImpl, HeroOracleImpl, MonsterOracleImpl, OracleManager, StepOracleImpl,
    WorldOracleImpl,
};
pub use repository::{
    FileSessionRepository, InMemorySessionRepo, RepositoryError, SessionRepository,
};
pub use session::{GameSession, GameSessionBuilder, SessionConfig};
