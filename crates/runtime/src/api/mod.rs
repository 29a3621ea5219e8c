//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration, workers, or infrastructure.

pub mod dispatcher;
pub mod errors;
pub mod handle;

pub use dispatcher::{ChannelDispatcher, NullDispatcher, PuzzleDispatcher};
pub use errors::{Result, SessionError};
pub use handle::SessionHandle;
