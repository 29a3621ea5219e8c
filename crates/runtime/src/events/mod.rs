//! Topic-based event bus for session notifications.
//!
//! This is the fire-and-forget sink presentation layers subscribe to. Events
//! are published to specific topics, and consumers subscribe only to the
//! topics they render.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::SessionEvent;
