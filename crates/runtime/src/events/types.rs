//! Session lifecycle events emitted by the runtime itself.

use quest_core::{PlayerId, RoundTicket, SessionId};
use serde::{Deserialize, Serialize};

/// Lifecycle notifications that do not originate in the battle engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    Started {
        session: SessionId,
        player: PlayerId,
    },
    Restored {
        session: SessionId,
        player: PlayerId,
    },
    Saved {
        player: PlayerId,
    },
    /// The persistence gateway failed; the session keeps running in memory.
    SaveFailed {
        player: PlayerId,
        reason: String,
    },
    /// A paced continuation was dropped before it applied.
    RoundCancelled {
        ticket: RoundTicket,
    },
    Ended {
        session: SessionId,
    },
}
