//! Repository contract for saving and loading sessions.

use quest_core::{PlayerId, SavedSession};

use super::Result;

/// Persistence gateway for saved sessions.
///
/// Keyed by player identity: at most one snapshot exists per player, and a
/// save replaces the previous one.
pub trait SessionRepository: Send + Sync {
    fn save(&self, player: PlayerId, session: &SavedSession) -> Result<()>;

    /// Returns `None` when the player has no snapshot.
    fn load(&self, player: PlayerId) -> Result<Option<SavedSession>>;

    /// Removes the player's snapshot. Deleting a missing snapshot succeeds.
    fn delete(&self, player: PlayerId) -> Result<()>;

    fn exists(&self, player: PlayerId) -> bool {
        matches!(self.load(player), Ok(Some(_)))
    }

    /// List players with a stored snapshot, sorted.
    fn list_players(&self) -> Result<Vec<PlayerId>> {
        Ok(vec![])
    }
}
