//! In-memory SessionRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use quest_core::{PlayerId, SavedSession};

use crate::repository::{RepositoryError, Result, SessionRepository};

/// In-memory implementation of SessionRepository.
#[derive(Debug, Default)]
pub struct InMemorySessionRepo {
    sessions: RwLock<HashMap<PlayerId, SavedSession>>,
}

impl InMemorySessionRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a snapshot already stored for its player.
    pub fn with_session(session: SavedSession) -> Self {
        let mut sessions = HashMap::new();
        sessions.insert(session.player_id, session);
        Self {
            sessions: RwLock::new(sessions),
        }
    }
}

impl SessionRepository for InMemorySessionRepo {
    fn save(&self, player: PlayerId, session: &SavedSession) -> Result<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        sessions.insert(player, session.clone());
        Ok(())
    }

    fn load(&self, player: PlayerId) -> Result<Option<SavedSession>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(sessions.get(&player).cloned())
    }

    fn exists(&self, player: PlayerId) -> bool {
        self.sessions
            .read()
            .map(|sessions| sessions.contains_key(&player))
            .unwrap_or(false)
    }

    fn delete(&self, player: PlayerId) -> Result<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        sessions.remove(&player);
        Ok(())
    }

    fn list_players(&self) -> Result<Vec<PlayerId>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut players: Vec<PlayerId> = sessions.keys().copied().collect();
        players.sort_unstable();
        Ok(players)
    }
}
