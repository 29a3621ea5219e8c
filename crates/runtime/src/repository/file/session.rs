//! File-based SessionRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use quest_core::{PlayerId, SavedSession};

use crate::repository::{RepositoryError, Result, SessionRepository};

/// File-based implementation of SessionRepository.
///
/// Stores one snapshot per player as `session_{player}.bin` in bincode
/// format. Writes go to a temp file first and are renamed into place, so a
/// crash mid-save leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileSessionRepository {
    base_dir: PathBuf,
}

impl FileSessionRepository {
    /// Create a repository rooted at `base_dir`, creating the directory.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a player's snapshot file.
    pub fn session_path(&self, player: PlayerId) -> PathBuf {
        self.base_dir.join(format!("session_{}.bin", player.0))
    }

    /// Parses a player id out of a `session_{id}.bin` file name.
    pub fn parse_file_name(name: &str) -> Option<PlayerId> {
        name.strip_prefix("session_")
            .and_then(|rest| rest.strip_suffix(".bin"))
            .and_then(|id| id.parse::<u64>().ok())
            .map(PlayerId)
    }
}

impl SessionRepository for FileSessionRepository {
    fn save(&self, player: PlayerId, session: &SavedSession) -> Result<()> {
        let path = self.session_path(player);
        let temp_path = path.with_extension("bin.tmp");

        let bytes = bincode::serialize(session)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved {} to {}", player, path.display());

        Ok(())
    }

    fn load(&self, player: PlayerId) -> Result<Option<SavedSession>> {
        let path = self.session_path(player);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let session: SavedSession = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::CorruptedData(format!("{}: {}", path.display(), e)))?;

        if session.player_id != player {
            return Err(RepositoryError::CorruptedData(format!(
                "{} holds a snapshot for {}",
                path.display(),
                session.player_id
            )));
        }

        tracing::debug!("Loaded {} from {}", player, path.display());

        Ok(Some(session))
    }

    fn exists(&self, player: PlayerId) -> bool {
        self.session_path(player).exists()
    }

    fn delete(&self, player: PlayerId) -> Result<()> {
        let path = self.session_path(player);

        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted snapshot of {}", player);
        }

        Ok(())
    }

    fn list_players(&self) -> Result<Vec<PlayerId>> {
        let mut players = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if let Some(player) = path
                .file_name()
                .and_then(|s| s.to_str())
                .and_then(Self::parse_file_name)
            {
                players.push(player);
            }
        }

        players.sort_unstable();
        Ok(players)
    }
}
