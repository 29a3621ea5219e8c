//! Configuration oracle for exposing game configuration to the engine.

use crate::config::GameConfig;

/// Provides access to balance configuration.
pub trait ConfigOracle: Send + Sync {
    fn game_config(&self) -> &GameConfig;
}

impl ConfigOracle for GameConfig {
    fn game_config(&self) -> &GameConfig {
        self
    }
}
