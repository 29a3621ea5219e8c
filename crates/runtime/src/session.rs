//! High-level session orchestrator.
//!
//! A [`GameSession`] owns the background worker for one learner, wires up the
//! command channel and event bus, and exposes a builder-based API for clients
//! to drive battles through a [`SessionHandle`].

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use quest_core::{BattleEngine, Opening, PlayerSetup, SessionId};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::{NullDispatcher, PuzzleDispatcher, Result, SessionError, SessionHandle};
use crate::events::{EventBus, SessionEvent};
use crate::oracle::OracleManager;
use crate::repository::{InMemorySessionRepo, SessionRepository};
use crate::workers::{Command, SessionWorker};

/// Session configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Pause after each hit of a round.
    pub hit_delay: Duration,
    /// Extra pause between a monster's defeat and the next spawn.
    pub spawn_delay: Duration,
    pub command_buffer_size: usize,
    pub event_buffer_size: usize,
    /// Directory for file-backed saves; `None` means [`default_save_dir`].
    pub save_dir: Option<PathBuf>,
    /// Save after every defeated monster.
    pub autosave: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            hit_delay: Duration::from_millis(300),
            spawn_delay: Duration::from_millis(800),
            command_buffer_size: 32,
            event_buffer_size: 100,
            save_dir: None,
            autosave: true,
        }
    }
}

impl SessionConfig {
    /// Configuration with pacing collapsed to zero. Outcomes are identical;
    /// only the cosmetic pauses disappear.
    pub fn instant() -> Self {
        Self {
            hit_delay: Duration::ZERO,
            spawn_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Construct session configuration from environment variables.
    ///
    /// Environment variables:
    /// - `QUEST_HIT_DELAY_MS` - Pause per hit in milliseconds (default: 300)
    /// - `QUEST_SPAWN_DELAY_MS` - Pause before the next spawn (default: 800)
    /// - `QUEST_EVENT_CAPACITY` - Event bus capacity per topic (default: 100)
    /// - `QUEST_AUTOSAVE` - Save after each defeated monster (default: true)
    /// - `SAVE_DATA_DIR` - Directory for save files
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ms) = read_env::<u64>("QUEST_HIT_DELAY_MS") {
            config.hit_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = read_env::<u64>("QUEST_SPAWN_DELAY_MS") {
            config.spawn_delay = Duration::from_millis(ms);
        }
        if let Some(capacity) = read_env::<usize>("QUEST_EVENT_CAPACITY") {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(autosave) = read_env_bool("QUEST_AUTOSAVE") {
            config.autosave = autosave;
        }
        if let Ok(dir) = env::var("SAVE_DATA_DIR")
            && !dir.is_empty()
        {
            config.save_dir = Some(PathBuf::from(dir));
        }

        config
    }

    /// Save directory to use, falling back to the platform data directory.
    pub fn resolved_save_dir(&self) -> PathBuf {
        self.save_dir.clone().unwrap_or_else(default_save_dir)
    }
}

/// Platform-specific directory for save files.
///
/// - Linux: `~/.local/share/word-quest/saves`
/// - macOS: `~/Library/Application Support/word-quest/saves`
/// - Windows: `%APPDATA%\word-quest\saves`
/// - Fallback: `./save_data`
pub fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "word-quest")
        .map(|dirs| dirs.data_dir().join("saves"))
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// One learner's running session.
///
/// Owns the worker task. Clients and the puzzle layer talk to it through
/// the cloneable [`SessionHandle`].
pub struct GameSession {
    handle: SessionHandle,
    opening: Opening,
    worker_handle: JoinHandle<()>,
}

impl GameSession {
    /// Create a new session builder
    pub fn builder() -> GameSessionBuilder {
        GameSessionBuilder::new()
    }

    /// Starts a session for `setup` with every collaborator supplied.
    pub async fn start(
        config: SessionConfig,
        oracles: OracleManager,
        repository: Arc<dyn SessionRepository>,
        dispatcher: Arc<dyn PuzzleDispatcher>,
        setup: PlayerSetup,
    ) -> Result<Self> {
        Self::builder()
            .config(config)
            .oracles(oracles)
            .repository(repository)
            .dispatcher(dispatcher)
            .start(setup)
            .await
    }

    /// Get a cloneable handle to this session
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Events and puzzle request of the first encounter.
    pub fn opening(&self) -> &Opening {
        &self.opening
    }

    /// Waits for the worker to stop.
    ///
    /// The worker stops after `end` or once every handle has been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle
            .await
            .map_err(SessionError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`GameSession`] with flexible configuration.
pub struct GameSessionBuilder {
    config: SessionConfig,
    oracles: Option<OracleManager>,
    repository: Option<Arc<dyn SessionRepository>>,
    dispatcher: Option<Arc<dyn PuzzleDispatcher>>,
    event_bus: Option<EventBus>,
    session_id: SessionId,
}

impl GameSessionBuilder {
    fn new() -> Self {
        Self {
            config: SessionConfig::default(),
            oracles: None,
            repository: None,
            dispatcher: None,
            event_bus: None,
            session_id: SessionId(1),
        }
    }

    /// Override session configuration
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Set the persistence gateway (default: in-memory)
    pub fn repository(mut self, repository: Arc<dyn SessionRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Set the puzzle dispatcher (default: [`NullDispatcher`])
    pub fn dispatcher(mut self, dispatcher: Arc<dyn PuzzleDispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Publish into an existing bus.
    ///
    /// Subscribers created on `bus` before `start` also see the opening
    /// events, which are published while the session starts.
    pub fn event_bus(mut self, bus: EventBus) -> Self {
        self.event_bus = Some(bus);
        self
    }

    /// Identity of the first session (later restores and new games count up).
    pub fn session_id(mut self, id: SessionId) -> Self {
        self.session_id = id;
        self
    }

    /// Builds the player, spawns the first encounter, and starts the worker.
    pub async fn start(self, setup: PlayerSetup) -> Result<GameSession> {
        let oracles = self.oracles.ok_or(SessionError::MissingOracles)?;
        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(InMemorySessionRepo::new()));
        let dispatcher = self
            .dispatcher
            .unwrap_or_else(|| Arc::new(NullDispatcher));
        let event_bus = self
            .event_bus
            .unwrap_or_else(|| EventBus::with_capacity(self.config.event_buffer_size));

        let game_env = oracles.as_game_env();
        let mut state = BattleEngine::create_session(game_env, self.session_id, setup.clone())?;
        let opening = BattleEngine::new(&mut state).start(game_env)?;

        event_bus.publish(SessionEvent::Started {
            session: state.session,
            player: setup.id,
        });
        for event in &opening.events {
            event_bus.publish(event.clone());
        }
        dispatcher.dispatch(opening.request.clone());

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let handle = SessionHandle::new(command_tx, event_bus.clone());

        let worker = SessionWorker::new(
            state,
            setup,
            oracles,
            repository,
            dispatcher,
            command_rx,
            event_bus,
            self.config,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(GameSession {
            handle,
            opening,
            worker_handle,
        })
    }
}
