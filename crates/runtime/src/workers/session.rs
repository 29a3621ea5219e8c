//! Session worker that owns the authoritative [`quest_core::SessionState`].
//!
//! Receives commands from [`SessionHandle`](crate::SessionHandle), runs them
//! through [`quest_core::BattleEngine`], and publishes events to the
//! [`EventBus`]. After a round resolves the worker paces its hits and only
//! then applies the follow-up; commands that arrive meanwhile are still
//! served, so `end`, `restore` and `new_game` cancel the pending follow-up
//! instead of waiting behind it.

use std::sync::Arc;
use std::time::Duration;

use quest_core::{
    BattleEngine, BattleError, BattleEvent, CombatRole, FollowUp, PlayerSetup, PuzzleRequest,
    PuzzleSignal, RoundReport, RoundTicket, SavedSession, SessionState, is_fallback_spawn,
};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::api::{PuzzleDispatcher, Result, SessionError};
use crate::events::{EventBus, SessionEvent};
use crate::oracle::OracleManager;
use crate::repository::SessionRepository;
use crate::session::SessionConfig;

/// Commands that can be sent to the session worker
pub enum Command {
    /// A puzzle signal from the puzzle layer.
    Signal {
        signal: PuzzleSignal,
        reply: oneshot::Sender<Result<RoundReport>>,
    },
    /// Persist the current session.
    Save {
        reply: oneshot::Sender<Result<SavedSession>>,
    },
    /// Replace the session with a snapshot.
    Restore {
        saved: Box<SavedSession>,
        reply: oneshot::Sender<Result<PuzzleRequest>>,
    },
    /// Restore the stored snapshot of this player, if any.
    Resume {
        reply: oneshot::Sender<Result<Option<PuzzleRequest>>>,
    },
    /// Delete the stored snapshot and start from the first station.
    NewGame {
        reply: oneshot::Sender<Result<PuzzleRequest>>,
    },
    /// End the session and stop the worker.
    End {
        reply: oneshot::Sender<Option<RoundTicket>>,
    },
    /// Query the current session state (read-only).
    Query { reply: oneshot::Sender<SessionState> },
}

/// What the worker loop does after a command.
enum Flow {
    Idle,
    /// A round resolved; its follow-up waits `delay`.
    Pace { ticket: RoundTicket, delay: Duration },
    Stop,
}

/// Background task that processes session commands.
pub struct SessionWorker {
    state: SessionState,
    setup: PlayerSetup,
    oracles: OracleManager,
    repository: Arc<dyn SessionRepository>,
    dispatcher: Arc<dyn PuzzleDispatcher>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    config: SessionConfig,
}

impl SessionWorker {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        state: SessionState,
        setup: PlayerSetup,
        oracles: OracleManager,
        repository: Arc<dyn SessionRepository>,
        dispatcher: Arc<dyn PuzzleDispatcher>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        config: SessionConfig,
    ) -> Self {
        info!(
            "SessionWorker initialized for {} at {} ({})",
            setup.id, state.player.position, state.session
        );

        Self {
            state,
            setup,
            oracles,
            repository,
            dispatcher,
            command_rx,
            event_bus,
            config,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            let flow = match self.handle_command(cmd) {
                Flow::Pace { ticket, delay } => self.pace(ticket, delay).await,
                flow => flow,
            };
            if matches!(flow, Flow::Stop) {
                break;
            }
        }

        info!("SessionWorker stopped ({})", self.state.session);
    }

    /// Waits out the round's pacing, then applies its follow-up.
    ///
    /// Commands received while waiting are handled immediately. If one of
    /// them replaces or ends the session, `ticket` is no longer the open
    /// round and the follow-up is dropped.
    async fn pace(&mut self, ticket: RoundTicket, delay: Duration) -> Flow {
        let sleep = tokio::time::sleep(delay);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                () = &mut sleep => {
                    self.finish_round(ticket);
                    return Flow::Idle;
                }
                cmd = self.command_rx.recv() => {
                    let Some(cmd) = cmd else {
                        // Every handle is gone; nothing can observe the follow-up.
                        BattleEngine::new(&mut self.state).cancel_round();
                        return Flow::Stop;
                    };
                    if let Flow::Stop = self.handle_command(cmd) {
                        return Flow::Stop;
                    }
                    if self.state.guard.in_flight() != Some(ticket) {
                        debug!("Round {} superseded before its follow-up", ticket.round);
                        self.event_bus.publish(SessionEvent::RoundCancelled { ticket });
                        return Flow::Idle;
                    }
                }
            }
        }
    }

    fn handle_command(&mut self, cmd: Command) -> Flow {
        match cmd {
            Command::Signal { signal, reply } => {
                let result = self.handle_signal(signal);
                let flow = match &result {
                    Ok(report) => Flow::Pace {
                        ticket: report.ticket,
                        delay: self.round_delay(report),
                    },
                    Err(_) => Flow::Idle,
                };
                if reply.send(result).is_err() {
                    debug!("Signal reply channel closed (caller dropped)");
                }
                flow
            }
            Command::Save { reply } => {
                let result = self.handle_save();
                if reply.send(result).is_err() {
                    debug!("Save reply channel closed (caller dropped)");
                }
                Flow::Idle
            }
            Command::Restore { saved, reply } => {
                let result = self.restore_from(&saved);
                if reply.send(result).is_err() {
                    debug!("Restore reply channel closed (caller dropped)");
                }
                Flow::Idle
            }
            Command::Resume { reply } => {
                let result = self.handle_resume();
                if reply.send(result).is_err() {
                    debug!("Resume reply channel closed (caller dropped)");
                }
                Flow::Idle
            }
            Command::NewGame { reply } => {
                let result = self.handle_new_game();
                if reply.send(result).is_err() {
                    debug!("NewGame reply channel closed (caller dropped)");
                }
                Flow::Idle
            }
            Command::End { reply } => {
                let cancelled = self.handle_end();
                if reply.send(cancelled).is_err() {
                    debug!("End reply channel closed (caller dropped)");
                }
                Flow::Stop
            }
            Command::Query { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("Query reply channel closed (caller dropped)");
                }
                Flow::Idle
            }
        }
    }

    fn handle_signal(&mut self, signal: PuzzleSignal) -> Result<RoundReport> {
        let env = self.oracles.as_game_env();
        let report = BattleEngine::new(&mut self.state)
            .on_signal(env, signal)
            .inspect_err(|err| debug!("Signal {:?} rejected: {}", signal, err))?;

        debug!(
            "Round {} resolved: {:?} (hero dealt {}, monster dealt {})",
            report.ticket.round,
            report.follow_up,
            report.resolution.total_damage(CombatRole::Hero),
            report.resolution.total_damage(CombatRole::Monster),
        );
        self.publish_battle(&report.events);
        Ok(report)
    }

    fn round_delay(&self, report: &RoundReport) -> Duration {
        let hits = u32::try_from(report.resolution.hits.len()).unwrap_or(u32::MAX);
        let mut delay = self.config.hit_delay.saturating_mul(hits);
        if report.follow_up == FollowUp::MonsterDefeated {
            delay = delay.saturating_add(self.config.spawn_delay);
        }
        delay
    }

    fn finish_round(&mut self, ticket: RoundTicket) {
        let env = self.oracles.as_game_env();
        let completion = match BattleEngine::new(&mut self.state).finish_round(env, ticket) {
            Ok(completion) => completion,
            Err(err) => {
                warn!("Failed to finish round {}: {}", ticket.round, err);
                return;
            }
        };

        self.publish_battle(&completion.events);

        match completion.follow_up {
            FollowUp::PlayerDefeated => {
                info!("{} was defeated at {}", self.setup.id, self.state.player.position);
                self.dispatcher.dismiss(self.state.session);
                if let Err(err) = self.repository.delete(self.state.player.id) {
                    warn!("Failed to delete snapshot of {}: {}", self.state.player.id, err);
                }
            }
            FollowUp::MonsterDefeated if !self.state.is_active() => {
                info!("{} completed the world", self.setup.id);
                self.dispatcher.dismiss(self.state.session);
            }
            FollowUp::MonsterDefeated if self.config.autosave => {
                if self.persist().is_err() {
                    debug!("Autosave failed; {} continues in memory", self.state.session);
                }
            }
            _ => {}
        }

        if let Some(request) = completion.request {
            self.dispatcher.dispatch(request);
        }
    }

    fn handle_save(&self) -> Result<SavedSession> {
        if let Some(ticket) = self.state.guard.in_flight() {
            return Err(BattleError::RoundInFlight(ticket).into());
        }
        if !self.state.is_active() {
            return Err(BattleError::SessionInactive(self.state.status).into());
        }
        self.persist()
    }

    fn persist(&self) -> Result<SavedSession> {
        let snapshot = self.state.snapshot();
        let player = snapshot.player_id;

        match self.repository.save(player, &snapshot) {
            Ok(()) => {
                debug!("Saved {} at {}", player, snapshot.position);
                self.event_bus.publish(SessionEvent::Saved { player });
                Ok(snapshot)
            }
            Err(err) => {
                warn!("Failed to save {}: {}", player, err);
                self.event_bus.publish(SessionEvent::SaveFailed {
                    player,
                    reason: err.to_string(),
                });
                Err(SessionError::Repository(err))
            }
        }
    }

    fn restore_from(&mut self, saved: &SavedSession) -> Result<PuzzleRequest> {
        let previous = self.state.session;
        let env = self.oracles.as_game_env();
        let opening = BattleEngine::new(&mut self.state).restore(env, saved)?;

        info!(
            "Restored {} at {} ({})",
            saved.player_id, self.state.player.position, self.state.session
        );
        self.dispatcher.dismiss(previous);
        self.event_bus.publish(SessionEvent::Restored {
            session: self.state.session,
            player: saved.player_id,
        });
        self.publish_battle(&opening.events);
        self.dispatcher.dispatch(opening.request.clone());
        Ok(opening.request)
    }

    fn handle_resume(&mut self) -> Result<Option<PuzzleRequest>> {
        match self.repository.load(self.setup.id)? {
            Some(saved) => self.restore_from(&saved).map(Some),
            None => {
                debug!("No snapshot stored for {}", self.setup.id);
                Ok(None)
            }
        }
    }

    fn handle_new_game(&mut self) -> Result<PuzzleRequest> {
        self.repository.delete(self.setup.id)?;

        let env = self.oracles.as_game_env();
        let mut state =
            BattleEngine::create_session(env, self.state.session.next(), self.setup.clone())?;
        let opening = BattleEngine::new(&mut state).start(env)?;

        self.dispatcher.dismiss(self.state.session);
        self.state = state;
        info!("New game for {} ({})", self.setup.id, self.state.session);

        self.event_bus.publish(SessionEvent::Started {
            session: self.state.session,
            player: self.setup.id,
        });
        self.publish_battle(&opening.events);
        self.dispatcher.dispatch(opening.request.clone());
        Ok(opening.request)
    }

    fn handle_end(&mut self) -> Option<RoundTicket> {
        let cancelled = BattleEngine::new(&mut self.state).end();
        if let Some(ticket) = cancelled {
            self.event_bus.publish(SessionEvent::RoundCancelled { ticket });
        }
        self.dispatcher.dismiss(self.state.session);
        self.event_bus.publish(SessionEvent::Ended {
            session: self.state.session,
        });
        info!("Session {} ended", self.state.session);
        cancelled
    }

    fn publish_battle(&self, events: &[BattleEvent]) {
        for event in events {
            if is_fallback_spawn(event) {
                warn!("Spawned fallback monster: {:?}", event);
            }
            self.event_bus.publish(event.clone());
        }
    }
}
