//! Cloneable façade for issuing commands to a session.
//!
//! [`SessionHandle`] hides channel plumbing and offers async helpers for the
//! puzzle layer (correct/wrong signals), save management, and event streams.
use std::collections::HashMap;

use quest_core::{
    PuzzleRequest, PuzzleSignal, RoundReport, RoundTicket, SavedSession, SessionState,
};
use tokio::sync::{broadcast, mpsc, oneshot};

use super::errors::{Result, SessionError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with a running session
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl SessionHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| SessionError::CommandChannelClosed)?;

        reply_rx.await.map_err(SessionError::ReplyChannelClosed)
    }

    /// The puzzle was solved: the hero strikes `hits` times.
    ///
    /// The returned report already carries the damage; the follow-up (reward,
    /// next spawn) is applied once the worker finishes pacing the round.
    pub async fn puzzle_correct(&self, hits: u32, advance: bool) -> Result<RoundReport> {
        self.signal(PuzzleSignal::Correct { hits, advance }).await
    }

    /// The puzzle was failed: the monster strikes once.
    pub async fn puzzle_wrong(&self) -> Result<RoundReport> {
        self.signal(PuzzleSignal::Wrong).await
    }

    pub async fn signal(&self, signal: PuzzleSignal) -> Result<RoundReport> {
        self.request(|reply| Command::Signal { signal, reply }).await?
    }

    /// Persist the current session and return the stored snapshot.
    pub async fn save(&self) -> Result<SavedSession> {
        self.request(|reply| Command::Save { reply }).await?
    }

    /// Replace the running session with `saved`.
    pub async fn restore(&self, saved: SavedSession) -> Result<PuzzleRequest> {
        self.request(|reply| Command::Restore {
            saved: Box::new(saved),
            reply,
        })
        .await?
    }

    /// Restore the player's stored snapshot, if there is one.
    pub async fn resume(&self) -> Result<Option<PuzzleRequest>> {
        self.request(|reply| Command::Resume { reply }).await?
    }

    /// Discard the stored snapshot and start over from the first station.
    pub async fn new_game(&self) -> Result<PuzzleRequest> {
        self.request(|reply| Command::NewGame { reply }).await?
    }

    /// End the session and stop the worker.
    ///
    /// Returns the round that was being paced, which is dropped unapplied.
    pub async fn end(&self) -> Result<Option<RoundTicket>> {
        self.request(|reply| Command::End { reply }).await
    }

    /// Query the current session state (read-only snapshot)
    pub async fn query(&self) -> Result<SessionState> {
        self.request(|reply| Command::Query { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Battle` - Encounters, resolved rounds, player defeat
    /// - `Topic::Reward` - Monster rewards, level ups, hero unlocks
    /// - `Topic::Progress` - Position changes and game completion
    /// - `Topic::Session` - Lifecycle and persistence notices
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
