//! Seam towards the external puzzle layer.
//!
//! The core never knows which puzzle modality runs; it only hands out
//! [`PuzzleRequest`]s and later receives correct/wrong signals through the
//! [`SessionHandle`](super::SessionHandle).
use quest_core::{PuzzleRequest, SessionId};
use tokio::sync::mpsc;

/// Receives puzzle requests from the session worker.
///
/// Calls are fire-and-forget and made from inside the worker task, so
/// implementations must not block.
pub trait PuzzleDispatcher: Send + Sync {
    /// Open a puzzle for the current encounter.
    fn dispatch(&self, request: PuzzleRequest);

    /// Tear down whatever puzzle is open for `session`.
    fn dismiss(&self, _session: SessionId) {}
}

/// Dispatcher that drops every request (headless runs, tests).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDispatcher;

impl PuzzleDispatcher for NullDispatcher {
    fn dispatch(&self, request: PuzzleRequest) {
        tracing::trace!("Dropping puzzle request {:?}", request.puzzle);
    }
}

/// Dispatcher that forwards requests over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelDispatcher {
    tx: mpsc::UnboundedSender<PuzzleRequest>,
}

impl ChannelDispatcher {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PuzzleRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl PuzzleDispatcher for ChannelDispatcher {
    fn dispatch(&self, request: PuzzleRequest) {
        if self.tx.send(request).is_err() {
            tracing::debug!("Puzzle request dropped (receiver closed)");
        }
    }
}
