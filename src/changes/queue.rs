//! Change queue
//!
//! Ordered history of executed changes with an undo/redo cursor.

use crate::changes::NetworkChange;
use crate::models::Network;
use tracing::debug;

/// Ordered history plus cursor enabling undo/redo of network changes
///
/// Entries below `applied` are currently in effect; entries at or above it
/// have been undone but are retained for redo until a new change is
/// executed, which discards them.
#[derive(Debug, Default)]
pub struct ChangeQueue {
    history: Vec<NetworkChange>,
    /// Number of history entries currently applied to the network
    applied: usize,
}

impl ChangeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a change immediately and append it to the history,
    /// discarding any undone-but-retained redo tail.
    pub fn execute(&mut self, network: &mut Network, mut change: NetworkChange) {
        debug!("executing change: {}", change.description());
        change.apply(network);
        if self.applied < self.history.len() {
            debug!(
                "discarding {} undone change(s)",
                self.history.len() - self.applied
            );
            self.history.truncate(self.applied);
        }
        self.history.push(change);
        self.applied = self.history.len();
    }

    /// Undo the most recently applied change
    ///
    /// No-op when nothing is applied; callers are expected to check
    /// [`has_undo`](Self::has_undo) first.
    pub fn undo(&mut self, network: &mut Network) {
        if !self.has_undo() {
            debug!("undo called with nothing applied");
            return;
        }
        self.applied -= 1;
        let change = &mut self.history[self.applied];
        debug!("undoing change: {}", change.description());
        change.undo(network);
    }

    /// Re-apply the most recently undone change
    ///
    /// No-op when there is no redo tail; callers are expected to check
    /// [`has_redo`](Self::has_redo) first.
    pub fn redo(&mut self, network: &mut Network) {
        if !self.has_redo() {
            debug!("redo called with no undone changes");
            return;
        }
        let change = &mut self.history[self.applied];
        debug!("redoing change: {}", change.description());
        change.apply(network);
        self.applied += 1;
    }

    /// Undo every applied change in reverse order and clear the history,
    /// returning the network to its pre-session state
    pub fn reset(&mut self, network: &mut Network) {
        while self.has_undo() {
            self.undo(network);
        }
        self.history.clear();
    }

    pub fn has_undo(&self) -> bool {
        self.applied > 0
    }

    pub fn has_redo(&self) -> bool {
        self.applied < self.history.len()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
