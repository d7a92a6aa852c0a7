//! Appending a new empty inner quorum set

use crate::models::{Network, QuorumSet, QuorumSetId};
use tracing::debug;
use uuid::Uuid;

/// Appends a new empty inner quorum set to a parent quorum set
///
/// The appended set's id is fixed on first apply, so redo recreates the
/// same set and later changes targeting it keep resolving.
#[derive(Debug, Clone)]
pub struct InnerQuorumSetAdd {
    parent: QuorumSetId,
    added: Option<QuorumSetId>,
}

impl InnerQuorumSetAdd {
    pub fn new(parent: &QuorumSet) -> Self {
        Self {
            parent: parent.id,
            added: None,
        }
    }

    pub(crate) fn apply(&mut self, network: &mut Network) {
        let Some(parent) = network.get_quorum_set_mut(&self.parent) else {
            debug!("quorum set {} missing, skipping inner set add", self.parent);
            return;
        };
        let id = *self.added.get_or_insert_with(Uuid::new_v4);
        if parent.inner_quorum_sets.iter().any(|q| q.id == id) {
            debug!("inner quorum set {} already present", id);
            return;
        }
        let mut inner = QuorumSet::new();
        inner.id = id;
        parent.inner_quorum_sets.push(inner);
    }

    pub(crate) fn undo(&mut self, network: &mut Network) {
        let Some(added) = self.added else {
            return;
        };
        let Some(parent) = network.get_quorum_set_mut(&self.parent) else {
            debug!("quorum set {} missing, cannot remove inner set", self.parent);
            return;
        };
        parent.inner_quorum_sets.retain(|q| q.id != added);
    }

    pub(crate) fn description(&self) -> String {
        format!("Add inner quorum set to quorum set {}", self.parent)
    }
}
