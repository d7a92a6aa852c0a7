//! Removing a single validator from a quorum set

use crate::models::{Network, PublicKey, QuorumSet, QuorumSetId};
use tracing::debug;

/// Removes a validator from a quorum set's validator list
///
/// The validator's position is captured when the delete is applied, so undo
/// re-inserts it where it was.
#[derive(Debug, Clone)]
pub struct QuorumSetValidatorDelete {
    quorum_set: QuorumSetId,
    public_key: PublicKey,
    position: Option<usize>,
}

impl QuorumSetValidatorDelete {
    pub fn new(quorum_set: &QuorumSet, public_key: PublicKey) -> Self {
        Self {
            quorum_set: quorum_set.id,
            public_key,
            position: None,
        }
    }

    pub(crate) fn apply(&mut self, network: &mut Network) {
        let Some(quorum_set) = network.get_quorum_set_mut(&self.quorum_set) else {
            debug!("quorum set {} missing, skipping validator delete", self.quorum_set);
            return;
        };
        match quorum_set
            .validators
            .iter()
            .position(|v| v == &self.public_key)
        {
            Some(position) => {
                quorum_set.validators.remove(position);
                self.position = Some(position);
            }
            None => debug!(
                "validator {} not in quorum set {}, nothing to delete",
                self.public_key, self.quorum_set
            ),
        }
    }

    pub(crate) fn undo(&mut self, network: &mut Network) {
        let Some(position) = self.position.take() else {
            return;
        };
        let Some(quorum_set) = network.get_quorum_set_mut(&self.quorum_set) else {
            debug!("quorum set {} missing, cannot restore validator", self.quorum_set);
            return;
        };
        let position = position.min(quorum_set.validators.len());
        quorum_set
            .validators
            .insert(position, self.public_key.clone());
    }

    pub(crate) fn description(&self) -> String {
        format!(
            "Delete validator {} from quorum set {}",
            self.public_key, self.quorum_set
        )
    }
}
