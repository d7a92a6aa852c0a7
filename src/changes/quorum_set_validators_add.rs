//! Appending validators to a quorum set

use crate::models::{Network, PublicKey, QuorumSet, QuorumSetId};
use tracing::debug;

/// Appends one or more validator public keys to a quorum set
///
/// Keys the set already lists are skipped, and apply records exactly what
/// it appended so undo removes no more and no less.
#[derive(Debug, Clone)]
pub struct QuorumSetValidatorsAdd {
    quorum_set: QuorumSetId,
    validators: Vec<PublicKey>,
    appended: Vec<PublicKey>,
}

impl QuorumSetValidatorsAdd {
    pub fn new(quorum_set: &QuorumSet, validators: Vec<PublicKey>) -> Self {
        Self {
            quorum_set: quorum_set.id,
            validators,
            appended: Vec::new(),
        }
    }

    pub(crate) fn apply(&mut self, network: &mut Network) {
        let Some(quorum_set) = network.get_quorum_set_mut(&self.quorum_set) else {
            debug!("quorum set {} missing, skipping validators add", self.quorum_set);
            return;
        };
        self.appended.clear();
        for validator in &self.validators {
            if quorum_set.validators.contains(validator) {
                debug!(
                    "validator {} already in quorum set {}, skipping",
                    validator, self.quorum_set
                );
                continue;
            }
            quorum_set.validators.push(validator.clone());
            self.appended.push(validator.clone());
        }
    }

    pub(crate) fn undo(&mut self, network: &mut Network) {
        let Some(quorum_set) = network.get_quorum_set_mut(&self.quorum_set) else {
            debug!("quorum set {} missing, cannot remove validators", self.quorum_set);
            return;
        };
        for validator in self.appended.drain(..).rev() {
            if let Some(position) =
                quorum_set.validators.iter().rposition(|v| v == &validator)
            {
                quorum_set.validators.remove(position);
            }
        }
    }

    pub(crate) fn description(&self) -> String {
        format!(
            "Add {} validator(s) to quorum set {}",
            self.validators.len(),
            self.quorum_set
        )
    }
}
