//! Appending organizations to a quorum set

use crate::models::{Network, Organization, QuorumSet, QuorumSetId};
use tracing::debug;

/// Appends one inner quorum set per organization to a quorum set
///
/// Each appended set requires a simple majority of the organization's
/// validators. The sets are built when the change is constructed, so the
/// exact delta (including ids) is known up front and undo removes precisely
/// what apply appended, even when organizations share validators.
#[derive(Debug, Clone)]
pub struct QuorumSetOrganizationsAdd {
    quorum_set: QuorumSetId,
    organization_names: Vec<String>,
    inner_sets: Vec<QuorumSet>,
}

impl QuorumSetOrganizationsAdd {
    pub fn new(quorum_set: &QuorumSet, organizations: &[Organization]) -> Self {
        Self {
            quorum_set: quorum_set.id,
            organization_names: organizations.iter().map(|o| o.name.clone()).collect(),
            inner_sets: organizations
                .iter()
                .map(QuorumSet::from_organization)
                .collect(),
        }
    }

    pub(crate) fn apply(&mut self, network: &mut Network) {
        let Some(quorum_set) = network.get_quorum_set_mut(&self.quorum_set) else {
            debug!("quorum set {} missing, skipping organizations add", self.quorum_set);
            return;
        };
        for inner in &self.inner_sets {
            if quorum_set.inner_quorum_sets.iter().any(|q| q.id == inner.id) {
                debug!("inner quorum set {} already present, skipping", inner.id);
                continue;
            }
            quorum_set.inner_quorum_sets.push(inner.clone());
        }
    }

    pub(crate) fn undo(&mut self, network: &mut Network) {
        let Some(quorum_set) = network.get_quorum_set_mut(&self.quorum_set) else {
            debug!("quorum set {} missing, cannot remove organizations", self.quorum_set);
            return;
        };
        quorum_set
            .inner_quorum_sets
            .retain(|q| !self.inner_sets.iter().any(|inner| inner.id == q.id));
    }

    pub(crate) fn description(&self) -> String {
        format!(
            "Add organization(s) {} to quorum set {}",
            self.organization_names.join(", "),
            self.quorum_set
        )
    }
}
