//! Removing an inner quorum set from its parent

use crate::models::{Network, QuorumSet, QuorumSetId};
use tracing::debug;

/// Removes a specific inner quorum set from a parent quorum set
///
/// The removed set and its position are captured at apply time; undo puts
/// the whole subtree back where it was.
#[derive(Debug, Clone)]
pub struct InnerQuorumSetDelete {
    parent: QuorumSetId,
    inner: QuorumSetId,
    removed: Option<(usize, QuorumSet)>,
}

impl InnerQuorumSetDelete {
    pub fn new(parent: &QuorumSet, inner: &QuorumSet) -> Self {
        Self {
            parent: parent.id,
            inner: inner.id,
            removed: None,
        }
    }

    pub(crate) fn apply(&mut self, network: &mut Network) {
        let Some(parent) = network.get_quorum_set_mut(&self.parent) else {
            debug!("quorum set {} missing, skipping inner set delete", self.parent);
            return;
        };
        match parent
            .inner_quorum_sets
            .iter()
            .position(|q| q.id == self.inner)
        {
            Some(position) => {
                let removed = parent.inner_quorum_sets.remove(position);
                self.removed = Some((position, removed));
            }
            None => debug!(
                "inner quorum set {} not in {}, nothing to delete",
                self.inner, self.parent
            ),
        }
    }

    pub(crate) fn undo(&mut self, network: &mut Network) {
        let Some((position, removed)) = self.removed.take() else {
            return;
        };
        let Some(parent) = network.get_quorum_set_mut(&self.parent) else {
            debug!("quorum set {} missing, cannot restore inner set", self.parent);
            return;
        };
        let position = position.min(parent.inner_quorum_sets.len());
        parent.inner_quorum_sets.insert(position, removed);
    }

    pub(crate) fn description(&self) -> String {
        format!(
            "Delete inner quorum set {} from quorum set {}",
            self.inner, self.parent
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Node;

    fn create_test_network() -> Network {
        let mut node = Node::new("GNODE".to_string());
        for validator in ["A", "B", "C"] {
            let mut inner = QuorumSet::new();
            inner.validators = vec![validator.to_string()];
            node.quorum_set.inner_quorum_sets.push(inner);
        }
        Network::new(vec![node], vec![])
    }

    #[test]
    fn test_delete_middle_and_undo_restores_order() {
        let mut network = create_test_network();
        let parent = &network.nodes[0].quorum_set;
        let middle = &parent.inner_quorum_sets[1];
        let mut change = InnerQuorumSetDelete::new(parent, middle);

        change.apply(&mut network);
        let validators: Vec<_> = network.nodes[0]
            .quorum_set
            .inner_quorum_sets
            .iter()
            .map(|q| q.validators[0].clone())
            .collect();
        assert_eq!(validators, vec!["A".to_string(), "C".to_string()]);

        change.undo(&mut network);
        let validators: Vec<_> = network.nodes[0]
            .quorum_set
            .inner_quorum_sets
            .iter()
            .map(|q| q.validators[0].clone())
            .collect();
        assert_eq!(
            validators,
            vec!["A".to_string(), "B".to_string(), "C".to_string()]
        );
    }

    #[test]
    fn test_delete_already_removed_is_noop() {
        let mut network = create_test_network();
        let parent = &network.nodes[0].quorum_set;
        let target = &parent.inner_quorum_sets[0];
        let mut first = InnerQuorumSetDelete::new(parent, target);
        let mut second = InnerQuorumSetDelete::new(parent, target);

        first.apply(&mut network);
        second.apply(&mut network);
        assert_eq!(network.nodes[0].quorum_set.inner_quorum_sets.len(), 2);

        second.undo(&mut network);
        assert_eq!(network.nodes[0].quorum_set.inner_quorum_sets.len(), 2);
    }
}
