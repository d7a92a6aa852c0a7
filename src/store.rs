//! Session store
//!
//! Ties one network and one change queue together for an editing session.
//! Every mutating operation goes through the queue so it can be undone,
//! then recomputes derived statistics and bumps the change counter so
//! observers can react.

use crate::changes::{
    ChangeQueue, EntityPropertyUpdate, InnerQuorumSetAdd, InnerQuorumSetDelete,
    NetworkAddNode, NetworkChange, QuorumSetOrganizationsAdd, QuorumSetValidatorDelete,
    QuorumSetValidatorsAdd,
};
use crate::config::Settings;
use crate::error::{conflict_error, not_found_error, validation_error, Result};
use crate::models::{is_public_key, Network, Node, PublicKey, QuorumSetId};
use serde::Deserialize;
use tracing::{debug, info};
use validator::Validate;

/// Request to add a hypothetical node to the network
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddNodeRequest {
    #[validate(custom(function = "validate_public_key"))]
    pub public_key: String,

    #[validate(length(min = 1, max = 64, message = "Node name must be between 1 and 64 characters"))]
    #[serde(default)]
    pub name: Option<String>,
}

/// Validate a strkey public key
fn validate_public_key(key: &str) -> std::result::Result<(), validator::ValidationError> {
    if !is_public_key(key) {
        let mut err = validator::ValidationError::new("invalid_public_key");
        err.message =
            Some("Public key must be a 56 character strkey starting with G".into());
        return Err(err);
    }
    Ok(())
}

/// Per-session editing context
///
/// Owns the network graph and the change queue; the graph is never shared
/// with concurrent mutators, so all operations are synchronous.
pub struct Store {
    pub network: Network,
    change_queue: ChangeQueue,
    pub settings: Settings,

    /// Bumped after every applied, undone or redone change
    pub network_updated: u64,

    pub selected_node: Option<PublicKey>,
    pub selected_organization: Option<String>,
    pub center_node: Option<PublicKey>,

    /// Whether non-validator (watcher) nodes are included in views
    pub include_watcher_nodes: bool,
}

impl Store {
    pub fn new(network: Network, settings: Settings) -> Self {
        let include_watcher_nodes = settings.include_watcher_nodes;
        Self {
            network,
            change_queue: ChangeQueue::new(),
            settings,
            network_updated: 0,
            selected_node: None,
            selected_organization: None,
            center_node: None,
            include_watcher_nodes,
        }
    }

    /// Install a freshly loaded network, rolling back any simulation
    /// changes on the previous one first
    pub fn load_network(&mut self, network: Network) {
        if self.change_queue.has_undo() {
            self.change_queue.reset(&mut self.network);
        }
        info!("loading network with {} nodes", network.nodes.len());
        self.network = network;
        self.network.recalculate();
        self.selected_node = None;
        self.selected_organization = None;
        self.center_node = None;
        self.network_updated += 1;
    }

    /// Nodes visible under the current watcher-node filter
    pub fn filtered_nodes(&self) -> Vec<&Node> {
        self.network
            .nodes
            .iter()
            .filter(|n| self.include_watcher_nodes || n.is_validator())
            .collect()
    }

    fn process_change(&mut self, change: NetworkChange) {
        self.change_queue.execute(&mut self.network, change);
        self.network.recalculate();
        self.network_updated += 1;
    }

    /// Toggle a node's `active` flag
    pub fn toggle_active(&mut self, public_key: &str) -> Result<()> {
        let node = self
            .network
            .get_node(public_key)
            .ok_or_else(|| not_found_error(format!("Node {} not found", public_key)))?;
        let update = EntityPropertyUpdate::node_active(node, !node.active);
        self.process_change(NetworkChange::EntityPropertyUpdate(update));
        Ok(())
    }

    /// Toggle a node's `isValidating` flag, activating the node first
    /// when it is inactive
    pub fn toggle_validating(&mut self, public_key: &str) -> Result<()> {
        let node = self
            .network
            .get_node(public_key)
            .ok_or_else(|| not_found_error(format!("Node {} not found", public_key)))?;
        let activate = if node.active {
            None
        } else {
            Some(EntityPropertyUpdate::node_active(node, true))
        };
        let toggle = EntityPropertyUpdate::node_validating(node, !node.is_validating);

        if let Some(activate) = activate {
            self.change_queue
                .execute(&mut self.network, NetworkChange::EntityPropertyUpdate(activate));
        }
        self.process_change(NetworkChange::EntityPropertyUpdate(toggle));
        Ok(())
    }

    /// Apply a batch of validating-state updates, e.g. from a halting
    /// analysis result. Unknown keys are skipped.
    pub fn update_validating_states(&mut self, updates: &[(PublicKey, bool)]) {
        for (public_key, validating) in updates {
            match self.network.get_node(public_key) {
                Some(node) => {
                    let update = EntityPropertyUpdate::node_validating(node, *validating);
                    self.change_queue.execute(
                        &mut self.network,
                        NetworkChange::EntityPropertyUpdate(update),
                    );
                }
                None => debug!("node {} not found, skipping validating update", public_key),
            }
        }
        self.network.recalculate();
        self.network_updated += 1;
    }

    /// Set a quorum set's threshold; executes nothing when the threshold
    /// already has the requested value
    pub fn edit_quorum_set_threshold(
        &mut self,
        quorum_set: &QuorumSetId,
        new_threshold: u32,
    ) -> Result<()> {
        let qs = self
            .network
            .get_quorum_set(quorum_set)
            .ok_or_else(|| not_found_error(format!("Quorum set {} not found", quorum_set)))?;
        if qs.threshold == new_threshold {
            return Ok(());
        }
        let update = EntityPropertyUpdate::quorum_set_threshold(qs, new_threshold);
        self.process_change(NetworkChange::EntityPropertyUpdate(update));
        Ok(())
    }

    pub fn delete_validator_from_quorum_set(
        &mut self,
        quorum_set: &QuorumSetId,
        public_key: &str,
    ) -> Result<()> {
        let qs = self
            .network
            .get_quorum_set(quorum_set)
            .ok_or_else(|| not_found_error(format!("Quorum set {} not found", quorum_set)))?;
        let change = QuorumSetValidatorDelete::new(qs, public_key.to_string());
        self.process_change(NetworkChange::QuorumSetValidatorDelete(change));
        Ok(())
    }

    pub fn delete_inner_quorum_set(
        &mut self,
        parent: &QuorumSetId,
        inner: &QuorumSetId,
    ) -> Result<()> {
        let parent_set = self
            .network
            .get_quorum_set(parent)
            .ok_or_else(|| not_found_error(format!("Quorum set {} not found", parent)))?;
        let inner_set = parent_set
            .inner_quorum_sets
            .iter()
            .find(|q| &q.id == inner)
            .ok_or_else(|| {
                not_found_error(format!("Inner quorum set {} not found in {}", inner, parent))
            })?;
        let change = InnerQuorumSetDelete::new(parent_set, inner_set);
        self.process_change(NetworkChange::InnerQuorumSetDelete(change));
        Ok(())
    }

    pub fn add_inner_quorum_set(&mut self, parent: &QuorumSetId) -> Result<()> {
        let parent_set = self
            .network
            .get_quorum_set(parent)
            .ok_or_else(|| not_found_error(format!("Quorum set {} not found", parent)))?;
        let change = InnerQuorumSetAdd::new(parent_set);
        self.process_change(NetworkChange::InnerQuorumSetAdd(change));
        Ok(())
    }

    pub fn add_validators(
        &mut self,
        quorum_set: &QuorumSetId,
        validators: Vec<PublicKey>,
    ) -> Result<()> {
        let qs = self
            .network
            .get_quorum_set(quorum_set)
            .ok_or_else(|| not_found_error(format!("Quorum set {} not found", quorum_set)))?;
        let change = QuorumSetValidatorsAdd::new(qs, validators);
        self.process_change(NetworkChange::QuorumSetValidatorsAdd(change));
        Ok(())
    }

    /// Add organizations to a quorum set as majority inner sets
    pub fn add_organizations(
        &mut self,
        quorum_set: &QuorumSetId,
        organization_ids: &[String],
    ) -> Result<()> {
        let mut organizations = Vec::with_capacity(organization_ids.len());
        for id in organization_ids {
            let organization = self
                .network
                .get_organization(id)
                .ok_or_else(|| not_found_error(format!("Organization {} not found", id)))?;
            organizations.push(organization.clone());
        }
        let qs = self
            .network
            .get_quorum_set(quorum_set)
            .ok_or_else(|| not_found_error(format!("Quorum set {} not found", quorum_set)))?;
        let change = QuorumSetOrganizationsAdd::new(qs, &organizations);
        self.process_change(NetworkChange::QuorumSetOrganizationsAdd(change));
        Ok(())
    }

    /// Add a hypothetical node to the network
    pub fn add_node_to_network(&mut self, request: AddNodeRequest) -> Result<()> {
        request
            .validate()
            .map_err(|e| validation_error(e.to_string()))?;
        if self.network.contains_node(&request.public_key) {
            return Err(conflict_error(format!(
                "Node {} already exists",
                request.public_key
            )));
        }
        let mut node = Node::new(request.public_key);
        node.name = request.name;
        node.active = true;
        self.process_change(NetworkChange::NetworkAddNode(NetworkAddNode::new(node)));
        Ok(())
    }

    /// Undo the latest change; no-op when there is nothing to undo
    pub fn undo_update(&mut self) {
        if !self.change_queue.has_undo() {
            return;
        }
        self.change_queue.undo(&mut self.network);
        self.network.recalculate();
        self.network_updated += 1;
    }

    /// Redo the latest undone change; no-op when there is nothing to redo
    pub fn redo_update(&mut self) {
        if !self.change_queue.has_redo() {
            return;
        }
        self.change_queue.redo(&mut self.network);
        self.network.recalculate();
        self.network_updated += 1;
    }

    /// Roll back every simulation change, returning the network to the
    /// state it was loaded with
    pub fn reset_updates(&mut self) {
        if !self.change_queue.has_undo() {
            return;
        }
        info!("rolling back all simulation changes");
        self.change_queue.reset(&mut self.network);
        self.network.recalculate();
        self.network_updated += 1;
    }

    pub fn has_undo(&self) -> bool {
        self.change_queue.has_undo()
    }

    pub fn has_redo(&self) -> bool {
        self.change_queue.has_redo()
    }

    /// The session is simulating once any change is in effect
    pub fn is_simulation(&self) -> bool {
        self.change_queue.has_undo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Organization;
    use pretty_assertions::assert_eq;

    fn strkey(tail: char) -> String {
        format!("G{}", tail.to_string().repeat(55))
    }

    fn create_test_store() -> Store {
        let mut alpha = Node::new("GALPHA".to_string());
        alpha.active = true;
        alpha.is_validating = true;
        alpha.quorum_set.threshold = 2;
        alpha.quorum_set.validators =
            vec!["A".to_string(), "B".to_string(), "C".to_string()];

        let mut beta = Node::new("GBETA".to_string());
        beta.active = false;
        beta.quorum_set.validators = vec!["A".to_string()];

        let mut org = Organization::new("org-1".to_string(), "Org One".to_string());
        org.validators = vec!["B".to_string(), "C".to_string()];

        Store::new(
            Network::new(vec![alpha, beta], vec![org]),
            Settings::default(),
        )
    }

    #[test]
    fn test_threshold_and_validator_delete_scenario() {
        let mut store = create_test_store();
        let quorum_set = store.network.nodes[0].quorum_set.id;

        store.edit_quorum_set_threshold(&quorum_set, 3).unwrap();
        assert_eq!(store.network.nodes[0].quorum_set.threshold, 3);

        store
            .delete_validator_from_quorum_set(&quorum_set, "B")
            .unwrap();
        assert_eq!(
            store.network.nodes[0].quorum_set.validators,
            vec!["A".to_string(), "C".to_string()]
        );

        store.undo_update();
        assert_eq!(
            store.network.nodes[0].quorum_set.validators,
            vec!["A".to_string(), "B".to_string(), "C".to_string()]
        );

        store.undo_update();
        assert_eq!(store.network.nodes[0].quorum_set.threshold, 2);
        assert!(!store.has_undo());
    }

    #[test]
    fn test_add_node_scenario() {
        let mut store = create_test_store();
        store
            .add_node_to_network(AddNodeRequest {
                public_key: strkey('X'),
                name: Some("Node X".to_string()),
            })
            .unwrap();
        assert!(store.network.contains_node(&strkey('X')));

        store.undo_update();
        assert!(!store.network.contains_node(&strkey('X')));

        store.redo_update();
        assert!(store.network.contains_node(&strkey('X')));
    }

    #[test]
    fn test_execute_after_undo_discards_redo() {
        let mut store = create_test_store();
        let quorum_set = store.network.nodes[0].quorum_set.id;

        store.edit_quorum_set_threshold(&quorum_set, 3).unwrap();
        store.toggle_active("GALPHA").unwrap();
        store.undo_update();
        assert!(store.has_redo());

        store
            .delete_validator_from_quorum_set(&quorum_set, "C")
            .unwrap();
        assert!(!store.has_redo());
    }

    #[test]
    fn test_n_undos_round_trip() {
        let mut store = create_test_store();
        let before = serde_json::to_value(&store.network.nodes).unwrap();
        let quorum_set = store.network.nodes[0].quorum_set.id;

        store.edit_quorum_set_threshold(&quorum_set, 3).unwrap();
        store.toggle_active("GALPHA").unwrap();
        store.add_inner_quorum_set(&quorum_set).unwrap();
        store
            .add_validators(&quorum_set, vec!["D".to_string()])
            .unwrap();
        store
            .add_organizations(&quorum_set, &["org-1".to_string()])
            .unwrap();
        store
            .add_node_to_network(AddNodeRequest {
                public_key: strkey('X'),
                name: None,
            })
            .unwrap();

        while store.has_undo() {
            store.undo_update();
        }
        let after = serde_json::to_value(&store.network.nodes).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_redo_reapplies_exactly() {
        let mut store = create_test_store();
        let quorum_set = store.network.nodes[0].quorum_set.id;

        store.edit_quorum_set_threshold(&quorum_set, 3).unwrap();
        store
            .delete_validator_from_quorum_set(&quorum_set, "B")
            .unwrap();
        store.toggle_active("GBETA").unwrap();
        let simulated = serde_json::to_value(&store.network.nodes).unwrap();

        store.undo_update();
        store.undo_update();
        store.redo_update();
        store.redo_update();

        let replayed = serde_json::to_value(&store.network.nodes).unwrap();
        assert_eq!(simulated, replayed);
    }

    #[test]
    fn test_reset_clears_history_and_state() {
        let mut store = create_test_store();
        let quorum_set = store.network.nodes[0].quorum_set.id;
        let before = serde_json::to_value(&store.network.nodes).unwrap();

        store.edit_quorum_set_threshold(&quorum_set, 4).unwrap();
        store.toggle_active("GALPHA").unwrap();
        assert!(store.is_simulation());

        store.reset_updates();
        assert!(!store.has_undo());
        assert!(!store.has_redo());
        assert!(!store.is_simulation());
        assert_eq!(before, serde_json::to_value(&store.network.nodes).unwrap());
    }

    #[test]
    fn test_toggle_validating_activates_inactive_node() {
        let mut store = create_test_store();
        store.toggle_validating("GBETA").unwrap();

        let beta = store.network.get_node("GBETA").unwrap();
        assert!(beta.active);
        assert!(beta.is_validating);

        // two history entries were created: activation, then the toggle
        store.undo_update();
        let beta = store.network.get_node("GBETA").unwrap();
        assert!(beta.active);
        assert!(!beta.is_validating);

        store.undo_update();
        let beta = store.network.get_node("GBETA").unwrap();
        assert!(!beta.active);
        assert!(!store.has_undo());
    }

    #[test]
    fn test_edit_threshold_to_same_value_records_nothing() {
        let mut store = create_test_store();
        let quorum_set = store.network.nodes[0].quorum_set.id;
        store.edit_quorum_set_threshold(&quorum_set, 2).unwrap();
        assert!(!store.has_undo());
        assert_eq!(store.network_updated, 0);
    }

    #[test]
    fn test_update_validating_states_batch() {
        let mut store = create_test_store();
        let counter = store.network_updated;
        store.update_validating_states(&[
            ("GALPHA".to_string(), false),
            ("GUNKNOWN".to_string(), true),
            ("GBETA".to_string(), true),
        ]);

        assert!(!store.network.get_node("GALPHA").unwrap().is_validating);
        assert!(store.network.get_node("GBETA").unwrap().is_validating);
        assert_eq!(store.network_updated, counter + 1);

        // one entry per resolvable key
        store.undo_update();
        store.undo_update();
        assert!(!store.has_undo());
    }

    #[test]
    fn test_add_node_validation() {
        let mut store = create_test_store();
        let err = store
            .add_node_to_network(AddNodeRequest {
                public_key: "not-a-key".to_string(),
                name: None,
            })
            .unwrap_err();
        assert!(matches!(err, crate::error::AppError::Validation(_)));

        store
            .add_node_to_network(AddNodeRequest {
                public_key: strkey('X'),
                name: None,
            })
            .unwrap();
        let err = store
            .add_node_to_network(AddNodeRequest {
                public_key: strkey('X'),
                name: None,
            })
            .unwrap_err();
        assert!(matches!(err, crate::error::AppError::Conflict(_)));
    }

    #[test]
    fn test_unknown_targets_are_errors() {
        let mut store = create_test_store();
        assert!(store.toggle_active("GNOBODY").is_err());

        let quorum_set = store.network.nodes[0].quorum_set.id;
        assert!(store
            .add_organizations(&quorum_set, &["org-missing".to_string()])
            .is_err());
    }

    #[test]
    fn test_load_network_resets_session() {
        let mut store = create_test_store();
        store.toggle_active("GALPHA").unwrap();
        store.selected_node = Some("GALPHA".to_string());
        assert!(store.is_simulation());

        store.load_network(Network::new(vec![Node::new("GNEW".to_string())], vec![]));
        assert!(!store.is_simulation());
        assert!(store.selected_node.is_none());
        assert_eq!(store.network.statistics.nr_of_nodes, 1);
    }

    #[test]
    fn test_filtered_nodes_excludes_watchers() {
        let mut store = create_test_store();
        let mut watcher = Node::new("GWATCH".to_string());
        watcher.quorum_set.validators.clear();
        store.network.nodes.push(watcher);

        store.include_watcher_nodes = false;
        let visible: Vec<_> = store
            .filtered_nodes()
            .iter()
            .map(|n| n.public_key.clone())
            .collect();
        assert_eq!(visible, vec!["GALPHA".to_string(), "GBETA".to_string()]);

        store.include_watcher_nodes = true;
        assert_eq!(store.filtered_nodes().len(), 3);
    }
}
