//! Reversible network edits
//!
//! Every what-if edit is a [`NetworkChange`]: one atomic mutation against
//! the network graph that knows how to undo itself. Changes address their
//! targets by public key or quorum-set id and receive the network at
//! apply/undo time, so the graph stays exclusively owned by the session.

mod entity_property_update;
mod inner_quorum_set_add;
mod inner_quorum_set_delete;
mod network_add_node;
mod queue;
mod quorum_set_organizations_add;
mod quorum_set_validator_delete;
mod quorum_set_validators_add;

pub use entity_property_update::EntityPropertyUpdate;
pub use inner_quorum_set_add::InnerQuorumSetAdd;
pub use inner_quorum_set_delete::InnerQuorumSetDelete;
pub use network_add_node::NetworkAddNode;
pub use queue::ChangeQueue;
pub use quorum_set_organizations_add::QuorumSetOrganizationsAdd;
pub use quorum_set_validator_delete::QuorumSetValidatorDelete;
pub use quorum_set_validators_add::QuorumSetValidatorsAdd;

use crate::models::Network;

/// One reversible, atomic edit to the network graph
///
/// Applying a change and then undoing it returns the targeted entities to
/// their prior observable state. A change whose target has gone missing is
/// a silent no-op in both directions, never an error.
#[derive(Debug, Clone)]
pub enum NetworkChange {
    EntityPropertyUpdate(EntityPropertyUpdate),
    QuorumSetValidatorDelete(QuorumSetValidatorDelete),
    InnerQuorumSetAdd(InnerQuorumSetAdd),
    InnerQuorumSetDelete(InnerQuorumSetDelete),
    QuorumSetValidatorsAdd(QuorumSetValidatorsAdd),
    QuorumSetOrganizationsAdd(QuorumSetOrganizationsAdd),
    NetworkAddNode(NetworkAddNode),
}

impl NetworkChange {
    /// Perform the mutation
    pub fn apply(&mut self, network: &mut Network) {
        match self {
            NetworkChange::EntityPropertyUpdate(c) => c.apply(network),
            NetworkChange::QuorumSetValidatorDelete(c) => c.apply(network),
            NetworkChange::InnerQuorumSetAdd(c) => c.apply(network),
            NetworkChange::InnerQuorumSetDelete(c) => c.apply(network),
            NetworkChange::QuorumSetValidatorsAdd(c) => c.apply(network),
            NetworkChange::QuorumSetOrganizationsAdd(c) => c.apply(network),
            NetworkChange::NetworkAddNode(c) => c.apply(network),
        }
    }

    /// Restore the state the mutation replaced
    pub fn undo(&mut self, network: &mut Network) {
        match self {
            NetworkChange::EntityPropertyUpdate(c) => c.undo(network),
            NetworkChange::QuorumSetValidatorDelete(c) => c.undo(network),
            NetworkChange::InnerQuorumSetAdd(c) => c.undo(network),
            NetworkChange::InnerQuorumSetDelete(c) => c.undo(network),
            NetworkChange::QuorumSetValidatorsAdd(c) => c.undo(network),
            NetworkChange::QuorumSetOrganizationsAdd(c) => c.undo(network),
            NetworkChange::NetworkAddNode(c) => c.undo(network),
        }
    }

    /// Get a human-readable description of the change
    pub fn description(&self) -> String {
        match self {
            NetworkChange::EntityPropertyUpdate(c) => c.description(),
            NetworkChange::QuorumSetValidatorDelete(c) => c.description(),
            NetworkChange::InnerQuorumSetAdd(c) => c.description(),
            NetworkChange::InnerQuorumSetDelete(c) => c.description(),
            NetworkChange::QuorumSetValidatorsAdd(c) => c.description(),
            NetworkChange::QuorumSetOrganizationsAdd(c) => c.description(),
            NetworkChange::NetworkAddNode(c) => c.description(),
        }
    }
}
