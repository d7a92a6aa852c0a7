//! Single-property updates on nodes and quorum sets

use crate::models::{Network, Node, PublicKey, QuorumSet, QuorumSetId};
use tracing::debug;

/// Which property the update targets, with old and new values
#[derive(Debug, Clone)]
enum PropertyUpdate {
    NodeActive {
        public_key: PublicKey,
        old: bool,
        new: bool,
    },
    NodeValidating {
        public_key: PublicKey,
        old: bool,
        new: bool,
    },
    QuorumSetThreshold {
        quorum_set: QuorumSetId,
        old: u32,
        new: u32,
    },
}

/// Sets one property on an entity, remembering the value it replaced
///
/// The old value is captured when the update is constructed, so undo
/// restores exactly what the caller observed.
#[derive(Debug, Clone)]
pub struct EntityPropertyUpdate {
    update: PropertyUpdate,
}

impl EntityPropertyUpdate {
    /// Update a node's `active` flag
    pub fn node_active(node: &Node, new: bool) -> Self {
        Self {
            update: PropertyUpdate::NodeActive {
                public_key: node.public_key.clone(),
                old: node.active,
                new,
            },
        }
    }

    /// Update a node's `isValidating` flag
    pub fn node_validating(node: &Node, new: bool) -> Self {
        Self {
            update: PropertyUpdate::NodeValidating {
                public_key: node.public_key.clone(),
                old: node.is_validating,
                new,
            },
        }
    }

    /// Update a quorum set's threshold
    pub fn quorum_set_threshold(quorum_set: &QuorumSet, new: u32) -> Self {
        Self {
            update: PropertyUpdate::QuorumSetThreshold {
                quorum_set: quorum_set.id,
                old: quorum_set.threshold,
                new,
            },
        }
    }

    pub(crate) fn apply(&mut self, network: &mut Network) {
        self.set(network, false);
    }

    pub(crate) fn undo(&mut self, network: &mut Network) {
        self.set(network, true);
    }

    fn set(&self, network: &mut Network, restore_old: bool) {
        match &self.update {
            PropertyUpdate::NodeActive { public_key, old, new } => {
                let value = if restore_old { *old } else { *new };
                match network.get_node_mut(public_key) {
                    Some(node) => node.active = value,
                    None => debug!("node {} missing, skipping active update", public_key),
                }
            }
            PropertyUpdate::NodeValidating { public_key, old, new } => {
                let value = if restore_old { *old } else { *new };
                match network.get_node_mut(public_key) {
                    Some(node) => node.is_validating = value,
                    None => {
                        debug!("node {} missing, skipping isValidating update", public_key)
                    }
                }
            }
            PropertyUpdate::QuorumSetThreshold { quorum_set, old, new } => {
                let value = if restore_old { *old } else { *new };
                match network.get_quorum_set_mut(quorum_set) {
                    Some(qs) => qs.threshold = value,
                    None => {
                        debug!("quorum set {} missing, skipping threshold update", quorum_set)
                    }
                }
            }
        }
    }

    pub(crate) fn description(&self) -> String {
        match &self.update {
            PropertyUpdate::NodeActive { public_key, new, .. } => {
                format!("Set active to {} on node {}", new, public_key)
            }
            PropertyUpdate::NodeValidating { public_key, new, .. } => {
                format!("Set isValidating to {} on node {}", new, public_key)
            }
            PropertyUpdate::QuorumSetThreshold { quorum_set, new, .. } => {
                format!("Set threshold to {} on quorum set {}", new, quorum_set)
            }
        }
    }
}
