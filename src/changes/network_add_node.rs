//! Adding a hypothetical node to the network

use crate::models::{Network, Node};
use tracing::debug;

/// Adds a node to the network's node collection
#[derive(Debug, Clone)]
pub struct NetworkAddNode {
    node: Node,
    added: bool,
}

impl NetworkAddNode {
    pub fn new(node: Node) -> Self {
        Self { node, added: false }
    }

    pub(crate) fn apply(&mut self, network: &mut Network) {
        if network.contains_node(&self.node.public_key) {
            debug!("node {} already in network, skipping add", self.node.public_key);
            self.added = false;
            return;
        }
        network.nodes.push(self.node.clone());
        self.added = true;
    }

    pub(crate) fn undo(&mut self, network: &mut Network) {
        if !self.added {
            return;
        }
        self.added = false;
        if let Some(position) = network
            .nodes
            .iter()
            .position(|n| n.public_key == self.node.public_key)
        {
            network.nodes.remove(position);
        }
    }

    pub(crate) fn description(&self) -> String {
        format!("Add node {} to network", self.node.public_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_undo_redo() {
        let mut network = Network::new(vec![], vec![]);
        let mut change = NetworkAddNode::new(Node::new("GX".to_string()));

        change.apply(&mut network);
        assert!(network.contains_node("GX"));

        change.undo(&mut network);
        assert!(!network.contains_node("GX"));

        change.apply(&mut network);
        assert!(network.contains_node("GX"));
    }

    #[test]
    fn test_add_existing_node_is_noop() {
        let mut network = Network::new(vec![Node::new("GX".to_string())], vec![]);
        let mut change = NetworkAddNode::new(Node::new("GX".to_string()));

        change.apply(&mut network);
        assert_eq!(network.nodes.len(), 1);

        // apply did nothing, so undo must leave the original node alone
        change.undo(&mut network);
        assert_eq!(network.nodes.len(), 1);
    }
}
