//! Network model
//!
//! The mutable network graph a session edits: all known nodes and
//! organizations from one crawl, plus derived statistics.

use crate::models::{Node, Organization, QuorumSet, QuorumSetId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Derived counts over the network, recomputed after every change
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStatistics {
    pub nr_of_nodes: usize,
    pub nr_of_active_nodes: usize,
    pub nr_of_validators: usize,
    pub nr_of_active_validators: usize,
    pub nr_of_organizations: usize,
}

/// The network graph as observed at one crawl
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub nodes: Vec<Node>,

    #[serde(default)]
    pub organizations: Vec<Organization>,

    pub crawl_date: DateTime<Utc>,

    #[serde(default)]
    pub statistics: NetworkStatistics,
}

impl Network {
    /// Create a network and compute its initial statistics
    pub fn new(nodes: Vec<Node>, organizations: Vec<Organization>) -> Self {
        let mut network = Self {
            nodes,
            organizations,
            crawl_date: Utc::now(),
            statistics: NetworkStatistics::default(),
        };
        network.recalculate();
        network
    }

    pub fn get_node(&self, public_key: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.public_key == public_key)
    }

    pub fn get_node_mut(&mut self, public_key: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.public_key == public_key)
    }

    pub fn contains_node(&self, public_key: &str) -> bool {
        self.get_node(public_key).is_some()
    }

    pub fn get_organization(&self, id: &str) -> Option<&Organization> {
        self.organizations.iter().find(|o| o.id == id)
    }

    /// Find a quorum set by id anywhere in the network
    pub fn get_quorum_set(&self, id: &QuorumSetId) -> Option<&QuorumSet> {
        self.nodes.iter().find_map(|n| n.quorum_set.find(id))
    }

    /// Mutable variant of [`get_quorum_set`](Self::get_quorum_set)
    pub fn get_quorum_set_mut(&mut self, id: &QuorumSetId) -> Option<&mut QuorumSet> {
        self.nodes
            .iter_mut()
            .find_map(|n| n.quorum_set.find_mut(id))
    }

    /// Recompute derived statistics after a change was applied or undone
    pub fn recalculate(&mut self) {
        let statistics = NetworkStatistics {
            nr_of_nodes: self.nodes.len(),
            nr_of_active_nodes: self.nodes.iter().filter(|n| n.active).count(),
            nr_of_validators: self.nodes.iter().filter(|n| n.is_validator()).count(),
            nr_of_active_validators: self
                .nodes
                .iter()
                .filter(|n| n.active && n.is_validating)
                .count(),
            nr_of_organizations: self.organizations.len(),
        };
        debug!(
            "network statistics recalculated: {}/{} validators active",
            statistics.nr_of_active_validators, statistics.nr_of_validators
        );
        self.statistics = statistics;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_test_network() -> Network {
        let mut validator = Node::new("GVALIDATOR".to_string());
        validator.active = true;
        validator.is_validating = true;
        validator.quorum_set.validators = vec!["GWATCHER".to_string()];

        let mut watcher = Node::new("GWATCHER".to_string());
        watcher.active = true;

        let mut organization =
            Organization::new("org-1".to_string(), "Org One".to_string());
        organization.validators = vec!["GVALIDATOR".to_string()];

        Network::new(vec![validator, watcher], vec![organization])
    }

    #[test]
    fn test_statistics_after_new() {
        let network = create_test_network();
        assert_eq!(
            network.statistics,
            NetworkStatistics {
                nr_of_nodes: 2,
                nr_of_active_nodes: 2,
                nr_of_validators: 1,
                nr_of_active_validators: 1,
                nr_of_organizations: 1,
            }
        );
    }

    #[test]
    fn test_recalculate_tracks_mutations() {
        let mut network = create_test_network();
        network.get_node_mut("GVALIDATOR").unwrap().is_validating = false;
        network.recalculate();
        assert_eq!(network.statistics.nr_of_active_validators, 0);
        assert_eq!(network.statistics.nr_of_validators, 1);
    }

    #[test]
    fn test_quorum_set_lookup_across_nodes() {
        let mut network = create_test_network();
        let inner = QuorumSet::new();
        let inner_id = inner.id;
        network.nodes[0].quorum_set.inner_quorum_sets.push(inner);

        assert!(network.get_quorum_set(&inner_id).is_some());
        network.get_quorum_set_mut(&inner_id).unwrap().threshold = 4;
        assert_eq!(
            network.nodes[0].quorum_set.inner_quorum_sets[0].threshold,
            4
        );
    }

    #[test]
    fn test_snapshot_deserializes_from_camel_case() {
        let json = r#"{
            "nodes": [
                {"publicKey": "GNODE", "active": true, "isValidating": false,
                 "quorumSet": {"threshold": 1, "validators": ["GOTHER"]}}
            ],
            "organizations": [],
            "crawlDate": "2025-01-15T12:00:00Z"
        }"#;
        let mut network: Network = serde_json::from_str(json).unwrap();
        network.recalculate();
        assert_eq!(network.statistics.nr_of_nodes, 1);
        assert!(network.get_node("GNODE").unwrap().is_validator());
    }
}
