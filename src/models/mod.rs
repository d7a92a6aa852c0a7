//! Domain models for the Stellar network graph
//!
//! Nodes, organizations and quorum sets, plus the network that owns them.

mod network;
mod node;
mod organization;
mod quorum_set;

pub use network::{Network, NetworkStatistics};
pub use node::{is_public_key, Node, PublicKey};
pub use organization::Organization;
pub use quorum_set::{QuorumSet, QuorumSetId};
