//! Node model
//!
//! A node is a peer on the Stellar network, identified by its public key.
//! Validators additionally carry a quorum set.

use crate::models::QuorumSet;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A Stellar public key in strkey form (`G` followed by 55 base32 characters)
pub type PublicKey = String;

static PUBLIC_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^G[A-Z2-7]{55}$").unwrap());

/// Check whether a string is a well-formed strkey public key
pub fn is_public_key(value: &str) -> bool {
    PUBLIC_KEY_RE.is_match(value)
}

/// A peer on the network
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub public_key: PublicKey,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Whether the node was reachable in the latest crawl
    #[serde(default)]
    pub active: bool,

    /// Whether the node was seen participating in consensus
    #[serde(default)]
    pub is_validating: bool,

    #[serde(default)]
    pub quorum_set: QuorumSet,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
}

impl Node {
    /// Create an inactive node with an empty quorum set
    pub fn new(public_key: PublicKey) -> Self {
        Self {
            public_key,
            name: None,
            active: false,
            is_validating: false,
            quorum_set: QuorumSet::new(),
            organization_id: None,
        }
    }

    /// A node is a validator when its quorum set has content;
    /// all other nodes are watchers.
    pub fn is_validator(&self) -> bool {
        self.quorum_set.has_content()
    }

    /// Display name, falling back to the public key
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.public_key)
    }
}
