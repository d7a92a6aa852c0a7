//! Quorum set model
//!
//! A quorum set is a threshold structure over validators and nested quorum
//! sets, defining the Byzantine agreement requirements for a node.

use crate::models::{Organization, PublicKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// In-memory identity of a quorum set within one session
pub type QuorumSetId = Uuid;

/// A threshold structure over validators and inner quorum sets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuorumSet {
    /// Session-local identity, stable across edits. Not part of the wire
    /// shape; regenerated when a snapshot is deserialized.
    #[serde(skip, default = "Uuid::new_v4")]
    pub id: QuorumSetId,

    pub threshold: u32,

    #[serde(default)]
    pub validators: Vec<PublicKey>,

    #[serde(default)]
    pub inner_quorum_sets: Vec<QuorumSet>,
}

impl Default for QuorumSet {
    fn default() -> Self {
        Self::new()
    }
}

impl QuorumSet {
    /// Create an empty quorum set with the smallest editable threshold
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            threshold: 1,
            validators: Vec::new(),
            inner_quorum_sets: Vec::new(),
        }
    }

    /// Build a quorum set requiring a simple majority of an
    /// organization's validators
    pub fn from_organization(organization: &Organization) -> Self {
        Self {
            id: Uuid::new_v4(),
            threshold: organization.validators.len() as u32 / 2 + 1,
            validators: organization.validators.clone(),
            inner_quorum_sets: Vec::new(),
        }
    }

    /// Whether the set lists any validators or inner sets
    pub fn has_content(&self) -> bool {
        !self.validators.is_empty() || !self.inner_quorum_sets.is_empty()
    }

    /// Find a quorum set by id in this set's tree, including itself
    pub fn find(&self, id: &QuorumSetId) -> Option<&QuorumSet> {
        if &self.id == id {
            return Some(self);
        }
        self.inner_quorum_sets.iter().find_map(|inner| inner.find(id))
    }

    /// Mutable variant of [`find`](Self::find)
    pub fn find_mut(&mut self, id: &QuorumSetId) -> Option<&mut QuorumSet> {
        if &self.id == id {
            return Some(self);
        }
        self.inner_quorum_sets
            .iter_mut()
            .find_map(|inner| inner.find_mut(id))
    }

    /// Compute a content hash over the quorum set tree
    ///
    /// Two sets with the same threshold, validators and inner structure
    /// produce the same key; the session-local id does not participate.
    pub fn hash_key(&self) -> String {
        let mut hasher = Sha256::new();
        self.hash_into(&mut hasher);
        let result = hasher.finalize();
        format!("{:x}", result)
    }

    fn hash_into(&self, hasher: &mut Sha256) {
        hasher.update(self.threshold.to_be_bytes());
        for validator in &self.validators {
            hasher.update(validator.as_bytes());
        }
        for inner in &self.inner_quorum_sets {
            inner.hash_into(hasher);
        }
    }
}
