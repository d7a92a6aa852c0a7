//! Organization model
//!
//! An organization groups the validators run by one operator.

use crate::models::PublicKey;
use serde::{Deserialize, Serialize};

/// An operator running one or more validators
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,

    /// Public keys of the validators this organization runs
    #[serde(default)]
    pub validators: Vec<PublicKey>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
}

impl Organization {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            validators: Vec::new(),
            homepage: None,
        }
    }
}
