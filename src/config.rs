//! Application configuration module
//!
//! Handles loading and validating configuration from environment variables.

use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load environment variables: {0}")]
    EnvLoad(#[from] dotenvy::Error),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Complete application settings
///
/// A network id selects which snapshot source the surrounding application
/// talks to; the core itself never fetches, it only carries the resolved
/// endpoints along for its callers.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Network the session starts on
    pub network_id: String,
    /// Networks the session can switch between
    pub available_networks: Vec<String>,
    /// Whether non-validator (watcher) nodes are shown by default
    pub include_watcher_nodes: bool,
    /// Snapshot API endpoint per network id, validated at load time
    api_urls: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            network_id: "public".to_string(),
            available_networks: vec!["public".to_string(), "test".to_string()],
            include_watcher_nodes: true,
            api_urls: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load settings from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore errors if file not found)
        let _ = dotenvy::dotenv();

        let defaults = Settings::default();

        let available_networks: Vec<String> = std::env::var("AVAILABLE_NETWORKS")
            .ok()
            .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or(defaults.available_networks);

        let network_id =
            std::env::var("NETWORK_ID").unwrap_or(defaults.network_id);

        if !available_networks.contains(&network_id) {
            return Err(ConfigError::InvalidValue(format!(
                "NETWORK_ID '{}' is not in AVAILABLE_NETWORKS",
                network_id
            )));
        }

        let include_watcher_nodes = std::env::var("INCLUDE_WATCHER_NODES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.include_watcher_nodes);

        // Each network may carry its own snapshot endpoint, e.g. PUBLIC_API_URL
        let mut api_urls = HashMap::new();
        for id in &available_networks {
            let key = format!("{}_API_URL", id.to_uppercase());
            if let Ok(raw) = std::env::var(&key) {
                let parsed = url::Url::parse(&raw).map_err(|_| {
                    ConfigError::InvalidValue(format!(
                        "{} is not a valid URL: {}",
                        key, raw
                    ))
                })?;
                api_urls.insert(id.clone(), parsed.to_string());
            }
        }

        Ok(Self {
            network_id,
            available_networks,
            include_watcher_nodes,
            api_urls,
        })
    }

    /// Snapshot endpoint for a network id, if one was configured
    pub fn api_url(&self, network_id: &str) -> Option<&str> {
        self.api_urls.get(network_id).map(String::as_str)
    }
}
