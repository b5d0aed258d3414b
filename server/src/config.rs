//! Server configuration.
//!
//! Constructed once at process start and handed to the router; there is no
//! global application state.

use serde::{Deserialize, Serialize};

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address (e.g. "0.0.0.0:5000").
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Maximum request body size in bytes.
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            max_body_size: default_max_body_size(),
        }
    }
}

fn default_listen_addr() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_max_body_size() -> usize {
    20 * 1024 * 1024 // 20MB
}
