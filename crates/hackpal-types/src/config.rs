//! Server configuration types for Hackpal.
//!
//! `ServerConfig` represents the top-level `config.toml` that controls the
//! listen address, database location, and the inference collaborator.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Hackpal server.
///
/// Loaded from `~/.hackpal/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// SQLite URL. When absent the database lives in the data directory.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Endpoint of the inference collaborator (multipart POST).
    #[serde(default = "default_inference_url")]
    pub inference_url: String,

    /// Upper bound on a single inference round-trip.
    #[serde(default = "default_inference_timeout_secs")]
    pub inference_timeout_secs: u64,

    /// Largest request body accepted (PDF uploads included).
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_inference_url() -> String {
    "http://localhost:5000/api/hackpal".to_string()
}

fn default_inference_timeout_secs() -> u64 {
    30
}

fn default_max_upload_bytes() -> usize {
    20 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: None,
            inference_url: default_inference_url(),
            inference_timeout_secs: default_inference_timeout_secs(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}
