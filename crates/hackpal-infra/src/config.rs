//! Server configuration loader for Hackpal.
//!
//! Reads `config.toml` from the data directory (`~/.hackpal/` in production)
//! and deserializes it into [`ServerConfig`]. Falls back to defaults when the
//! file is missing or malformed. Selected fields can be overridden from the
//! environment.

use std::path::{Path, PathBuf};

use hackpal_types::config::ServerConfig;

use crate::sqlite::pool::database_url_for;

pub const DATA_DIR_ENV: &str = "HACKPAL_DATA_DIR";
pub const INFERENCE_URL_ENV: &str = "HACKPAL_INFERENCE_URL";
pub const DATABASE_URL_ENV: &str = "HACKPAL_DATABASE_URL";

/// Resolve the data directory.
///
/// Priority:
/// 1. `HACKPAL_DATA_DIR` environment variable
/// 2. `~/.hackpal`
/// 3. `.hackpal` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".hackpal");
    }

    PathBuf::from(".hackpal")
}

/// Load server configuration from `{data_dir}/config.toml`.
///
/// A missing file yields the defaults silently; an unreadable or malformed
/// one yields the defaults with a warning.
pub async fn load_server_config(data_dir: &Path) -> ServerConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ServerConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ServerConfig::default();
        }
    };

    match toml::from_str::<ServerConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ServerConfig::default()
        }
    }
}

/// The database URL to open: `config.database_url` if set, otherwise
/// `{data_dir}/hackpal.db`. In the second case `data_dir` is created first.
pub async fn database_url(config: &ServerConfig, data_dir: &Path) -> std::io::Result<String> {
    match &config.database_url {
        Some(url) => Ok(url.clone()),
        None => {
            tokio::fs::create_dir_all(data_dir).await?;
            Ok(database_url_for(data_dir))
        }
    }
}

/// Apply `HACKPAL_INFERENCE_URL` and `HACKPAL_DATABASE_URL` on top of `config`.
pub fn apply_env_overrides(config: ServerConfig) -> ServerConfig {
    apply_overrides(config, |key| std::env::var(key).ok())
}

fn apply_overrides(
    mut config: ServerConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> ServerConfig {
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = non_empty(INFERENCE_URL_ENV) {
        config.inference_url = url;
    }
    if let Some(url) = non_empty(DATABASE_URL_ENV) {
        config.database_url = Some(url);
    }
    config
}
