//! Configuration loading for molcrew.
//! Reads molcrew.toml from the current directory or the path in the
//! MOLCREW_CONFIG env var; a missing file yields the defaults so the demo
//! server runs with zero setup.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use molcrew_common::error::{MolcrewError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub stream: StreamConfig,
    #[serde(default)]
    pub visualize: VisualizeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 3001 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    #[serde(default = "default_message_delay_ms")]
    pub message_delay_ms: u64,
    #[serde(default = "default_snapshot_delay_ms")]
    pub snapshot_delay_ms: u64,
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_message_delay_ms() -> u64 { 2500 }
fn default_snapshot_delay_ms() -> u64 { 1500 }
fn default_channel_capacity() -> usize { 256 }

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            message_delay_ms: default_message_delay_ms(),
            snapshot_delay_ms: default_snapshot_delay_ms(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualizeConfig {
    /// Placeholder image URL; `{smiles}` is replaced with the truncated
    /// structure string. No rendering service is ever called server-side.
    #[serde(default = "default_url_template")]
    pub url_template: String,
    #[serde(default = "default_truncate")]
    pub truncate: usize,
}

fn default_url_template() -> String {
    "https://placehold.co/400x300/EEF2FF/1E40AF?text=Molecule+{smiles}...".to_string()
}
fn default_truncate() -> usize { 10 }

impl Default for VisualizeConfig {
    fn default() -> Self {
        Self {
            url_template: default_url_template(),
            truncate: default_truncate(),
        }
    }
}

impl Config {
    /// Load configuration from molcrew.toml.
    /// Checks MOLCREW_CONFIG env var first, then the current directory.
    pub fn load() -> Result<Self> {
        let path = std::env::var("MOLCREW_CONFIG")
            .unwrap_or_else(|_| "molcrew.toml".to_string());

        if !Path::new(&path).exists() {
            info!("config file {} not found, using defaults", path);
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| MolcrewError::Config(format!("cannot read {}: {}", path, e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| MolcrewError::Config(format!("cannot parse {}: {}", path, e)))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.stream.message_delay_ms, 2500);
        assert_eq!(config.visualize.truncate, 10);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 8080
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.stream.snapshot_delay_ms, 1500);
    }
}
