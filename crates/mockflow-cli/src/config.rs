//! CLI configuration management.
//!
//! Supports loading configuration from environment variables and a config
//! file with proper precedence: env vars over file over defaults.

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Application-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the Mockflow API server the UI talks to.
    pub base_url: String,

    /// Flow whose mock configuration is being edited.
    ///
    /// The original UI hardcoded inconsistent query values; here the flow
    /// name is real application state threaded through every request.
    pub flow_name: String,

    /// Port the `serve` command listens on.
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000".to_string(),
            flow_name: "checkout".to_string(),
            port: 4000,
        }
    }
}

impl Config {
    /// Load configuration from environment variables and the config file.
    pub fn load() -> Result<Self> {
        // Load .env file if present (silently ignore if missing)
        let _ = dotenvy::dotenv();

        // Start from the file (or defaults), then let env vars override.
        let mut config = Self::load_file()?.unwrap_or_default();

        if let Ok(base_url) = std::env::var("MOCKFLOW_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(flow) = std::env::var("MOCKFLOW_FLOW") {
            config.flow_name = flow;
        }
        if let Ok(port) = std::env::var("MOCKFLOW_PORT") {
            config.port = port
                .parse()
                .with_context(|| format!("invalid MOCKFLOW_PORT value: {port}"))?;
        }

        Ok(config)
    }

    fn load_file() -> Result<Option<Self>> {
        let Some(config_path) = Self::config_file_path() else {
            return Ok(None);
        };
        if !config_path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
        let config =
            serde_json::from_str(&contents).with_context(|| "Failed to parse config file")?;
        Ok(Some(config))
    }

    /// Save current configuration to the config file.
    pub fn save(&self) -> Result<()> {
        if let Some(config_path) = Self::config_file_path() {
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create config directory: {}", parent.display())
                })?;
            }
            let contents = serde_json::to_string_pretty(self)?;
            std::fs::write(&config_path, contents)
                .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
        }
        Ok(())
    }

    /// Get the path to the config file.
    pub fn config_file_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "mockflow", "mockflow")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }
}
