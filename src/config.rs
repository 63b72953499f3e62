//! Server configuration persistence.
//!
//! Settings live in `~/.taskdeck/config.toml`; every field has a default so
//! a missing or partial file always yields a usable config. CLI flags
//! override whatever is loaded here.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// ~/.taskdeck/ directory
pub fn taskdeck_dir() -> PathBuf {
    dirs::home_dir()
        .expect("Cannot find home directory")
        .join(".taskdeck")
}

fn config_path() -> PathBuf {
    taskdeck_dir().join("config.toml")
}

/// Load the config file, falling back to defaults when it is missing or
/// unreadable.
pub fn load_config() -> Config {
    let path = config_path();
    if !path.exists() {
        return Config::default();
    }
    std::fs::read_to_string(&path)
        .ok()
        .and_then(|s| toml::from_str(&s).ok())
        .unwrap_or_default()
}
