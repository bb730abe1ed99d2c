//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `.codewiki.toml` in the working directory
//! 4. `~/.config/codewiki/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::constants;
use crate::env::Env;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub recent: RecentConfig,
    pub share: ShareConfig,
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Origin of the documentation backend, e.g. `http://127.0.0.1:5000`.
    pub url: String,
    /// Request timeout in seconds. Analysis of a large repo is slow.
    pub timeout_secs: u64,
    /// Timeout for the best-effort delete call.
    pub delete_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: constants::DEFAULT_SERVER_URL.to_string(),
            timeout_secs: 600,
            delete_timeout_secs: 5,
        }
    }
}

impl ServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn delete_timeout(&self) -> Duration {
        Duration::from_secs(self.delete_timeout_secs)
    }
}

/// Recent-repository list settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentConfig {
    /// Override for the list location (default: `~/.config/codewiki/recent_repos.json`).
    pub file: Option<PathBuf>,
}

/// Share settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    /// Platform share command. `{url}`, `{title}` and `{text}` are substituted
    /// per argument, e.g. `termux-share -a send {url}`.
    pub command: Option<String>,
    /// Link to share instead of the server origin.
    pub url: Option<String>,
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads the global config, then the local one under `local_dir`, then
    /// applies environment variable overrides.
    pub fn load(local_dir: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // Layer 4: global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        // Layer 3: local config
        if let Some(dir) = local_dir {
            let local_path = dir.join(constants::CONFIG_FILENAME);
            if local_path.exists() {
                let local = Self::load_file(&local_path)?;
                config.merge(local);
            }
        }

        // Layer 2: environment variables
        config.apply_env_vars(env);

        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Apply a `--server` flag (layer 1).
    pub fn with_server_override(mut self, server: Option<String>) -> Self {
        if let Some(url) = server {
            self.server.url = url;
        }
        self
    }

    /// The link handed to the share flow.
    pub fn share_url(&self) -> String {
        self.share
            .url
            .clone()
            .unwrap_or_else(|| self.server.url.trim_end_matches('/').to_string())
    }

    /// Merge another config into this one (other wins for non-default values).
    fn merge(&mut self, other: Config) {
        let default_server = ServerConfig::default();
        if other.server.url != default_server.url {
            self.server.url = other.server.url;
        }
        if other.server.timeout_secs != default_server.timeout_secs {
            self.server.timeout_secs = other.server.timeout_secs;
        }
        if other.server.delete_timeout_secs != default_server.delete_timeout_secs {
            self.server.delete_timeout_secs = other.server.delete_timeout_secs;
        }

        if other.recent.file.is_some() {
            self.recent.file = other.recent.file;
        }

        if other.share.command.is_some() {
            self.share.command = other.share.command;
        }
        if other.share.url.is_some() {
            self.share.url = other.share.url;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(url) = env.var(constants::ENV_SERVER) {
            self.server.url = url;
        }
        match env.parse::<u64>(constants::ENV_TIMEOUT) {
            Some(Ok(secs)) if secs > 0 => self.server.timeout_secs = secs,
            Some(Ok(secs)) => eprintln!(
                "Warning: ignoring invalid {} value: {secs}",
                constants::ENV_TIMEOUT
            ),
            Some(Err(raw)) => eprintln!(
                "Warning: ignoring invalid {} value: {raw}",
                constants::ENV_TIMEOUT
            ),
            None => {}
        }
        if let Some(path) = env.var(constants::ENV_RECENT_FILE) {
            self.recent.file = Some(PathBuf::from(path));
        }
        if let Some(command) = env.var(constants::ENV_SHARE_COMMAND) {
            self.share.command = Some(command);
        }
    }
}
