//! Configuration loading and validation for AgentHub.
//!
//! Loads configuration from `~/.agenthub/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.agenthub/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Name of the agent used when a request doesn't pick one
    #[serde(default = "default_agent")]
    pub default_agent: String,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// History store configuration
    #[serde(default)]
    pub history: HistoryConfig,

    /// Agents registered at startup
    #[serde(default = "default_agents")]
    pub agents: Vec<AgentEntry>,
}

fn default_agent() -> String {
    "event-planner".into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    8000
}
fn default_host() -> String {
    "127.0.0.1".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

/// Where prior conversation turns are fetched from.
///
/// `url` unset means no store is configured and every chat runs with an
/// empty history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Base URL of the record store (e.g. "http://127.0.0.1:8090")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Collection holding conversation messages
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Maximum records fetched per conversation
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_collection() -> String {
    "messages".into()
}
fn default_page_size() -> usize {
    500
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            url: None,
            collection: default_collection(),
            page_size: default_page_size(),
        }
    }
}

/// One agent registered at startup.
///
/// Agent *content* (prompts, models, tools) lives outside this runtime;
/// an entry describes a scripted agent that replies with a fixed text,
/// which keeps the server usable without any external backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentEntry {
    /// Unique agent name (the `agent` field of chat requests)
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Model label reported by `GET /agents`
    #[serde(default = "default_model")]
    pub model: String,

    /// The fixed reply text
    #[serde(default)]
    pub reply: String,
}

fn default_model() -> String {
    "scripted".into()
}

fn default_agents() -> Vec<AgentEntry> {
    vec![AgentEntry {
        name: default_agent(),
        description: "Event planning assistant".into(),
        model: default_model(),
        reply: "Tell me about the event you are planning.".into(),
    }]
}

impl AppConfig {
    /// Load configuration from the default path (~/.agenthub/config.toml).
    ///
    /// Environment variable overrides (highest priority):
    /// - `AGENTHUB_DEFAULT_AGENT` or `DEFAULT_AGENT`
    /// - `AGENTHUB_HISTORY_URL`
    /// - `HOST` / `PORT`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides on top of file values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(agent) = std::env::var("AGENTHUB_DEFAULT_AGENT")
            .or_else(|_| std::env::var("DEFAULT_AGENT"))
        {
            self.default_agent = agent;
        }

        if let Ok(url) = std::env::var("AGENTHUB_HISTORY_URL") {
            self.history.url = Some(url);
        }

        if let Ok(host) = std::env::var("HOST") {
            self.gateway.host = host;
        }

        if let Ok(port) = std::env::var("PORT")
            && let Ok(port) = port.parse()
        {
            self.gateway.port = port;
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".agenthub")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_agent.is_empty() {
            return Err(ConfigError::ValidationError(
                "default_agent must not be empty".into(),
            ));
        }

        if self.history.page_size == 0 {
            return Err(ConfigError::ValidationError(
                "history.page_size must be at least 1".into(),
            ));
        }

        for agent in &self.agents {
            if agent.name.is_empty() {
                return Err(ConfigError::ValidationError(
                    "agent entries must have a name".into(),
                ));
            }
        }

        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_agent: default_agent(),
            gateway: GatewayConfig::default(),
            history: HistoryConfig::default(),
            agents: default_agents(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}
