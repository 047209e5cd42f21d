//! Configuration management for the prompt server.
//!
//! Values come from built-in defaults, then `MCP_*` environment variables
//! (a `.env` file is honoured through `dotenvy`), and finally command-line
//! flags applied by [`Cli::apply`](crate::cli::Cli::apply).

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// Default server name reported to clients.
pub const DEFAULT_SERVER_NAME: &str = "team-prompt-server";

/// Default prompts directory, relative to the working directory.
pub const DEFAULT_PROMPTS_DIR: &str = "./prompts";

/// Main configuration structure for the prompt server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Prompts domain configuration.
    pub prompts: PromptsConfig,

    /// Resources domain configuration.
    pub resources: ResourcesConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Configuration for the prompts domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptsConfig {
    /// Root directory scanned for prompt files.
    pub directory: PathBuf,

    /// Requested file watching. Accepted but not acted upon.
    pub watch_changes: bool,
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_PROMPTS_DIR),
            watch_changes: false,
        }
    }
}

/// Configuration for the resources domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesConfig {
    /// Publish each prompt's source file as a `prompt://` resource.
    pub expose_prompts: bool,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            expose_prompts: true,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_timestamps: true,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Unset variables keep their defaults. Unparseable booleans are
    /// ignored with a warning.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(version) = std::env::var("MCP_SERVER_VERSION") {
            config.server.version = version;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(timestamps) = env_flag("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = timestamps;
        }

        if let Ok(directory) = std::env::var("MCP_PROMPTS_DIR") {
            config.prompts.directory = PathBuf::from(directory);
        }

        if let Some(watch) = env_flag("MCP_PROMPTS_WATCH") {
            config.prompts.watch_changes = watch;
        }

        if let Some(expose) = env_flag("MCP_RESOURCES_EXPOSE_PROMPTS") {
            config.resources.expose_prompts = expose;
        }

        config.transport = TransportConfig::from_env();

        config
    }
}

/// Read a boolean environment variable.
///
/// Accepts `true`/`false`, `1`/`0`, `yes`/`no` and `on`/`off` in any case.
pub(crate) fn env_flag(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        other => {
            warn!("Ignoring {}: '{}' is not a boolean", name, other);
            None
        }
    }
}
