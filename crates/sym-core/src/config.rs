//! Configuration Management
//!
//! Handles configuration from environment variables and TOML files with
//! sensible defaults for development. Environment values take precedence
//! over file values.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming an optional TOML config file
pub const CONFIG_PATH_ENV: &str = "SYM_CONFIG";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Extraction pipeline configuration
    pub extraction: ExtractionConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables on top of defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_override()
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Defaults, then the file named by `SYM_CONFIG` if set, then environment.
    ///
    /// Not validated; call [`AppConfig::validate`] once all overrides are in.
    pub fn load() -> Result<Self, ConfigError> {
        let config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };

        config.with_env_override()
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server
        if let Some(host) = lookup("API_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("API_PORT") {
            self.server.port = parse_value("API_PORT", port)?;
        }
        if let Some(origins) = lookup("CORS_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Extraction
        if let Some(engine) = lookup("SYM_ENGINE") {
            self.extraction.engine = engine.parse()?;
        }
        if let Some(max) = lookup("SYM_MAX_INPUT_CHARS") {
            self.extraction.max_input_chars = parse_value("SYM_MAX_INPUT_CHARS", max)?;
        }
        if let Some(url) = lookup("SYM_MODEL_URL") {
            self.extraction.model_url = Some(url);
        }
        if let Some(timeout) = lookup("SYM_MODEL_TIMEOUT_MS") {
            self.extraction.model_timeout_ms = parse_value("SYM_MODEL_TIMEOUT_MS", timeout)?;
        }
        if let Some(path) = lookup("SYM_MAPPING_FILE") {
            self.extraction.mapping_file = Some(PathBuf::from(path));
        }

        // Logging
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(json) = lookup("LOG_JSON") {
            self.logging.json_format = parse_value("LOG_JSON", json)?;
        }

        Ok(self)
    }

    /// Reject combinations that cannot produce a working pipeline
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extraction.max_input_chars == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_input_chars".to_string(),
                value: "0".to_string(),
            });
        }
        if self.extraction.engine == EngineKind::Model {
            if self.extraction.model_url.is_none() {
                return Err(ConfigError::MissingRequired("SYM_MODEL_URL".to_string()));
            }
            if self.extraction.model_timeout_ms == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "model_timeout_ms".to_string(),
                    value: "0".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value,
    })
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Maximum request body size in bytes
    pub max_body_size: usize,

    /// Allowed origins for CORS; empty allows none
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8001,
            max_body_size: 256 * 1024,
            cors_origins: vec![],
        }
    }
}

/// Extraction pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Engine variant to run
    pub engine: EngineKind,

    /// Maximum raw input length in characters
    pub max_input_chars: usize,

    /// Upstream inference endpoint for the model engine
    pub model_url: Option<String>,

    /// Upstream request timeout in milliseconds
    pub model_timeout_ms: u64,

    /// TOML file replacing the built-in specialization table
    pub mapping_file: Option<PathBuf>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            engine: EngineKind::Stub,
            max_input_chars: 10_000,
            model_url: None,
            model_timeout_ms: 5_000,
            mapping_file: None,
        }
    }
}

/// Supported extraction engines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Fixed output, not for production
    #[default]
    Stub,
    /// Dictionary and pattern matching
    Keyword,
    /// External inference service
    Model,
}

impl EngineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stub => "stub",
            Self::Keyword => "keyword",
            Self::Model => "model",
        }
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EngineKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stub" => Ok(Self::Stub),
            "keyword" => Ok(Self::Keyword),
            "model" | "model-backed" => Ok(Self::Model),
            _ => Err(ConfigError::InvalidValue {
                key: "SYM_ENGINE".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) used when RUST_LOG is unset
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
