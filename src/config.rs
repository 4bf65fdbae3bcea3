//! Configuration of the knowledge base, logging and similarity defaults.
//!
//! Configuration is read from YAML or JSON; every section falls back to its
//! default when omitted:
//!
//! ```yaml
//! knowledge_base:
//!   path: data/kisao.yaml
//! logger:
//!   enable: true
//!   level: info
//!   format: compact
//! similarity:
//!   default_limit: 10
//! ```

use std::fmt::{self, Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub knowledge_base: KnowledgeBaseSettings,
    pub logger: LoggerSettings,
    pub similarity: SimilaritySettings,
}

/// Location of the knowledge base snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeBaseSettings {
    /// YAML or JSON snapshot, selected by extension.
    pub path: PathBuf,
}

impl Default for KnowledgeBaseSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("kisao.yaml"),
        }
    }
}

/// Logger configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerSettings {
    /// Installs the subscriber when `true`.
    pub enable: bool,
    /// Minimum level for this crate.
    pub level: LogLevel,
    /// Output layout.
    pub format: LogFormat,
    /// Full `EnvFilter` directive replacing the level based one.
    pub override_filter: Option<String>,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            enable: true,
            level: LogLevel::Info,
            format: LogFormat::Compact,
            override_filter: None,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("off"),
            Self::Trace => f.write_str("trace"),
            Self::Debug => f.write_str("debug"),
            Self::Info => f.write_str("info"),
            Self::Warn => f.write_str("warn"),
            Self::Error => f.write_str("error"),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

/// Similarity ranking defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilaritySettings {
    /// Number of results when a caller gives none; `None` is unbounded.
    pub default_limit: Option<usize>,
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unsupported config format for {path:?}")]
    UnsupportedFormat { path: PathBuf },
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl Config {
    /// Loads configuration from a `.yaml`, `.yml` or `.json` file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, has another extension, does not
    /// deserialize or does not validate.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase);
        let config = match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str(&content)?,
            Some("json") => Self::from_json_str(&content)?,
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };
        tracing::debug!(path = %path.display(), "config_loaded");
        Ok(config)
    }

    /// # Errors
    ///
    /// Fails when `content` is not valid YAML configuration.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Fails when `content` is not valid JSON configuration.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.knowledge_base.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "knowledge_base.path must not be empty".to_string(),
            ));
        }
        if self.logger.override_filter.as_deref().is_some_and(str::is_empty) {
            return Err(ConfigError::Invalid(
                "logger.override_filter must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolves a relative knowledge base path against `base`.
    #[must_use]
    pub fn knowledge_base_path(&self, base: &Path) -> PathBuf {
        if self.knowledge_base.path.is_absolute() {
            self.knowledge_base.path.clone()
        } else {
            base.join(&self.knowledge_base.path)
        }
    }
}
