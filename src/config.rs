//! Configuration module for the documentation index.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `DOCINDEX_` and use double
//! underscores to separate nested levels:
//! - `DOCINDEX_COMPLETION__MAX_RESULTS=50` sets `completion.max_results`
//! - `DOCINDEX_INDEXING__STRICT_COMMENTS=false` sets `indexing.strict_comments`
//! - `DOCINDEX_LOGGING__LEVEL=debug` sets `logging.level`

use crate::error::{ErrorContext, IndexError, IndexResult};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory holding the workspace configuration
pub const CONFIG_DIR: &str = ".docindex";

/// Prefix for environment overrides
const ENV_PREFIX: &str = "DOCINDEX_";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Workspace root directory (where .docindex is located)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_root: Option<PathBuf>,

    /// Global debug mode
    #[serde(default = "default_false")]
    pub debug: bool,

    /// Indexing configuration
    #[serde(default)]
    pub indexing: IndexingConfig,

    /// Completion configuration
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IndexingConfig {
    /// File extensions scanned for doc comments
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Patterns to ignore during indexing
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Fail the file pass on a malformed comment instead of skipping it
    #[serde(default = "default_true")]
    pub strict_comments: bool,

    /// Parse files on the rayon pool before inserting them serially
    #[serde(default = "default_true")]
    pub parallel: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CompletionConfig {
    /// Upper bound on candidates returned by either resolver
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_extensions() -> Vec<String> {
    ["js", "jsx", "mjs", "cjs", "ts"]
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}
fn default_max_results() -> usize {
    100
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            workspace_root: None,
            debug: false,
            indexing: IndexingConfig::default(),
            completion: CompletionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            ignore_patterns: vec!["node_modules/**".to_string(), ".git/**".to_string()],
            strict_comments: true,
            parallel: true,
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join("settings.toml"));

        Self::figment(&config_path)
            .extract()
            .map_err(Box::new)
            .map(|mut settings: Settings| {
                if settings.workspace_root.is_none() {
                    settings.workspace_root = Self::workspace_root();
                }
                settings
            })
    }

    /// Load configuration from a specific file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Self::figment(path.as_ref()).extract().map_err(Box::new)
    }

    fn figment(config_path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(config_path))
            // Double underscore separates nested levels, single underscores
            // stay inside field names
            .merge(Env::prefixed(ENV_PREFIX).map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
    }

    /// Find the workspace config by looking for a .docindex directory
    /// from the current directory up to root
    fn find_workspace_config() -> Option<PathBuf> {
        Self::workspace_root().map(|root| root.join(CONFIG_DIR).join("settings.toml"))
    }

    /// Get the workspace root directory (where .docindex is located)
    pub fn workspace_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        current
            .ancestors()
            .find(|ancestor| ancestor.join(CONFIG_DIR).is_dir())
            .map(Path::to_path_buf)
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> IndexResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_path(parent)?;
        }

        let toml_string = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path, toml_string).with_path(path)?;

        Ok(())
    }

    /// Check that enabled values make sense together
    pub fn validate(&self) -> IndexResult<()> {
        if self.completion.max_results == 0 {
            return Err(IndexError::ConfigError {
                reason: "completion.max_results must be greater than zero".to_string(),
            });
        }
        if self.indexing.extensions.is_empty() {
            return Err(IndexError::ConfigError {
                reason: "indexing.extensions must list at least one extension".to_string(),
            });
        }
        Ok(())
    }
}
