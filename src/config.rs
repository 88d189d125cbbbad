//! Tool configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. User values are
//! layered over the stock defaults, so a config file only needs the keys it
//! wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [face_types]
//! extra_groups = []                         # More group codes needing narrow/wide renders
//!
//! [scan]
//! extensions = ["jpg", "jpeg", "png", "webp"]
//! recursive = true
//!
//! [check]
//! require_face_variants = true              # Flag face-type groups missing a render
//!
//! [output]
//! format = "text"                           # "text" or "json"
//!
//! [processing]
//! max_processes = 4                         # Omit for auto = CPU cores
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::face_types::FaceTypeRegistry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingConfig {
    /// Additional face-type groups.
    pub face_types: FaceTypesConfig,
    /// Directory scanning settings.
    pub scan: ScanConfig,
    /// Validation strictness.
    pub check: CheckConfig,
    /// Result rendering.
    pub output: OutputConfig,
    /// Parallel parsing settings.
    pub processing: ProcessingConfig,
}

impl NamingConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "scan.extensions must not be empty".into(),
            ));
        }
        for ext in &self.scan.extensions {
            if !is_plain_token(ext) {
                return Err(ConfigError::Validation(format!(
                    "scan.extensions entry {ext:?} must be non-empty letters/digits without a dot"
                )));
            }
        }
        for code in &self.face_types.extra_groups {
            if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic() || c == '_') {
                return Err(ConfigError::Validation(format!(
                    "face_types.extra_groups entry {code:?} must be letters and underscores"
                )));
            }
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Face-type registry with this config's extra groups applied.
    pub fn registry(&self) -> FaceTypeRegistry {
        FaceTypeRegistry::with_extra_groups(&self.face_types.extra_groups)
    }
}

fn is_plain_token(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FaceTypesConfig {
    /// Group codes added to the stock face-type list.
    pub extra_groups: Vec<String>,
}

/// Directory scanning settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// File extensions (without dot, any case) treated as template images.
    pub extensions: Vec<String>,
    /// Descend into subdirectories.
    pub recursive: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: ["jpg", "jpeg", "png", "webp"]
                .into_iter()
                .map(String::from)
                .collect(),
            recursive: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Report face-type groups that lack a narrow or wide render.
    pub require_face_variants: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            require_face_variants: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// Parallel parsing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel parser threads.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Worker count for batch parsing: the configured cap, never above the core count.
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism().map_or(1, |n| n.get());
    match config.max_processes {
        Some(cap) => cap.min(cores),
        None => cores,
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(NamingConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Overlay user TOML onto the stock defaults. Tables merge per key; any other
/// value, arrays included, replaces the stock value wholesale.
pub fn merge_toml(stock: toml::Value, user: toml::Value) -> toml::Value {
    match (stock, user) {
        (toml::Value::Table(mut merged), toml::Value::Table(user_table)) => {
            for (key, user_val) in user_table {
                let value = match merged.remove(&key) {
                    Some(stock_val) => merge_toml(stock_val, user_val),
                    None => user_val,
                };
                merged.insert(key, value);
            }
            toml::Value::Table(merged)
        }
        (_, user) => user,
    }
}

/// The user's `config.toml` in `dir` as untyped TOML, or `None` when absent.
pub fn read_user_overlay(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    tracing::debug!(path = %config_path.display(), "loaded config overlay");
    Ok(Some(value))
}

/// Apply an optional user overlay to the stock defaults, then type-check and validate.
pub fn resolve_config(
    stock: toml::Value,
    user: Option<toml::Value>,
) -> Result<NamingConfig, ConfigError> {
    let merged = match user {
        Some(user) => merge_toml(stock, user),
        None => stock,
    };
    let config: NamingConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Stock defaults, overlaid with `config.toml` from `dir` when a directory is given.
///
/// Stock defaults, overlaid with `<dir>/config.toml` when a directory is given.
pub fn load_config(dir: Option<&Path>) -> Result<NamingConfig, ConfigError> {
    let stock = stock_defaults_value()?;
    let user = match dir {
        Some(dir) => read_user_overlay(dir)?,
        None => None,
    };
    resolve_config(stock, user)
}

/// Returns a fully-commented stock `config.toml`. Used by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Template Naming Configuration
# =============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Face types
# ---------------------------------------------------------------------------
[face_types]
# Group codes that need separate narrow (_n) and wide (_w) renders, on top of
# the built-in list: girl_young, woman_mature, woman_elder, man_young, man_elder.
extra_groups = []

# ---------------------------------------------------------------------------
# Directory scanning
# ---------------------------------------------------------------------------
[scan]
# File extensions treated as template images (case-insensitive, no dot).
extensions = ["jpg", "jpeg", "png", "webp"]

# Descend into subdirectories.
recursive = true

# ---------------------------------------------------------------------------
# Checks
# ---------------------------------------------------------------------------
[check]
# Report face-type groups that are missing a narrow or wide render.
require_face_variants = true

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# "text" for a readable listing, "json" for machine consumption.
format = "text"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel parser threads.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
