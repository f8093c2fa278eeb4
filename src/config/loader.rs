//! Configuration file loading with precedence handling.

use crate::model::FilterParams;
use crate::state::ControllerConfig;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Env var naming an explicit config file.
pub const CONFIG_ENV: &str = "PAGECTL_CONFIG";
/// Env var overriding the page size.
pub const PAGE_SIZE_ENV: &str = "PAGECTL_PAGE_SIZE";
/// Env var overriding the debounce in milliseconds.
pub const DEBOUNCE_ENV: &str = "PAGECTL_DEBOUNCE_MS";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/pagectl/config.toml`:
///
/// ```toml
/// page_size = 20
/// debounce_ms = 250
/// log_level = "debug"
///
/// [filters]
/// status = "active"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Items per page.
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Search debounce in milliseconds.
    #[serde(default)]
    pub debounce_ms: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Fallback tracing filter when `RUST_LOG` is unset.
    #[serde(default)]
    pub log_level: Option<String>,

    /// Fixed filter fields sent with every request.
    #[serde(default)]
    pub filters: Option<FilterParams>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Items per page.
    pub page_size: u32,
    /// Search debounce in milliseconds.
    pub debounce_ms: u64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Fallback tracing filter.
    pub log_level: String,
    /// Fixed filter fields.
    pub filters: FilterParams,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            page_size: ControllerConfig::DEFAULT_PAGE_SIZE,
            debounce_ms: ControllerConfig::DEFAULT_DEBOUNCE.as_millis() as u64,
            log_file_path: default_log_path(),
            log_level: "info".to_string(),
            filters: FilterParams::new(),
        }
    }
}

impl ResolvedConfig {
    /// Controller parameters from this configuration.
    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig::new(self.page_size)
            .with_debounce(Duration::from_millis(self.debounce_ms))
            .with_filters(self.filters.clone())
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/pagectl/pagectl.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("pagectl").join("pagectl.log")
    } else {
        PathBuf::from("pagectl.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/pagectl/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pagectl").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `PAGECTL_CONFIG` environment variable
/// 3. Default path `~/.config/pagectl/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Some(env_path) = std::env::var_os(CONFIG_ENV) {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_ENV} is empty")));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        page_size: config.page_size.unwrap_or(defaults.page_size),
        debounce_ms: config.debounce_ms.unwrap_or(defaults.debounce_ms),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        log_level: config.log_level.unwrap_or(defaults.log_level),
        filters: config.filters.unwrap_or(defaults.filters),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `PAGECTL_PAGE_SIZE`: Override page size
/// - `PAGECTL_DEBOUNCE_MS`: Override debounce
///
/// Values that do not parse are ignored with a warning.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(page_size) = env_number::<u32>(PAGE_SIZE_ENV) {
        config.page_size = page_size;
    }

    if let Some(debounce_ms) = env_number::<u64>(DEBOUNCE_ENV) {
        config.debounce_ms = debounce_ms;
    }

    config
}

fn env_number<N: std::str::FromStr>(name: &str) -> Option<N> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!(var = name, value = %raw, "ignoring unparseable environment override");
            None
        }
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// `filters` are merged over the configured ones key by key.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    page_size_override: Option<u32>,
    debounce_override: Option<u64>,
    filters: Vec<(String, String)>,
) -> ResolvedConfig {
    if let Some(page_size) = page_size_override {
        config.page_size = page_size;
    }

    if let Some(debounce_ms) = debounce_override {
        config.debounce_ms = debounce_ms;
    }

    config.filters.extend(filters);

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
