//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tangerine/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::core::fetch::SettleOrder;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TangerineConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub screens: ScreensConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub log_requests: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ScreensConfig {
    pub practitioner_limit: Option<u32>,
    pub product_limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FetchConfig {
    pub settle_order: Option<SettleOrder>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PRACTITIONER_LIMIT: u32 = 10;
pub const DEFAULT_PRODUCT_LIMIT: u32 = 20;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Request/response logging; on by default in debug builds only.
    pub log_requests: bool,
    pub practitioner_limit: u32,
    pub product_limit: u32,
    pub settle_order: SettleOrder,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.tangerine/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tangerine").join("config.toml"))
}

/// Load config from `~/.tangerine/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TangerineConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<TangerineConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(TangerineConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<TangerineConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(TangerineConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: TangerineConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Tangerine Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [api]
# base_url = "http://localhost:8000"   # Or set TANGERINE_API_URL / --base-url
# timeout_secs = 10
# log_requests = true                  # Or set TANGERINE_LOG_REQUESTS

# [screens]
# practitioner_limit = 10
# product_limit = 20

# [fetch]
# settle_order = "latest"              # "latest" or "settled"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_base_url` is from the `--base-url` flag (None = not specified).
pub fn resolve(config: &TangerineConfig, cli_base_url: Option<&str>) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli_base_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("TANGERINE_API_URL").ok())
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
        .trim_end_matches('/')
        .to_string();

    // Request logging: env → config → build profile
    let log_requests = std::env::var("TANGERINE_LOG_REQUESTS")
        .ok()
        .and_then(|v| parse_flag(&v))
        .or(config.api.log_requests)
        .unwrap_or(cfg!(debug_assertions));

    let timeout_secs = match config.api.timeout_secs {
        Some(0) => {
            warn!("timeout_secs = 0 would fail every request, using 1s");
            1
        }
        Some(secs) => secs,
        None => DEFAULT_TIMEOUT_SECS,
    };

    ResolvedConfig {
        base_url,
        timeout: Duration::from_secs(timeout_secs),
        log_requests,
        practitioner_limit: config
            .screens
            .practitioner_limit
            .unwrap_or(DEFAULT_PRACTITIONER_LIMIT),
        product_limit: config.screens.product_limit.unwrap_or(DEFAULT_PRODUCT_LIMIT),
        settle_order: config.fetch.settle_order.unwrap_or_default(),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
