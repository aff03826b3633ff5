// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[service]` - Processing service address and request timeouts
//! - `[editing]` - Preferences forwarded with requests and the source policy
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `PIXEL_STUDIO_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use pixel_studio::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load_with_override(None);
//!
//! // Modify a setting
//! config.editing.preserve_original = false;
//!
//! // Save the modified configuration
//! config::save_with_override(&config, None).expect("Failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::domain::editing::OperationWeight;
use crate::error::{Error, Result};
use crate::session::{SessionOptions, SourcePolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Processing service settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceConfig {
    /// Base URL of the service.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Path of the processing handler.
    #[serde(default = "default_route")]
    pub route: String,

    /// Timeout for light operations (seconds).
    #[serde(default = "default_light_timeout_secs")]
    pub light_timeout_secs: u64,

    /// Timeout for heavy operations (seconds).
    #[serde(default = "default_heavy_timeout_secs")]
    pub heavy_timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            route: default_route(),
            light_timeout_secs: DEFAULT_LIGHT_TIMEOUT_SECS,
            heavy_timeout_secs: DEFAULT_HEAVY_TIMEOUT_SECS,
        }
    }
}

impl ServiceConfig {
    /// Request budget for an operation of the given weight, clamped into
    /// `[MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS]`.
    #[must_use]
    pub fn timeout_for(&self, weight: OperationWeight) -> Duration {
        let secs = match weight {
            OperationWeight::Light => self.light_timeout_secs,
            OperationWeight::Heavy => self.heavy_timeout_secs,
        };
        Duration::from_secs(secs.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS))
    }
}

/// Editing preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditingConfig {
    /// Sent as `preserve_original` with every request.
    #[serde(default = "default_preserve_original")]
    pub preserve_original: bool,

    /// Image that non-perspective operations are applied to.
    #[serde(default)]
    pub source_policy: SourcePolicy,
}

impl Default for EditingConfig {
    fn default() -> Self {
        Self {
            preserve_original: DEFAULT_PRESERVE_ORIGINAL,
            source_policy: SourcePolicy::default(),
        }
    }
}

impl EditingConfig {
    #[must_use]
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            preserve_original: self.preserve_original,
            source_policy: self.source_policy,
        }
    }
}

// =============================================================================
// Main Config Struct
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub editing: EditingConfig,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_route() -> String {
    DEFAULT_ROUTE.to_string()
}

fn default_light_timeout_secs() -> u64 {
    DEFAULT_LIGHT_TIMEOUT_SECS
}

fn default_heavy_timeout_secs() -> u64 {
    DEFAULT_HEAVY_TIMEOUT_SECS
}

fn default_preserve_original() -> bool {
    DEFAULT_PRESERVE_ORIGINAL
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from `base_dir`, or the resolved config directory
/// when `None`.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(_) => {
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to `base_dir`, or the resolved config directory
/// when `None`.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
