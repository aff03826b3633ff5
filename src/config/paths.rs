// SPDX-License-Identifier: MPL-2.0
//! Config directory resolution.
//!
//! Resolved in priority order:
//! 1. **Explicit override** - parameter to the `_with_override()` functions
//!    (CLI `--config` and tests)
//! 2. **Environment variable** `PIXEL_STUDIO_CONFIG_DIR`
//! 3. **Platform default** - via `dirs`, under `PixelStudio/`

use std::path::PathBuf;

/// Application name used for directory naming.
const APP_NAME: &str = "PixelStudio";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "PIXEL_STUDIO_CONFIG_DIR";

/// Returns the application config directory, preferring `override_path`.
#[must_use]
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_override_wins() {
        let dir = PathBuf::from("/tmp/pixel-studio-test");
        assert_eq!(
            get_app_config_dir_with_override(Some(dir.clone())),
            Some(dir)
        );
    }

    #[test]
    fn platform_default_ends_with_app_name() {
        if std::env::var(ENV_CONFIG_DIR).is_ok() {
            return;
        }
        if let Some(path) = get_app_config_dir_with_override(None) {
            assert!(path.ends_with(APP_NAME));
        }
    }
}
