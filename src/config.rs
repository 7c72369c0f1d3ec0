//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/alchetree/alchetree.toml`
//! 3. Local config: `./.alchetree.toml` (working directory)
//! 4. Environment variables: `ALCHETREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::NodeFootprint;

/// Node footprint used for fit-to-viewport scaling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Per-node width in abstract length units
    pub node_width: f64,
    /// Per-node height in abstract length units
    pub node_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let footprint = NodeFootprint::default();
        Self {
            node_width: footprint.width,
            node_height: footprint.height,
        }
    }
}

/// Icon resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IconConfig {
    /// Directory scanned for `<name>_2.svg` icon assets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    /// Path substituted for elements without an icon
    pub fallback: String,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            dir: None,
            fallback: "icons/unknown.svg".to_string(),
        }
    }
}

/// Unified configuration for alchetree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Footprint constants for the scale calculation
    pub layout: LayoutConfig,
    /// Icon lookup settings
    pub icons: IconConfig,
}

/// Expand `~`, `$VAR`, and `${VAR}` in a path-like string.
///
/// Returns the input unchanged when expansion fails (e.g., unset variable).
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Get the XDG config directory for alchetree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "alchetree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("alchetree.toml"))
}

/// Get the path to the local config file in a working directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".alchetree.toml")
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory to look up the local config in
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/alchetree/alchetree.toml`
    /// 3. Local config: `<local_dir>/.alchetree.toml`
    /// 4. Environment variables: `ALCHETREE_*` prefix, `__` separator
    ///    (e.g. `ALCHETREE_LAYOUT__NODE_WIDTH=200`)
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("layout.node_width", defaults.layout.node_width)
            .map_err(config_err)?
            .set_default("layout.node_height", defaults.layout.node_height)
            .map_err(config_err)?
            .set_default("icons.fallback", defaults.icons.fallback.clone())
            .map_err(config_err)?;

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                builder = builder.add_source(File::from(local_path).required(false));
            }
        }

        // The config crate joins the prefix with the key separator unless
        // told otherwise; the documented form is ALCHETREE_LAYOUT__NODE_WIDTH.
        builder = builder.add_source(
            Environment::with_prefix("ALCHETREE")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// The configured per-node footprint.
    pub fn footprint(&self) -> NodeFootprint {
        NodeFootprint {
            width: self.layout.node_width,
            height: self.layout.node_height,
        }
    }

    /// The icon directory, with `~` and `$VAR` expanded.
    pub fn icon_dir(&self) -> Option<PathBuf> {
        self.icons
            .dir
            .as_deref()
            .map(|d| PathBuf::from(expand_env_vars(d)))
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# alchetree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/alchetree/alchetree.toml
#   Local:  ./.alchetree.toml
#   Env:    ALCHETREE_* environment variables, "__" separator
#           (e.g. ALCHETREE_LAYOUT__NODE_WIDTH=200)

[layout]
# Per-node footprint used for the fit-to-viewport scale
# node_width = 170.0
# node_height = 80.0

[icons]
# Directory scanned for <name>_2.svg icon assets
# dir = "~/assets/icons"

# Path substituted when an element has no icon
# fallback = "icons/unknown.svg"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
