//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/navtree/navtree.toml`
//! 3. Local config: `<input_dir>/navtree.toml` (directory of the loaded script)
//! 4. Environment variables: `NAVTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// Name of the local config file looked up next to the input.
pub const LOCAL_CONFIG_FILE: &str = "navtree.toml";

/// Unified configuration for navtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Script variable holding the forest (default: NAVTREE)
    pub tree_variable: String,
    /// Script variable holding the page index (default: NAVTREEINDEX)
    pub index_variable: String,
    /// Load deferred child scripts next to the input
    pub resolve_deferred: bool,
    /// Fail on a missing child script instead of keeping the reference
    pub strict_deferred: bool,
    /// Spaces per level in indented output
    pub indent: usize,
    /// Deepest level printed by indented output, None for all
    pub max_depth: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tree_variable: "NAVTREE".into(),
            index_variable: "NAVTREEINDEX".into(),
            resolve_deferred: true,
            strict_deferred: false,
            indent: 2,
            max_depth: None,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub tree_variable: Option<String>,
    pub index_variable: Option<String>,
    pub resolve_deferred: Option<bool>,
    pub strict_deferred: Option<bool>,
    pub indent: Option<usize>,
    pub max_depth: Option<usize>,
}

/// Get the XDG config directory for navtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "navtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("navtree.toml"))
}

/// Get the path to the local config file in an input directory.
pub fn local_config_path(input_dir: &Path) -> PathBuf {
    input_dir.join(LOCAL_CONFIG_FILE)
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            tree_variable: overlay
                .tree_variable
                .clone()
                .unwrap_or_else(|| self.tree_variable.clone()),
            index_variable: overlay
                .index_variable
                .clone()
                .unwrap_or_else(|| self.index_variable.clone()),
            resolve_deferred: overlay.resolve_deferred.unwrap_or(self.resolve_deferred),
            strict_deferred: overlay.strict_deferred.unwrap_or(self.strict_deferred),
            indent: overlay.indent.unwrap_or(self.indent),
            max_depth: overlay.max_depth.or(self.max_depth),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `input_dir` - Optional directory of the loaded script, for local config
    pub fn load(input_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("Loading global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        // 3. Local config next to the input
        if let Some(dir) = input_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("Loading local config: {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.validate()?;
        Ok(current)
    }

    /// Apply NAVTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("NAVTREE"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("tree_variable") {
            settings.tree_variable = val;
        }
        if let Ok(val) = config.get_string("index_variable") {
            settings.index_variable = val;
        }
        if let Ok(val) = config.get_bool("resolve_deferred") {
            settings.resolve_deferred = val;
        }
        if let Ok(val) = config.get_bool("strict_deferred") {
            settings.strict_deferred = val;
        }
        if let Ok(val) = config.get::<usize>("indent") {
            settings.indent = val;
        }
        if let Ok(val) = config.get::<usize>("max_depth") {
            settings.max_depth = Some(val);
        }

        Ok(settings)
    }

    /// Variable names must be non-empty so the script reader can match them.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        for (key, value) in [
            ("tree_variable", &self.tree_variable),
            ("index_variable", &self.index_variable),
        ] {
            if value.trim().is_empty() {
                return Err(ApplicationError::Config {
                    message: format!("{} must not be empty", key),
                });
            }
        }
        Ok(())
    }

    /// Render settings as TOML (used by `navtree config`).
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}
