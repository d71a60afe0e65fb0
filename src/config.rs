//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `--config <path>` if given, else `$XDG_CONFIG_HOME/termux-cli/termux-cli.toml`
//!    (an unusable file is skipped with a warning)
//! 3. Environment variables: `TERMUX_CLI_*` prefix, `__` between nested keys

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::ApplicationError;
use crate::infrastructure::ExternalTool;

/// Battery tool configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BatteryConfig {
    /// Executable that prints the battery JSON object
    pub tool: String,
    /// Fixed arguments passed to the tool
    pub args: Vec<String>,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            tool: "termux-battery-status".into(),
            args: vec![],
        }
    }
}

impl BatteryConfig {
    pub fn external_tool(&self) -> ExternalTool {
        ExternalTool::new(&self.tool).with_args(self.args.iter().cloned())
    }
}

/// System report configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SystemConfig {
    /// Environment variables shown by `system info`, in display order
    pub env_vars: Vec<String>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            env_vars: vec!["HOME".into(), "PREFIX".into(), "TMPDIR".into()],
        }
    }
}

/// Unified configuration for termux-cli.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub battery: BatteryConfig,
    pub system: SystemConfig,
}

/// Get the XDG config directory for termux-cli.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "termux-cli").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("termux-cli.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a user-supplied path.
fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.into_owned()),
        Err(_) => path.to_path_buf(),
    }
}

impl Settings {
    /// Load a TOML file into Settings; fields it omits keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ApplicationError> {
        let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
            message: format!("read {}: {}", path.display(), e),
        })?;
        toml::from_str(&content).map_err(|e| ApplicationError::Config {
            message: format!("parse {}: {}", path.display(), e),
        })
    }

    /// Load settings with layered precedence.
    ///
    /// The file layer never fails the invocation: a config file that is
    /// missing, unreadable or not valid TOML is skipped with a warning and the
    /// defaults stand. Without `config_file` the global file is used if present.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let path = match config_file {
            Some(path) => Some(expand_path(path)),
            None => global_config_path().filter(|global| global.exists()),
        };

        let current = match path {
            Some(path) => {
                debug!("load: config file {}", path.display());
                Self::from_file(&path).unwrap_or_else(|e| {
                    warn!("ignoring config file: {}", e);
                    Self::default()
                })
            }
            None => Self::default(),
        };

        Self::apply_env_overrides(current)
    }

    /// Apply TERMUX_CLI_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TERMUX_CLI")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("battery.args")
                    .with_list_parse_key("system.env_vars")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("battery.tool") {
            settings.battery.tool = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("battery.args") {
            settings.battery.args = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("system.env_vars") {
            settings.system.env_vars = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
