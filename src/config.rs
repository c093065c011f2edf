//! Application configuration.
//!
//! Window geometry, UI location and logging are read from
//! `<config dir>/config.json` (see [`crate::platform::get_config_dir`]).
//! Missing fields fall back to defaults; a missing or broken file falls back
//! to the whole default config. Command-line flags are applied on top.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::platform;
use crate::types::errors::ConfigError;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Top-level window settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub min_width: f64,
    pub min_height: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Mind Map".to_string(),
            width: 1200.0,
            height: 800.0,
            min_width: 800.0,
            min_height: 600.0,
        }
    }
}

fn default_ui_dir() -> PathBuf {
    PathBuf::from("ui")
}

fn default_log_filter() -> String {
    "mindmap=info".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    /// Directory holding the rendering-side UI (`index.html` and assets).
    #[serde(default = "default_ui_dir")]
    pub ui_dir: PathBuf,
    /// Base directory for relative document paths.
    #[serde(default)]
    pub documents_dir: Option<PathBuf>,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Open the developer tools once the window is shown. Set by `--dev`.
    #[serde(skip)]
    pub dev_tools: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            ui_dir: default_ui_dir(),
            documents_dir: None,
            log_filter: default_log_filter(),
            dev_tools: false,
        }
    }
}

impl AppConfig {
    pub fn path() -> PathBuf {
        platform::get_config_dir().join(CONFIG_FILE_NAME)
    }

    /// Loads from the default location, falling back to defaults on any error.
    ///
    /// Nothing is logged here; report the returned [`ConfigSource`] once
    /// logging is set up.
    pub fn load() -> (Self, ConfigSource) {
        Self::load_or_default(&Self::path())
    }

    pub fn load_or_default(path: &Path) -> (Self, ConfigSource) {
        match Self::load_from(path) {
            Ok(config) => (config, ConfigSource::File(path.to_path_buf())),
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => (
                Self::default(),
                ConfigSource::Defaults {
                    path: path.to_path_buf(),
                    error: None,
                },
            ),
            Err(e) => (
                Self::default(),
                ConfigSource::Defaults {
                    path: path.to_path_buf(),
                    error: Some(e),
                },
            ),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), "Config saved to disk");
        Ok(())
    }

    pub fn with_cli(mut self, args: &CliArgs) -> Self {
        self.dev_tools = args.dev;
        if args.dev && self.log_filter == default_log_filter() {
            self.log_filter = "mindmap=debug".to_string();
        }
        self
    }
}

/// Where the loaded config came from.
#[derive(Debug)]
pub enum ConfigSource {
    File(PathBuf),
    /// No usable file. `error` is `None` when the file simply does not exist.
    Defaults {
        path: PathBuf,
        error: Option<ConfigError>,
    },
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => {
                tracing::info!(path = %path.display(), "Loaded config from disk")
            }
            ConfigSource::Defaults { path, error: None } => {
                tracing::info!(path = %path.display(), "No config file found, using defaults")
            }
            ConfigSource::Defaults {
                path,
                error: Some(e),
            } => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to load config, using defaults")
            }
        }
    }
}

/// Command-line surface: a single `--dev` flag. Anything else is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub dev: bool,
}

impl CliArgs {
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            dev: args.into_iter().any(|a| a.as_ref() == "--dev"),
        }
    }

    pub fn from_env() -> Self {
        Self::parse(std::env::args().skip(1))
    }
}
