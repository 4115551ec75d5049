//! Layered configuration for the task board front end.
//!
//! Sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. User-level `{config_dir}/taskboard/config.toml`
//! 3. Project-level `.taskboard/config.toml`
//! 4. Environment variables prefixed `TASKBOARD_`, with `__` separating
//!    sections (`TASKBOARD_STORAGE__DATA_DIR` -> `storage.data_dir`)

mod error;

pub use error::ConfigError;

use crate::task::domain::OwnerId;
use camino::Utf8PathBuf;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "TASKBOARD_";

/// `TASKBOARD_LOG` holds a `tracing` filter, not a config value.
const LOG_FILTER_KEY: &str = "LOG";
const APP_DIR: &str = "taskboard";
const PROJECT_CONFIG: &str = ".taskboard/config.toml";
const FALLBACK_DATA_DIR: &str = ".taskboard/data";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TaskBoardConfig {
    /// Where task collections are stored.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Who is signed in when no user is given on the command line.
    #[serde(default)]
    pub identity: IdentityConfig,
    /// Log verbosity.
    #[serde(default)]
    pub log: LogConfig,
}

/// Storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding one JSON document per user.
    #[serde(default = "default_data_dir")]
    pub data_dir: Utf8PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> Utf8PathBuf {
    dirs::data_dir()
        .and_then(|dir| Utf8PathBuf::from_path_buf(dir.join(APP_DIR)).ok())
        .unwrap_or_else(|| Utf8PathBuf::from(FALLBACK_DATA_DIR))
}

/// Identity settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct IdentityConfig {
    /// Default user id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl IdentityConfig {
    /// Returns the configured owner, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the user id is blank.
    pub fn owner(&self) -> Result<Option<OwnerId>, ConfigError> {
        self.user
            .as_deref()
            .map(|user| {
                OwnerId::new(user).map_err(|err| ConfigError::InvalidValue {
                    field: "identity.user".to_owned(),
                    reason: err.to_string(),
                })
            })
            .transpose()
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LogConfig {
    /// Default `tracing` filter directive.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_owned()
}

impl TaskBoardConfig {
    /// Loads configuration from every source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::figment().extract()?)
    }

    /// Builds the full provider chain, including the user-level file.
    #[must_use]
    pub fn figment() -> Figment {
        Self::layered(Self::global_config_path().as_deref())
    }

    /// Builds the provider chain with an explicit user-level file.
    ///
    /// Missing files are skipped.
    #[must_use]
    pub fn layered(global_config: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = global_config.filter(|path| path.exists()) {
            figment = figment.merge(Toml::file(path));
        }

        let local_path = Path::new(PROJECT_CONFIG);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(
            Env::prefixed(ENV_PREFIX)
                .ignore(&[LOG_FILTER_KEY])
                .split("__"),
        )
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }
}
