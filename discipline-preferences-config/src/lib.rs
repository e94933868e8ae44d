use core::fmt::{Debug, Display};
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;

pub const CONFIG_FILE: &str = "discipline-preferences.toml";
pub const ENV_PREFIX: &str = "DISCIPLINE_PREFERENCES_";

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Base url of the backend, e.g. `http://localhost:8080/`.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Where the logged in user's id (and token) is remembered between runs.
    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,
    /// `EnvFilter` directives used when `RUST_LOG` is not set.
    #[serde(default)]
    pub log_filter: Option<String>,
}

fn default_api_url() -> String {
    "http://localhost:8080/".to_owned()
}

fn default_session_file() -> PathBuf {
    PathBuf::from(".discipline-preferences-session.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            session_file: default_session_file(),
            log_filter: None,
        }
    }
}

#[derive(thiserror::Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Extract(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(value: figment::Error) -> Self {
        Self::Extract(Box::new(value))
    }
}

impl Debug for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

pub fn get_config() -> Result<Config, ConfigError> {
    get_config_from(CONFIG_FILE)
}

/// Later sources win: the toml file, then `DISCIPLINE_PREFERENCES_*` variables.
pub fn get_config_from(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    Ok(Figment::new()
        .merge(Toml::file(path.as_ref()))
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()?)
}
