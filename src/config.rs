//! Environment configuration.
//!
//! Values come from the process environment, after loading a `.env` file
//! from the working directory if there is one.

use std::time::Duration;

use crate::types::id::{marker::ApplicationMarker, Id};
use crate::ui::{ModalStore, DEFAULT_TIMEOUT};

pub const MODAL_TIMEOUT_SECS: &str = "MODAL_TIMEOUT_SECS";
pub const DISCORD_APPLICATION_ID: &str = "DISCORD_APPLICATION_ID";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Lifetime of an unsubmitted modal.
    pub modal_timeout: Duration,
    pub application_id: Option<Id<ApplicationMarker>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            modal_timeout: DEFAULT_TIMEOUT,
            application_id: None,
        }
    }
}

impl Config {
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] if a variable is set but doesn't parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Config::from_env`] but reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`Config::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(MODAL_TIMEOUT_SECS) {
            let secs = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid {
                    key: MODAL_TIMEOUT_SECS,
                    value: value.clone(),
                })?;
            config.modal_timeout = Duration::from_secs(secs);
        }

        if let Some(value) = lookup(DISCORD_APPLICATION_ID) {
            let id = value.trim().parse().map_err(|_| ConfigError::Invalid {
                key: DISCORD_APPLICATION_ID,
                value: value.clone(),
            })?;
            config.application_id = Some(id);
        }

        Ok(config)
    }

    /// An empty registry using the configured timeout.
    pub fn modal_store(&self) -> ModalStore {
        ModalStore::with_timeout(self.modal_timeout)
    }
}
