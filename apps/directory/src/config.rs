//! Configuration for the directory application.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Unlike unset variables, a variable that is set but cannot be parsed is an
//! error rather than being silently replaced by the default.

use crate::types::SortDirection;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of seed users
pub const SEED_USERS_VAR: &str = "DIRECTORY_SEED_USERS";
/// Number of the first seed user
pub const SEED_OFFSET_VAR: &str = "DIRECTORY_SEED_OFFSET";
/// Initial sort direction of the users list
pub const SORT_VAR: &str = "DIRECTORY_SORT";

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable holds a value that cannot be parsed
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        /// Variable name
        key: &'static str,
        /// The raw value
        value: String,
        /// Parser message
        reason: String,
    },
}

/// Directory application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// How many synthetic users to load at startup (default: 3000)
    pub seed_users: usize,
    /// Number of the first synthetic user (default: 11)
    pub seed_offset: usize,
    /// Initial users list order (default: asc)
    pub sort: SortDirection,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            seed_users: 3000,
            seed_offset: 11,
            sort: SortDirection::Asc,
        }
    }
}

impl DirectoryConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] under the same conditions as
    /// [`DirectoryConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set to a value that
    /// does not parse, or if the seed user numbers would run past `usize::MAX`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            seed_users: parse_var(&lookup, SEED_USERS_VAR)?.unwrap_or(defaults.seed_users),
            seed_offset: parse_var(&lookup, SEED_OFFSET_VAR)?.unwrap_or(defaults.seed_offset),
            sort: parse_var(&lookup, SORT_VAR)?.unwrap_or(defaults.sort),
        };

        if config.seed_offset.checked_add(config.seed_users).is_none() {
            return Err(ConfigError::Invalid {
                key: SEED_OFFSET_VAR,
                value: config.seed_offset.to_string(),
                reason: format!("offset plus {} seed users overflows", config.seed_users),
            });
        }

        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return Ok(None);
    };

    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value,
            reason: e.to_string(),
        })
}
