//! Service configuration
//!
//! Values come from, in increasing precedence: built-in defaults, an
//! optional config file, and `TICKET_DESK_*` environment variables.

use crate::error::{Result, TicketError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment variables, e.g. `TICKET_DESK_ID_PREFIX`
pub const ENV_PREFIX: &str = "TICKET_DESK";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Leading part of generated ticket ids (`tkt` in `tkt_20250101_1`)
    pub id_prefix: String,
    /// Open tickets older than this many days count as overdue
    pub overdue_after_days: i64,
    /// Description used when a ticket is created without one. When unset,
    /// a missing description is a validation error.
    pub description_placeholder: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            id_prefix: "tkt".to_string(),
            overdue_after_days: 7,
            description_placeholder: None,
        }
    }
}

impl Config {
    /// Load configuration from `path` (if it exists) and the environment
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;
        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the environment only, falling back to defaults
    pub fn load_or_default() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;
        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the service cannot work with
    pub fn validate(&self) -> Result<()> {
        let prefix_ok = self
            .id_prefix
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
            && self.id_prefix.chars().all(|c| c.is_ascii_alphanumeric());
        if !prefix_ok {
            return Err(TicketError::InvalidConfig(format!(
                "id_prefix '{}' must be alphanumeric and start with a letter",
                self.id_prefix
            )));
        }
        if self.overdue_after_days < 0 {
            return Err(TicketError::InvalidConfig(
                "overdue_after_days must not be negative".to_string(),
            ));
        }
        if let Some(placeholder) = &self.description_placeholder {
            crate::core::validate_text("description_placeholder", placeholder)
                .map_err(|e| TicketError::InvalidConfig(e.to_string()))?;
        }
        Ok(())
    }
}
