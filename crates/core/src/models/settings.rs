use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::CoreError;

/// Largest series length the description range query can address:
/// positions are assumed to fit in three digits.
pub const SERIES_LEN_CEILING: u32 = 999;

/// Engine settings. Loaded from TOML; every key is optional.
///
/// ```toml
/// max_series_len = 120
/// default_list_limit = 500
/// notification_capacity = 32
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Upper bound on installments / recurring months in one request.
    pub max_series_len: u32,

    /// Limit applied to listings when the caller passes none.
    pub default_list_limit: Option<u32>,

    /// Buffer size of the change-notification channel.
    pub notification_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_series_len: 360,
            default_list_limit: None,
            notification_capacity: 64,
        }
    }
}

impl Settings {
    /// Parse settings from a TOML document and validate them.
    pub fn from_toml_str(contents: &str) -> Result<Self, CoreError> {
        let settings: Settings = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and parse a TOML settings file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CoreError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            CoreError::Config(format!(
                "Failed to read settings file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if !(2..=SERIES_LEN_CEILING).contains(&self.max_series_len) {
            return Err(CoreError::Config(format!(
                "max_series_len must be between 2 and {SERIES_LEN_CEILING}, got {}",
                self.max_series_len
            )));
        }
        if self.notification_capacity == 0 {
            return Err(CoreError::Config(
                "notification_capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
