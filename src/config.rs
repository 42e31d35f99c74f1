use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{FactoryError, FactoryResult};
use crate::logging::log_debug;
use crate::registry::{is_error_status, to_identifier};

/// Environment variable listing custom statuses as `code=Phrase` pairs
/// separated by `;`.
pub const CUSTOM_STATUSES_ENV: &str = "HTTP_ERRORS_CUSTOM_STATUSES";

/// Environment variable forcing backtrace capture (`true`/`1`).
pub const FORCE_BACKTRACE_ENV: &str = "HTTP_ERRORS_FORCE_BACKTRACE";

/// Configuration for an [`ErrorFactory`](crate::ErrorFactory).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Extra status codes to register on top of the standard table.
    pub custom_statuses: BTreeMap<u16, String>,

    /// Capture a backtrace for every constructed error even when
    /// `RUST_BACKTRACE` is unset
    pub force_backtrace: bool,
}

impl FactoryConfig {
    /// Validate the configuration is complete
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::Configuration`] if:
    /// - A custom status code lies outside 400–599
    /// - A custom reason phrase yields no identifier characters
    pub fn validate(&self) -> FactoryResult<()> {
        for (code, phrase) in &self.custom_statuses {
            if !is_error_status(i64::from(*code)) {
                return Err(FactoryError::configuration(format!(
                    "custom status {code} is outside 400-599"
                )));
            }
            if to_identifier(phrase.trim()).is_empty() {
                return Err(FactoryError::configuration(format!(
                    "custom status {code} has an empty reason phrase"
                )));
            }
        }
        Ok(())
    }

    /// Load configuration from environment variables
    /// This is the ONLY method that should access environment variables
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::Configuration`] if:
    /// - `HTTP_ERRORS_CUSTOM_STATUSES` contains a malformed `code=Phrase` pair
    /// - `HTTP_ERRORS_FORCE_BACKTRACE` is not a recognised boolean
    /// - The resulting configuration fails validation
    pub fn from_env() -> FactoryResult<Self> {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var(CUSTOM_STATUSES_ENV) {
            config.custom_statuses = Self::parse_custom_statuses(&raw)?;
        }
        if let Ok(raw) = std::env::var(FORCE_BACKTRACE_ENV) {
            config.force_backtrace = Self::parse_flag(&raw)?;
        }

        config.validate()?;

        log_debug!(
            custom_statuses = config.custom_statuses.len(),
            force_backtrace = config.force_backtrace,
            "Error factory configuration loaded and validated"
        );

        Ok(config)
    }

    fn parse_custom_statuses(raw: &str) -> FactoryResult<BTreeMap<u16, String>> {
        let mut statuses = BTreeMap::new();
        for pair in raw.split(';').map(str::trim).filter(|pair| !pair.is_empty()) {
            let Some((code, phrase)) = pair.split_once('=') else {
                return Err(FactoryError::configuration(format!(
                    "{CUSTOM_STATUSES_ENV}: expected code=Phrase, got '{pair}'"
                )));
            };
            let code: u16 = code.trim().parse().map_err(|_| {
                FactoryError::configuration(format!(
                    "{CUSTOM_STATUSES_ENV}: '{}' is not a status code",
                    code.trim()
                ))
            })?;
            statuses.insert(code, phrase.trim().to_string());
        }
        Ok(statuses)
    }

    fn parse_flag(raw: &str) -> FactoryResult<bool> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            other => Err(FactoryError::configuration(format!(
                "{FORCE_BACKTRACE_ENV}: '{other}' is not a boolean"
            ))),
        }
    }
}
