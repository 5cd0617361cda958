//! Process configuration.
//!
//! Everything is read once from the environment in `main` and passed by
//! value into the components. Nothing below `main` looks at the environment.

use std::time::Duration;

use crate::awtrix::{self, AwtrixConfig};
use crate::domain::LineId;
use crate::ojp::{self, OjpConfig};
use crate::traffic_light::{InvalidThresholds, Thresholds};

pub const ENV_API_KEY: &str = "OJP_API_KEY";
pub const ENV_OJP_URL: &str = "OJP_URL";
pub const ENV_AWTRIX_URL: &str = "AWTRIX_URL";
pub const ENV_STOP_ORIGIN: &str = "STOP_NAME_ORIGIN";
pub const ENV_STOP_DESTINATION: &str = "STOP_NAME_DESTINATION";
pub const ENV_TRAM_LINES: &str = "TRAM_LINES";
pub const ENV_GREEN_MAX: &str = "TIME_GREEN_MAX";
pub const ENV_AMBER_MAX: &str = "TIME_AMBER_MAX";
pub const ENV_AMBER_MIN: &str = "TIME_AMBER_MIN";
pub const ENV_UPDATE_INTERVAL: &str = "UPDATE_INTERVAL";

// Canonical stop names as listed on sbb.ch.
const DEFAULT_STOP_ORIGIN: &str = "Zürich, Heuried";
const DEFAULT_STOP_DESTINATION: &str = "Zürich, Stauffacher";
const DEFAULT_TRAM_LINES: &str = "9,14";
const DEFAULT_UPDATE_INTERVAL_SECS: u64 = 60;

/// Configuration problems detected before any network activity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The API credential is required and has no default
    #[error("OJP_API_KEY environment variable is not set")]
    MissingApiKey,

    /// A numeric setting did not parse
    #[error("{key} must be a non-negative integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    /// The line list was empty after dropping blanks
    #[error("TRAM_LINES must name at least one line")]
    NoLines,

    /// Poll interval of zero seconds
    #[error("UPDATE_INTERVAL must be greater than zero")]
    ZeroInterval,

    #[error(transparent)]
    Thresholds(#[from] InvalidThresholds),
}

/// All settings for one process run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub ojp_url: String,
    pub awtrix_url: String,
    pub origin_stop: String,
    pub destination_stop: String,
    /// Monitored lines, in display order
    pub lines: Vec<LineId>,
    pub thresholds: Thresholds,
    pub poll_interval: Duration,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    ///
    /// Empty or whitespace-only values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());
        let get_u64 = |key: &'static str, default: u64| -> Result<u64, ConfigError> {
            match get(key) {
                None => Ok(default),
                Some(value) => value
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber { key, value }),
            }
        };
        let get_u32 = |key: &'static str, default: u32| -> Result<u32, ConfigError> {
            match get(key) {
                None => Ok(default),
                Some(value) => value
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber { key, value }),
            }
        };

        let api_key = get(ENV_API_KEY).ok_or(ConfigError::MissingApiKey)?;

        let lines = LineId::parse_list(&get_or(ENV_TRAM_LINES, DEFAULT_TRAM_LINES));
        if lines.is_empty() {
            return Err(ConfigError::NoLines);
        }

        let defaults = Thresholds::default();
        let thresholds = Thresholds::new(
            get_u32(ENV_GREEN_MAX, defaults.green_max_mins())?,
            get_u32(ENV_AMBER_MAX, defaults.amber_max_mins())?,
            get_u32(ENV_AMBER_MIN, defaults.amber_min_mins())?,
        )?;

        let interval_secs = get_u64(ENV_UPDATE_INTERVAL, DEFAULT_UPDATE_INTERVAL_SECS)?;
        if interval_secs == 0 {
            return Err(ConfigError::ZeroInterval);
        }

        Ok(Self {
            api_key,
            ojp_url: get_or(ENV_OJP_URL, ojp::DEFAULT_BASE_URL),
            awtrix_url: get_or(ENV_AWTRIX_URL, awtrix::DEFAULT_URL),
            origin_stop: get_or(ENV_STOP_ORIGIN, DEFAULT_STOP_ORIGIN),
            destination_stop: get_or(ENV_STOP_DESTINATION, DEFAULT_STOP_DESTINATION),
            lines,
            thresholds,
            poll_interval: Duration::from_secs(interval_secs),
        })
    }

    /// Settings for the OJP client.
    pub fn ojp_config(&self) -> OjpConfig {
        OjpConfig::new(&self.api_key).with_base_url(&self.ojp_url)
    }

    /// Settings for the display client.
    pub fn awtrix_config(&self) -> AwtrixConfig {
        AwtrixConfig::new(&self.awtrix_url)
    }
}
