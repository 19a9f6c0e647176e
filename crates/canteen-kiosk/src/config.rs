//! Environment configuration. A `.env` file is honoured by the binary.
use crate::order_actor::TransitionPolicy;
use std::{env, fmt::Display, str::FromStr};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct KioskConfig {
    /// Request channel capacity of each collection.
    pub channel_buffer: usize,
    /// Seconds between a placed order and the automatic sign-out.
    pub logout_seconds: u32,
    pub status_policy: TransitionPolicy,
    /// Accounts whose email contains this are administrators.
    pub admin_marker: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 32,
            logout_seconds: 10,
            status_policy: TransitionPolicy::Strict,
            admin_marker: "admin".to_string(),
            gemini_api_key: None,
            gemini_model: "gemini-2.5-flash".to_string(),
        }
    }
}

impl KioskConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads every setting through `lookup`, falling back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let gemini_api_key = lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty());
        if gemini_api_key.is_none() {
            warn!("GEMINI_API_KEY not set, sales analysis disabled");
        }
        let channel_buffer: usize = try_load(&lookup, "KIOSK_CHANNEL_BUFFER", "32")?;
        if channel_buffer == 0 {
            return Err(ConfigError::Invalid {
                key: "KIOSK_CHANNEL_BUFFER",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(Self {
            channel_buffer,
            logout_seconds: try_load(&lookup, "KIOSK_LOGOUT_SECONDS", "10")?,
            status_policy: try_load(&lookup, "KIOSK_STATUS_POLICY", "strict")?,
            admin_marker: try_load(&lookup, "KIOSK_ADMIN_MARKER", "admin")?,
            gemini_api_key,
            gemini_model: try_load(&lookup, "GEMINI_MODEL", "gemini-2.5-flash")?,
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    value.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }
    })
}
