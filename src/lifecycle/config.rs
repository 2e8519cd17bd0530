//! # Configuration
//!
//! Defaults, overridden by `STOREFRONT_*` environment variables, then validated.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `STOREFRONT_TAX_RATE` | `0.08` |
//! | `STOREFRONT_POLL_INTERVAL_SECS` | `30` |
//! | `STOREFRONT_REQUEST_TIMEOUT_SECS` | `10` |
//! | `STOREFRONT_REDIRECT_DELAY_SECS` | `5` |
//! | `STOREFRONT_API_BASE_URL` | `http://localhost:3000` |
//! | `STOREFRONT_CHANNEL_BUFFER` | `32` |

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const ENV_PREFIX: &str = "STOREFRONT_";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}: cannot parse {value:?}")]
    Parse { key: String, value: String },

    #[error("{key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Fraction of the subtotal charged as tax.
    pub tax_rate: f64,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,
    /// Delay before leaving the order confirmation page.
    pub redirect_delay_secs: u64,
    pub api_base_url: String,
    /// Capacity of the cart actor's request queue.
    pub channel_buffer: usize,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            tax_rate: 0.08,
            poll_interval_secs: 30,
            request_timeout_secs: 10,
            redirect_delay_secs: 5,
            api_base_url: "http://localhost:3000".to_string(),
            channel_buffer: 32,
        }
    }
}

impl StorefrontConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Applies `STOREFRONT_*` overrides from `vars` on top of the defaults. Unrelated and
    /// unknown keys are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in vars {
            let Some(name) = key.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let value = value.as_ref().trim();
            match name {
                "TAX_RATE" => config.tax_rate = parse(key.as_ref(), value)?,
                "POLL_INTERVAL_SECS" => config.poll_interval_secs = parse(key.as_ref(), value)?,
                "REQUEST_TIMEOUT_SECS" => config.request_timeout_secs = parse(key.as_ref(), value)?,
                "REDIRECT_DELAY_SECS" => config.redirect_delay_secs = parse(key.as_ref(), value)?,
                "API_BASE_URL" => config.api_base_url = value.to_string(),
                "CHANNEL_BUFFER" => config.channel_buffer = parse(key.as_ref(), value)?,
                _ => tracing::debug!(key = key.as_ref(), "Ignoring unknown setting"),
            }
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.tax_rate) {
            return Err(ConfigError::Invalid {
                key: "tax_rate",
                reason: format!("{} is outside 0..=1", self.tax_rate),
            });
        }
        for (key, secs) in [
            ("poll_interval_secs", self.poll_interval_secs),
            ("request_timeout_secs", self.request_timeout_secs),
        ] {
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    key,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }
        if self.channel_buffer == 0 {
            return Err(ConfigError::Invalid {
                key: "channel_buffer",
                reason: "must be greater than zero".to_string(),
            });
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                key: "api_base_url",
                reason: format!("{:?} is not an http(s) URL", self.api_base_url),
            });
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_secs(self.redirect_delay_secs)
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Parse {
        key: key.to_string(),
        value: value.to_string(),
    })
}
