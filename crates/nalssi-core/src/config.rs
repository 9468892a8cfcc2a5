//! Weather API configuration.
//!
//! The KMA open-data portal issues a pre-shared service key; it is the only
//! required credential in the system and arrives via the `OPENAPI_KEY`
//! environment variable, already percent-encoded by the portal.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable holding the KMA open-data service key.
pub const SERVICE_KEY_ENV: &str = "OPENAPI_KEY";

/// Default base URL of the KMA mid-range forecast service.
pub const DEFAULT_BASE_URL: &str = "http://apis.data.go.kr/1360000/MidFcstInfoService";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherApiConfig {
    /// Pre-shared service key, as issued (percent-encoded).
    pub service_key: String,

    /// Base URL of the forecast service. Overridable for tests.
    pub base_url: String,
}

impl WeatherApiConfig {
    /// Build a config from the `OPENAPI_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSetting`] when the key is absent or
    /// empty — there is no usable fallback for a credential.
    pub fn from_env() -> Result<Self, ConfigError> {
        let service_key = std::env::var(SERVICE_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingSetting(SERVICE_KEY_ENV.to_string()))?;

        Ok(Self {
            service_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Build a config with an explicit key, using the default base URL.
    pub fn with_service_key(service_key: impl Into<String>) -> Self {
        Self {
            service_key: service_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}
