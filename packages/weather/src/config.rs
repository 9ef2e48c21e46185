//! Weather provider configuration.
//!
//! Defaults live in `services/open_meteo.toml`, embedded at compile time.
//! Individual values can be overridden through environment variables.

use std::time::Duration;

use serde::Deserialize;

use crate::WeatherError;

/// Endpoint and transport settings for the weather provider.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherServiceConfig {
    /// Unique identifier (e.g., `"open_meteo"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Full URL of the geocoding search endpoint.
    pub geocoding_url: String,
    /// Full URL of the forecast endpoint.
    pub forecast_url: String,
    /// Language hint passed to the geocoder.
    #[serde(default = "default_language")]
    pub language: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: f64,
    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_language() -> String {
    "es".to_string()
}

const fn default_timeout_secs() -> f64 {
    10.0
}

fn default_user_agent() -> String {
    format!("weather-lab/{}", env!("CARGO_PKG_VERSION"))
}

const OPEN_METEO_TOML: &str = include_str!("../services/open_meteo.toml");

impl WeatherServiceConfig {
    /// Returns the embedded Open-Meteo defaults.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed (a build-time guarantee
    /// since the file is compiled in).
    #[must_use]
    pub fn open_meteo() -> Self {
        toml::de::from_str(OPEN_METEO_TOML)
            .unwrap_or_else(|e| panic!("Failed to parse weather service 'open_meteo': {e}"))
    }

    /// Returns the Open-Meteo defaults with environment overrides applied.
    ///
    /// Recognised variables: `GEOCODING_URL`, `FORECAST_URL`,
    /// `WEATHER_LANGUAGE`, `WEATHER_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Config`] if `WEATHER_TIMEOUT_SECS` is not a
    /// positive number.
    pub fn from_env() -> Result<Self, WeatherError> {
        Self::open_meteo().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup` (keyed by environment variable name).
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Config`] if the timeout override is not a
    /// positive number.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, WeatherError> {
        if let Some(url) = lookup("GEOCODING_URL") {
            self.geocoding_url = url;
        }
        if let Some(url) = lookup("FORECAST_URL") {
            self.forecast_url = url;
        }
        if let Some(language) = lookup("WEATHER_LANGUAGE") {
            self.language = language;
        }
        if let Some(raw) = lookup("WEATHER_TIMEOUT_SECS") {
            self.timeout_secs = raw.trim().parse().map_err(|_| WeatherError::Config {
                message: format!("WEATHER_TIMEOUT_SECS is not a number: {raw:?}"),
            })?;
        }

        self.timeout()?;
        Ok(self)
    }

    /// The per-request timeout as a [`Duration`].
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Config`] if `timeout_secs` is not a positive,
    /// finite number.
    pub fn timeout(&self) -> Result<Duration, WeatherError> {
        if !(self.timeout_secs.is_finite() && self.timeout_secs > 0.0) {
            return Err(WeatherError::Config {
                message: format!("timeout must be positive, got {}", self.timeout_secs),
            });
        }

        Duration::try_from_secs_f64(self.timeout_secs).map_err(|e| WeatherError::Config {
            message: format!("invalid timeout {}: {e}", self.timeout_secs),
        })
    }
}
