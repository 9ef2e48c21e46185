#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Weather client for the weather lab.
//!
//! Turns a free-text city name into coordinates (geocoding) and
//! coordinates into a current-conditions snapshot. The [`WeatherProvider`]
//! trait is the seam the registration service depends on;
//! [`open_meteo::OpenMeteoClient`] is the production implementation and
//! tests substitute their own.
//!
//! Nothing in this crate touches the database.

pub mod codes;
pub mod config;
pub mod open_meteo;

use async_trait::async_trait;
use thiserror::Error;

pub use config::WeatherServiceConfig;
pub use open_meteo::OpenMeteoClient;

/// A city as resolved by the geocoding provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCity {
    /// Canonical name returned by the provider (may differ from the input).
    pub name: String,
    /// Country name, empty when the provider omits it.
    pub country: String,
    /// ISO 3166-1 alpha-2 code, empty when the provider omits it.
    pub country_code: String,
    /// First-level administrative area (province/state), if known.
    pub region: Option<String>,
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
}

/// A current-conditions snapshot.
///
/// Only `temperature` is always present; the provider may omit any of the
/// other readings.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Air temperature at 2 m in °C. `0.0` when the provider omits it.
    pub temperature: f64,
    /// Relative humidity at 2 m in %.
    pub humidity: Option<f64>,
    /// Apparent temperature in °C.
    pub feels_like: Option<f64>,
    /// Mean sea-level pressure in hPa.
    pub pressure: Option<f64>,
    /// Wind speed at 10 m in km/h.
    pub wind_speed: Option<f64>,
    /// WMO weather interpretation code.
    pub weather_code: Option<i64>,
}

impl CurrentConditions {
    /// Human-readable description of [`Self::weather_code`].
    #[must_use]
    pub fn description(&self) -> String {
        codes::describe(self.weather_code)
    }
}

/// Errors from geocoding and weather operations.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The geocoding provider returned zero results.
    #[error("No city found matching '{name}'")]
    CityNotFound {
        /// The name as it was looked up.
        name: String,
    },

    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("{service} request failed (status {status}): {body}")]
    Status {
        /// Which endpoint failed (`"geocoding"` or `"forecast"`).
        service: &'static str,
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// Invalid client configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem.
        message: String,
    },
}

/// Geocoding + current-conditions lookups.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Resolves a free-text city name to its best match.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::CityNotFound`] when the provider has no
    /// match, or another [`WeatherError`] on network/HTTP failure.
    async fn resolve_city(&self, name: &str) -> Result<ResolvedCity, WeatherError>;

    /// Fetches current conditions at the given coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError`] on network/HTTP failure. Missing individual
    /// readings are not an error.
    async fn fetch_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, WeatherError>;
}
