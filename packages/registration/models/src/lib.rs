#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result types produced by measurement registration.

use serde::{Deserialize, Serialize};
use weather_lab_database_models::{CityRow, RangeRow};

/// Readings after rounding and text coercion, exactly as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readings {
    /// Temperature rounded to the nearest integer (ties to even).
    pub temperature: i32,
    /// Rounded humidity as text, `"0"` when absent.
    pub humidity: String,
    /// Rounded apparent temperature as text, the temperature when absent.
    pub feels_like: String,
    /// Rounded pressure as text, `"0"` when absent.
    pub pressure: String,
    /// Rounded wind speed as text, `"0"` when absent.
    pub wind_speed: String,
    /// Human-readable conditions.
    pub description: String,
}

/// Coordinates reported by the geocoder for the resolved city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// ISO country code, empty when unknown.
    pub country_code: String,
}

/// Everything a successful registration produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    /// Id of the inserted measurement.
    pub measurement_id: i64,
    /// The city the measurement belongs to (found or newly created).
    pub city: CityRow,
    /// The range the temperature was classified into.
    pub range: RangeRow,
    /// The persisted readings.
    pub readings: Readings,
    /// Where the geocoder placed the city.
    pub coordinates: Coordinates,
}
