#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the weather lab server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the database row types to allow independent evolution of the API
//! contract.

use serde::{Deserialize, Serialize};
use weather_lab_database_models::{CityRow, MeasurementRow, RangeRow};
use weather_lab_registration_models::{Coordinates, Registration};

/// Body of `POST /measurements`.
///
/// `city` is optional here so a missing field can be answered with a
/// 400 body of our own rather than a deserializer error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRegisterRequest {
    /// Free-text city name.
    #[serde(default, alias = "ciudad")]
    pub city: Option<String>,
}

/// A city as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCity {
    /// City ID.
    pub id: i64,
    /// Canonical name.
    pub name: String,
    /// Province/state.
    pub region: String,
    /// Country code or name.
    pub country: String,
}

impl From<CityRow> for ApiCity {
    fn from(row: CityRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            region: row.region,
            country: row.country,
        }
    }
}

/// A temperature range as returned by the API. Open bounds are `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRange {
    /// Range ID.
    pub id: i64,
    /// Label, e.g. `HOT`.
    pub name: String,
    /// Inclusive lower bound in °C.
    pub lower_bound: Option<i32>,
    /// Exclusive upper bound in °C.
    pub upper_bound: Option<i32>,
}

impl From<RangeRow> for ApiRange {
    fn from(row: RangeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            lower_bound: row.lower_bound,
            upper_bound: row.upper_bound,
        }
    }
}

/// Geocoder coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCoordinates {
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
    /// ISO country code, empty when unknown.
    pub country_code: String,
}

impl From<Coordinates> for ApiCoordinates {
    fn from(c: Coordinates) -> Self {
        Self {
            latitude: c.latitude,
            longitude: c.longitude,
            country_code: c.country_code,
        }
    }
}

/// `201` response of `POST /measurements`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRegistration {
    /// ID of the new measurement.
    pub measurement_id: i64,
    /// City the measurement was filed under.
    pub city: ApiCity,
    /// Classified range.
    pub range: ApiRange,
    /// Rounded temperature in °C.
    pub temperature: i32,
    /// Rounded humidity.
    pub humidity: String,
    /// Rounded apparent temperature.
    pub feels_like: String,
    /// Rounded pressure.
    pub pressure: String,
    /// Rounded wind speed.
    pub wind_speed: String,
    /// Conditions description.
    pub description: String,
    /// Where the geocoder placed the city.
    pub coordinates: ApiCoordinates,
}

impl From<Registration> for ApiRegistration {
    fn from(r: Registration) -> Self {
        Self {
            measurement_id: r.measurement_id,
            city: r.city.into(),
            range: r.range.into(),
            temperature: r.readings.temperature,
            humidity: r.readings.humidity,
            feels_like: r.readings.feels_like,
            pressure: r.readings.pressure,
            wind_speed: r.readings.wind_speed,
            description: r.readings.description,
            coordinates: r.coordinates.into(),
        }
    }
}

/// A stored measurement as listed by `GET /measurements`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMeasurement {
    /// Measurement ID.
    pub id: i64,
    /// Capture date, `YYYY-MM-DD`.
    pub captured_on: String,
    /// Rounded temperature in °C.
    pub temperature: i32,
    /// Rounded humidity.
    pub humidity: String,
    /// Rounded apparent temperature.
    pub feels_like: String,
    /// Rounded pressure.
    pub pressure: String,
    /// Rounded wind speed.
    pub wind_speed: String,
    /// Conditions description.
    pub description: String,
    /// The city.
    pub city: ApiCity,
    /// The range.
    pub range: ApiRange,
}

impl From<MeasurementRow> for ApiMeasurement {
    fn from(row: MeasurementRow) -> Self {
        Self {
            id: row.id,
            captured_on: row.captured_on.format("%Y-%m-%d").to_string(),
            temperature: row.temperature,
            humidity: row.humidity,
            feels_like: row.feels_like,
            pressure: row.pressure,
            wind_speed: row.wind_speed,
            description: row.description,
            city: row.city.into(),
            range: row.range.into(),
        }
    }
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Short, stable category.
    pub error: String,
    /// Human-readable detail.
    pub detail: String,
}

impl ApiError {
    /// Builds an error body.
    #[must_use]
    pub fn new(error: &str, detail: impl Into<String>) -> Self {
        Self {
            error: error.to_string(),
            detail: detail.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn hot() -> RangeRow {
        RangeRow {
            id: 4,
            name: "HOT".to_string(),
            lower_bound: Some(20),
            upper_bound: Some(30),
        }
    }

    #[test]
    fn register_request_accepts_city_or_ciudad() {
        let req: ApiRegisterRequest = serde_json::from_str(r#"{"city": "Rosario"}"#).unwrap();
        assert_eq!(req.city.as_deref(), Some("Rosario"));

        let req: ApiRegisterRequest = serde_json::from_str(r#"{"ciudad": "Salta"}"#).unwrap();
        assert_eq!(req.city.as_deref(), Some("Salta"));

        let req: ApiRegisterRequest = serde_json::from_str(r#"{"town": "Salta"}"#).unwrap();
        assert_eq!(req.city, None);
    }

    #[test]
    fn range_serializes_open_bounds_as_null() {
        let range = ApiRange::from(RangeRow {
            id: 5,
            name: "VERY_HOT".to_string(),
            lower_bound: Some(30),
            upper_bound: None,
        });
        let json = serde_json::to_value(&range).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 5, "name": "VERY_HOT", "lowerBound": 30, "upperBound": null})
        );
    }

    #[test]
    fn measurement_uses_camel_case_and_iso_date() {
        let row = MeasurementRow {
            id: 9,
            captured_on: NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
            temperature: 22,
            humidity: "40".to_string(),
            feels_like: "21".to_string(),
            pressure: "1013".to_string(),
            wind_speed: "12".to_string(),
            description: "Partly cloudy".to_string(),
            city: CityRow {
                id: 3,
                name: "Córdoba".to_string(),
                region: "Córdoba".to_string(),
                country: "AR".to_string(),
            },
            range: hot(),
        };

        let json = serde_json::to_value(ApiMeasurement::from(row)).unwrap();
        assert_eq!(json["capturedOn"], "2025-11-03");
        assert_eq!(json["feelsLike"], "21");
        assert_eq!(json["windSpeed"], "12");
        assert_eq!(json["city"]["name"], "Córdoba");
        assert_eq!(json["range"]["lowerBound"], 20);
    }
}
