#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Database row types for the weather lab.
//!
//! These types represent the shapes of data as stored in and retrieved from
//! the relational store. They are distinct from the API response types in
//! `weather_lab_server_models`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A city row. Created on first sighting of a name and never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityRow {
    /// Primary key.
    pub id: i64,
    /// Unique lookup key, matched exactly.
    pub name: String,
    /// Region (province/state) label.
    pub region: String,
    /// Country label (ISO code when known).
    pub country: String,
}

/// A temperature classification range.
///
/// Membership is `lower_bound <= t < upper_bound`, where a missing bound
/// is unbounded on that side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeRow {
    /// Primary key.
    pub id: i64,
    /// Display name (e.g. `"MILD"`).
    pub name: String,
    /// Inclusive lower bound, `None` for unbounded below.
    pub lower_bound: Option<i32>,
    /// Exclusive upper bound, `None` for unbounded above.
    pub upper_bound: Option<i32>,
}

impl RangeRow {
    /// Whether `temperature` falls inside this range.
    #[must_use]
    pub fn contains(&self, temperature: i32) -> bool {
        self.lower_bound.is_none_or(|lower| lower <= temperature)
            && self.upper_bound.is_none_or(|upper| temperature < upper)
    }
}

/// Values for a measurement insert. The capture date is not part of it;
/// the store assigns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMeasurement {
    /// Owning city.
    pub city_id: i64,
    /// Owning range.
    pub range_id: i64,
    /// Rounded temperature in °C.
    pub temperature: i32,
    /// Relative humidity, stored as text.
    pub humidity: String,
    /// Apparent temperature, stored as text.
    pub feels_like: String,
    /// Sea-level pressure, stored as text.
    pub pressure: String,
    /// Wind speed, stored as text.
    pub wind_speed: String,
    /// Human-readable conditions.
    pub description: String,
}

/// A stored measurement, expanded with its city and range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementRow {
    /// Primary key.
    pub id: i64,
    /// Date the measurement was captured (store clock).
    pub captured_on: NaiveDate,
    /// Rounded temperature in °C.
    pub temperature: i32,
    /// Relative humidity.
    pub humidity: String,
    /// Apparent temperature.
    pub feels_like: String,
    /// Sea-level pressure.
    pub pressure: String,
    /// Wind speed.
    pub wind_speed: String,
    /// Human-readable conditions.
    pub description: String,
    /// The owning city.
    pub city: CityRow,
    /// The owning range.
    pub range: RangeRow,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(lower: Option<i32>, upper: Option<i32>) -> RangeRow {
        RangeRow {
            id: 1,
            name: "TEST".to_string(),
            lower_bound: lower,
            upper_bound: upper,
        }
    }

    #[test]
    fn lower_bound_is_inclusive_upper_is_exclusive() {
        let r = range(Some(10), Some(20));
        assert!(!r.contains(9));
        assert!(r.contains(10));
        assert!(r.contains(19));
        assert!(!r.contains(20));
    }

    #[test]
    fn missing_bounds_are_unbounded() {
        assert!(range(None, Some(0)).contains(i32::MIN));
        assert!(!range(None, Some(0)).contains(0));
        assert!(range(Some(30), None).contains(i32::MAX));
        assert!(range(None, None).contains(0));
    }
}
