#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Measurement registration.
//!
//! [`register_measurement`] runs one linear sequence per request:
//!
//! 1. resolve the city name with the geocoder
//! 2. fetch current conditions at the resolved coordinates
//! 3. round and coerce the readings ([`readings::coerce`])
//! 4. find or create the city row under the *resolved* name
//! 5. classify the temperature into a range
//! 6. insert the measurement
//!
//! Nothing is retried and nothing is compensated. A failure in steps 1-2
//! writes nothing; a failure in step 5 or 6 leaves a city created in step 4
//! in place.

pub mod readings;

use switchy_database::Database;
use thiserror::Error;
use weather_lab_database::DbError;
use weather_lab_database::queries::{cities, measurements, ranges};
use weather_lab_database_models::{CityRow, MeasurementRow, NewMeasurement};
use weather_lab_registration_models::{Coordinates, Registration};
use weather_lab_weather::{ResolvedCity, WeatherError, WeatherProvider};

/// Region label stored when the geocoder does not report one.
pub const UNKNOWN_REGION: &str = "Unknown";

/// Country label stored when the geocoder reports neither code nor name.
pub const UNKNOWN_COUNTRY: &str = "N/A";

/// Errors from the registration flow.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The geocoder had no match for the requested name.
    #[error("No city found matching '{name}'")]
    CityNotFound {
        /// The name as submitted.
        name: String,
    },

    /// The geocoding or weather provider could not be reached or failed.
    #[error("Weather API error: {0}")]
    WeatherApi(#[source] WeatherError),

    /// No configured range covers the temperature. This is a gap in the
    /// reference data, not bad input.
    #[error("No valid temperature range found for {temperature}°C")]
    InvalidTemperatureRange {
        /// The rounded temperature that fell through.
        temperature: i32,
    },

    /// A store operation failed.
    #[error(transparent)]
    Database(#[from] DbError),
}

impl From<WeatherError> for RegistrationError {
    fn from(e: WeatherError) -> Self {
        match e {
            WeatherError::CityNotFound { name } => Self::CityNotFound { name },
            other => Self::WeatherApi(other),
        }
    }
}

/// Registers a measurement for `city_name` using live weather data.
///
/// # Errors
///
/// * [`RegistrationError::CityNotFound`] if the geocoder has no match
/// * [`RegistrationError::WeatherApi`] if either provider call fails
/// * [`RegistrationError::InvalidTemperatureRange`] if no range covers the
///   rounded temperature (the city row has already been written)
/// * [`RegistrationError::Database`] if a store operation fails
pub async fn register_measurement(
    db: &dyn Database,
    weather: &dyn WeatherProvider,
    city_name: &str,
) -> Result<Registration, RegistrationError> {
    let resolved = weather.resolve_city(city_name).await?;
    log::debug!(
        "Resolved {city_name:?} to {:?} ({}, {})",
        resolved.name,
        resolved.latitude,
        resolved.longitude
    );

    let conditions = weather
        .fetch_current(resolved.latitude, resolved.longitude)
        .await?;

    let readings = readings::coerce(&conditions);

    let city = find_or_create_city(db, &resolved).await?;

    let range = ranges::find_for_temperature(db, readings.temperature)
        .await?
        .ok_or(RegistrationError::InvalidTemperatureRange {
            temperature: readings.temperature,
        })?;

    let measurement_id = measurements::insert(
        db,
        &NewMeasurement {
            city_id: city.id,
            range_id: range.id,
            temperature: readings.temperature,
            humidity: readings.humidity.clone(),
            feels_like: readings.feels_like.clone(),
            pressure: readings.pressure.clone(),
            wind_speed: readings.wind_speed.clone(),
            description: readings.description.clone(),
        },
    )
    .await?;

    log::info!(
        "Registered measurement {measurement_id} for {} ({}°C, {})",
        city.name,
        readings.temperature,
        range.name
    );

    Ok(Registration {
        measurement_id,
        city,
        range,
        readings,
        coordinates: Coordinates {
            latitude: resolved.latitude,
            longitude: resolved.longitude,
            country_code: resolved.country_code,
        },
    })
}

/// Lists all stored measurements, newest first.
///
/// # Errors
///
/// Returns [`RegistrationError::Database`] if the query fails.
pub async fn list_measurements(
    db: &dyn Database,
) -> Result<Vec<MeasurementRow>, RegistrationError> {
    Ok(measurements::list_all(db).await?)
}

async fn find_or_create_city(
    db: &dyn Database,
    resolved: &ResolvedCity,
) -> Result<CityRow, DbError> {
    if let Some(city) = cities::find_by_name(db, &resolved.name).await? {
        return Ok(city);
    }

    let region = resolved
        .region
        .clone()
        .unwrap_or_else(|| UNKNOWN_REGION.to_string());
    let country = country_label(resolved).to_string();
    let id = cities::create(db, &resolved.name, &region, &country).await?;

    Ok(CityRow {
        id,
        name: resolved.name.clone(),
        region,
        country,
    })
}

/// ISO code if known, else the country name, else [`UNKNOWN_COUNTRY`].
fn country_label(resolved: &ResolvedCity) -> &str {
    [resolved.country_code.as_str(), resolved.country.as_str()]
        .into_iter()
        .find(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_COUNTRY)
}
