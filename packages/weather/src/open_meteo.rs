//! Open-Meteo geocoding and forecast client.
//!
//! Both endpoints are free and keyless. The client is constructed
//! explicitly from a [`WeatherServiceConfig`] so base URLs and the timeout
//! can point at a test server.
//!
//! See <https://open-meteo.com/en/docs/geocoding-api> and
//! <https://open-meteo.com/en/docs>.

use async_trait::async_trait;
use serde::Deserialize;

use crate::{CurrentConditions, ResolvedCity, WeatherError, WeatherProvider, WeatherServiceConfig};

/// Current-condition variables requested from the forecast endpoint.
pub const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,pressure_msl,wind_speed_10m,weather_code";

/// HTTP client for Open-Meteo.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: reqwest::Client,
    config: WeatherServiceConfig,
}

impl OpenMeteoClient {
    /// Builds a client with the configured timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError`] if the timeout is invalid or the HTTP client
    /// cannot be constructed.
    pub fn new(config: WeatherServiceConfig) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout()?)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    async fn resolve_city(&self, name: &str) -> Result<ResolvedCity, WeatherError> {
        log::debug!("Geocoding {name:?} via {}", self.config.geocoding_url);

        let resp = self
            .client
            .get(&self.config.geocoding_url)
            .query(&[
                ("name", name),
                ("count", "1"),
                ("language", self.config.language.as_str()),
                ("format", "json"),
            ])
            .send()
            .await?;

        let body = success_body(resp, "geocoding").await?;
        parse_geocoding(name, &body)
    }

    async fn fetch_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, WeatherError> {
        log::debug!("Fetching current conditions at ({latitude}, {longitude})");

        let resp = self
            .client
            .get(&self.config.forecast_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        let body = success_body(resp, "forecast").await?;
        parse_current(&body)
    }
}

/// Returns the response body, or [`WeatherError::Status`] with the body
/// attached when the status is not 2xx.
async fn success_body(
    resp: reqwest::Response,
    service: &'static str,
) -> Result<String, WeatherError> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        log::warn!("{service} returned {status}");
        return Err(WeatherError::Status {
            service,
            status: status.as_u16(),
            body,
        });
    }

    Ok(body)
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: Option<String>,
    country: Option<String>,
    country_code: Option<String>,
    admin1: Option<String>,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    current: Option<CurrentBlock>,
}

#[derive(Debug, Default, Deserialize)]
struct CurrentBlock {
    temperature_2m: Option<f64>,
    relative_humidity_2m: Option<f64>,
    apparent_temperature: Option<f64>,
    pressure_msl: Option<f64>,
    wind_speed_10m: Option<f64>,
    weather_code: Option<i64>,
}

/// Parses a geocoding search response, keeping only the first result.
fn parse_geocoding(query: &str, body: &str) -> Result<ResolvedCity, WeatherError> {
    let parsed: GeocodingResponse = serde_json::from_str(body).map_err(|e| WeatherError::Parse {
        message: format!("Invalid geocoding response: {e}"),
    })?;

    let Some(first) = parsed.results.and_then(|r| r.into_iter().next()) else {
        return Err(WeatherError::CityNotFound {
            name: query.to_string(),
        });
    };

    Ok(ResolvedCity {
        name: first.name.unwrap_or_else(|| query.to_string()),
        country: first.country.unwrap_or_default(),
        country_code: first.country_code.unwrap_or_default(),
        region: first.admin1.filter(|r| !r.is_empty()),
        latitude: first.latitude,
        longitude: first.longitude,
    })
}

/// Parses a forecast response's `current` block. Absent readings stay
/// `None`; an absent temperature becomes `0.0`.
fn parse_current(body: &str) -> Result<CurrentConditions, WeatherError> {
    let parsed: ForecastResponse = serde_json::from_str(body).map_err(|e| WeatherError::Parse {
        message: format!("Invalid forecast response: {e}"),
    })?;

    let current = parsed.current.unwrap_or_default();

    Ok(CurrentConditions {
        temperature: current.temperature_2m.unwrap_or(0.0),
        humidity: current.relative_humidity_2m,
        feels_like: current.apparent_temperature,
        pressure: current.pressure_msl,
        wind_speed: current.wind_speed_10m,
        weather_code: current.weather_code,
    })
}
