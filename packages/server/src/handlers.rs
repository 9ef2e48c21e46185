//! HTTP handler functions for the weather lab API.

use actix_web::{HttpResponse, web};
use weather_lab_registration::RegistrationError;
use weather_lab_server_models::{
    ApiError, ApiHealth, ApiMeasurement, ApiRegisterRequest, ApiRegistration,
};

use crate::AppState;

/// `GET /health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /measurements`
///
/// The body is parsed leniently: anything that does not yield a non-blank
/// `city` string is a 400, never a deserializer error page. The name is
/// forwarded to the geocoder exactly as submitted.
pub async fn create_measurement(state: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    let request: ApiRegisterRequest = serde_json::from_slice(&body).unwrap_or_default();

    let Some(city) = request
        .city
        .as_deref()
        .filter(|c| !c.trim().is_empty())
    else {
        log::warn!("Rejected measurement request without a city");
        return HttpResponse::BadRequest().json(ApiError::new(
            "Missing required field",
            "Request body must be JSON with a non-empty \"city\" string",
        ));
    };

    match weather_lab_registration::register_measurement(
        state.db.as_ref(),
        state.weather.as_ref(),
        city,
    )
    .await
    {
        Ok(registration) => HttpResponse::Created().json(ApiRegistration::from(registration)),
        Err(e) => registration_error(&e),
    }
}

/// `GET /measurements`
///
/// Lists every stored measurement, newest first.
pub async fn list_measurements(state: web::Data<AppState>) -> HttpResponse {
    match weather_lab_registration::list_measurements(state.db.as_ref()).await {
        Ok(rows) => {
            let measurements: Vec<ApiMeasurement> =
                rows.into_iter().map(ApiMeasurement::from).collect();
            HttpResponse::Ok().json(measurements)
        }
        Err(e) => {
            log::error!("Failed to list measurements: {e}");
            HttpResponse::InternalServerError()
                .json(ApiError::new("Failed to list measurements", e.to_string()))
        }
    }
}

fn registration_error(e: &RegistrationError) -> HttpResponse {
    match e {
        RegistrationError::CityNotFound { .. } => {
            log::warn!("{e}");
            HttpResponse::NotFound().json(ApiError::new("City not found", e.to_string()))
        }
        RegistrationError::WeatherApi(_) => {
            log::warn!("{e}");
            HttpResponse::BadGateway().json(ApiError::new("Weather service error", e.to_string()))
        }
        RegistrationError::InvalidTemperatureRange { .. } => {
            log::error!("{e}");
            HttpResponse::InternalServerError()
                .json(ApiError::new("Invalid temperature range", e.to_string()))
        }
        RegistrationError::Database(_) => {
            log::error!("Failed to register measurement: {e}");
            HttpResponse::InternalServerError()
                .json(ApiError::new("Internal server error", e.to_string()))
        }
    }
}
