#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the weather lab.
//!
//! Two resources: `/measurements` (register one from live weather data, or
//! list all) and `/health`. All request handling delegates to
//! `weather_lab_registration`; this crate only maps outcomes to status
//! codes and JSON bodies.

mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use switchy_database::Database;
use weather_lab_database::{db, run_migrations};
use weather_lab_weather::{OpenMeteoClient, WeatherProvider, WeatherServiceConfig};

/// Port used when `PORT` is unset or unparseable.
pub const DEFAULT_PORT: u16 = 5001;

/// Address used when `BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";

/// Shared application state.
pub struct AppState {
    /// Database connection.
    pub db: Arc<dyn Database>,
    /// Geocoding and current-conditions provider.
    pub weather: Arc<dyn WeatherProvider>,
}

/// Where the HTTP server listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind address.
    pub bind_addr: String,
    /// TCP port.
    pub port: u16,
}

impl ServerConfig {
    /// Reads `BIND_ADDR` and `PORT`, falling back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }
}

/// Registers the API routes.
///
/// Used by [`run_server`] and by tests that build the app with their own
/// [`AppState`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health))
        .service(
            web::resource("/measurements")
                .route(web::post().to(handlers::create_measurement))
                .route(web::get().to(handlers::list_measurements)),
        );
}

/// Starts the weather lab API server.
///
/// Connects to the database from `DATABASE_URL`, runs migrations, builds
/// the Open-Meteo client from its embedded defaults plus environment
/// overrides, and starts the Actix-Web HTTP server. The caller installs
/// the logger and provides the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
///
/// # Panics
///
/// Panics if the database connection fails, migrations fail, or the
/// weather client configuration is invalid.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    log::info!("Connecting to database...");
    let conn = db::connect_from_env()
        .await
        .expect("Failed to connect to database");

    log::info!("Running migrations...");
    run_migrations(conn.db.as_ref(), conn.backend)
        .await
        .expect("Failed to run migrations");

    let weather_config =
        WeatherServiceConfig::from_env().expect("Invalid weather service configuration");
    log::info!(
        "Using {} (geocoding: {}, forecast: {})",
        weather_config.name,
        weather_config.geocoding_url,
        weather_config.forecast_url
    );
    let weather = OpenMeteoClient::new(weather_config).expect("Failed to build weather client");

    let state = web::Data::new(AppState {
        db: Arc::from(conn.db),
        weather: Arc::new(weather),
    });

    let ServerConfig { bind_addr, port } = config;
    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
