#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Admin CLI for the weather lab.
//!
//! ```text
//! weather_lab_cli init-db
//! weather_lab_cli ranges
//! weather_lab_cli cities
//! weather_lab_cli measurements [--limit 20]
//! weather_lab_cli serve [--bind 0.0.0.0] [--port 5001]
//! ```
//!
//! All commands connect via `DATABASE_URL`.

use clap::{Parser, Subcommand};
use weather_lab_database::queries::{cities, ranges};
use weather_lab_database::{db, run_migrations};
use weather_lab_database_models::{CityRow, RangeRow};
use weather_lab_server::ServerConfig;

#[derive(Parser)]
#[command(name = "weather_lab_cli", about = "Weather lab administration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply migrations and print the seeded temperature ranges
    InitDb,
    /// List temperature ranges
    Ranges,
    /// List known cities
    Cities,
    /// List stored measurements, newest first
    Measurements {
        /// Maximum number of measurements to show
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Run the HTTP API server
    Serve {
        /// Bind address (overrides `BIND_ADDR`)
        #[arg(long)]
        bind: Option<String>,
        /// Port (overrides `PORT`)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::InitDb => {
            let conn = db::connect_from_env().await?;
            log::info!("Applying migrations...");
            run_migrations(conn.db.as_ref(), conn.backend).await?;
            println!("Migrations applied ({:?}).\n", conn.backend);
            print_ranges(&ranges::list_all(conn.db.as_ref()).await?);
        }
        Commands::Ranges => {
            let conn = db::connect_from_env().await?;
            print_ranges(&ranges::list_all(conn.db.as_ref()).await?);
        }
        Commands::Cities => {
            let conn = db::connect_from_env().await?;
            print_cities(&cities::list_all(conn.db.as_ref()).await?);
        }
        Commands::Measurements { limit } => {
            let conn = db::connect_from_env().await?;
            let rows = weather_lab_registration::list_measurements(conn.db.as_ref()).await?;

            if rows.is_empty() {
                println!("No measurements found.");
                return Ok(());
            }

            println!(
                "{:<6} {:<11} {:<24} {:>5} {:<10} DESCRIPTION",
                "ID", "DATE", "CITY", "TEMP", "RANGE"
            );
            println!("{}", "-".repeat(80));

            let shown = limit.unwrap_or(rows.len());
            for row in rows.iter().take(shown) {
                println!(
                    "{:<6} {:<11} {:<24} {:>5} {:<10} {}",
                    row.id,
                    row.captured_on.format("%Y-%m-%d").to_string(),
                    row.city.name,
                    row.temperature,
                    row.range.name,
                    row.description
                );
            }

            println!("\n{} of {} measurement(s)", shown.min(rows.len()), rows.len());
        }
        Commands::Serve { bind, port } => {
            let mut config = ServerConfig::from_env();
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            if let Some(port) = port {
                config.port = port;
            }

            // The server uses actix-web's runtime, so run it on a blocking
            // thread rather than nesting it inside this tokio runtime.
            tokio::task::spawn_blocking(move || {
                actix_rt::System::new().block_on(weather_lab_server::run_server(config))
            })
            .await??;
        }
    }

    Ok(())
}

fn print_ranges(rows: &[RangeRow]) {
    println!("{:<4} {:<10} {:>6} {:>6}", "ID", "NAME", "FROM", "TO");
    println!("{}", "-".repeat(30));

    for range in rows {
        println!(
            "{:<4} {:<10} {:>6} {:>6}",
            range.id,
            range.name,
            bound_label(range.lower_bound, "-inf"),
            bound_label(range.upper_bound, "+inf")
        );
    }
}

fn print_cities(rows: &[CityRow]) {
    if rows.is_empty() {
        println!("No cities found.");
        return;
    }

    println!("{:<6} {:<24} {:<24} COUNTRY", "ID", "NAME", "REGION");
    println!("{}", "-".repeat(64));

    for city in rows {
        println!(
            "{:<6} {:<24} {:<24} {}",
            city.id, city.name, city.region, city.country
        );
    }
}

fn bound_label(bound: Option<i32>, open: &str) -> String {
    bound.map_or_else(|| open.to_string(), |b| b.to_string())
}
