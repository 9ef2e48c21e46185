//! City store: exact-name lookup and insert.
//!
//! Nothing here guards against two concurrent registrations inserting the
//! same brand-new name; the `UNIQUE` constraint on `cities.name` turns the
//! loser into a [`DbError::Database`].

use moosicbox_json_utils::database::ToValue as _;
use switchy_database::{Database, DatabaseValue, Row};
use weather_lab_database_models::CityRow;

use super::conversion;
use crate::DbError;

/// Looks up a city by exact name. No case folding or trimming is applied.
///
/// # Errors
///
/// Returns [`DbError`] if the query fails or a row cannot be decoded.
pub async fn find_by_name(db: &dyn Database, name: &str) -> Result<Option<CityRow>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT id, name, region, country FROM cities WHERE name = $1",
            &[DatabaseValue::String(name.to_string())],
        )
        .await?;

    rows.first().map(city_from_row).transpose()
}

/// Inserts a new city and returns its id.
///
/// # Errors
///
/// Returns [`DbError`] if the insert fails (including a unique violation
/// on `name`) or the generated id cannot be read back.
pub async fn create(
    db: &dyn Database,
    name: &str,
    region: &str,
    country: &str,
) -> Result<i64, DbError> {
    let rows = db
        .query_raw_params(
            "INSERT INTO cities (name, region, country)
             VALUES ($1, $2, $3)
             RETURNING id",
            &[
                DatabaseValue::String(name.to_string()),
                DatabaseValue::String(region.to_string()),
                DatabaseValue::String(country.to_string()),
            ],
        )
        .await?;

    let row = rows.first().ok_or_else(|| DbError::Conversion {
        message: "Failed to get city id from insert".to_string(),
    })?;

    let id: i64 = row.to_value("id").map_err(|e| DbError::Conversion {
        message: format!("Failed to parse city id: {e}"),
    })?;

    log::debug!("Created city {name:?} with id {id}");

    Ok(id)
}

/// Returns every city, ordered by id. Backs the CLI `cities` listing.
///
/// # Errors
///
/// Returns [`DbError`] if the query fails or a row cannot be decoded.
pub async fn list_all(db: &dyn Database) -> Result<Vec<CityRow>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT id, name, region, country FROM cities ORDER BY id",
            &[],
        )
        .await?;

    rows.iter().map(city_from_row).collect()
}

fn city_from_row(row: &Row) -> Result<CityRow, DbError> {
    Ok(CityRow {
        id: row.to_value("id").map_err(|e| conversion("id", e))?,
        name: row.to_value("name").map_err(|e| conversion("name", e))?,
        region: row.to_value("region").map_err(|e| conversion("region", e))?,
        country: row.to_value("country").map_err(|e| conversion("country", e))?,
    })
}
