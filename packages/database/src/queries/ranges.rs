//! Range store: read-only access to the temperature classification table.

use moosicbox_json_utils::database::ToValue as _;
use switchy_database::{Database, DatabaseValue, Row};
use weather_lab_database_models::RangeRow;

use super::conversion;
use crate::DbError;

/// Finds the range with `lower_bound <= temperature < upper_bound`, treating
/// `NULL` bounds as unbounded.
///
/// Returns `Ok(None)` when no configured range covers `temperature`. The
/// ranges are expected to partition the integer line; if they overlap, the
/// lowest id wins.
///
/// # Errors
///
/// Returns [`DbError`] if the query fails or a row cannot be decoded.
pub async fn find_for_temperature(
    db: &dyn Database,
    temperature: i32,
) -> Result<Option<RangeRow>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT id, name, lower_bound, upper_bound
             FROM temperature_ranges
             WHERE (lower_bound IS NULL OR lower_bound <= $1)
               AND (upper_bound IS NULL OR $1 < upper_bound)
             ORDER BY id
             LIMIT 1",
            &[DatabaseValue::Int32(temperature)],
        )
        .await?;

    rows.first().map(range_from_row).transpose()
}

/// Returns every configured range, ordered by id.
///
/// # Errors
///
/// Returns [`DbError`] if the query fails or a row cannot be decoded.
pub async fn list_all(db: &dyn Database) -> Result<Vec<RangeRow>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT id, name, lower_bound, upper_bound
             FROM temperature_ranges
             ORDER BY id",
            &[],
        )
        .await?;

    rows.iter().map(range_from_row).collect()
}

fn range_from_row(row: &Row) -> Result<RangeRow, DbError> {
    Ok(RangeRow {
        id: row.to_value("id").map_err(|e| conversion("id", e))?,
        name: row.to_value("name").map_err(|e| conversion("name", e))?,
        lower_bound: row
            .to_value("lower_bound")
            .map_err(|e| conversion("lower_bound", e))?,
        upper_bound: row
            .to_value("upper_bound")
            .map_err(|e| conversion("upper_bound", e))?,
    })
}
