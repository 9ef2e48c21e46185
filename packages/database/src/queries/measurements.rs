//! Measurement store: append-only inserts and the joined listing.

use chrono::NaiveDate;
use moosicbox_json_utils::database::ToValue as _;
use switchy_database::{Database, DatabaseValue, Row};
use weather_lab_database_models::{CityRow, MeasurementRow, NewMeasurement, RangeRow};

use super::conversion;
use crate::DbError;

/// Inserts a measurement and returns its id.
///
/// The capture date is taken from the store's clock (`CURRENT_DATE`), not
/// from the caller.
///
/// # Errors
///
/// Returns [`DbError`] if the insert fails (e.g. a dangling city or range
/// id) or the generated id cannot be read back.
pub async fn insert(db: &dyn Database, measurement: &NewMeasurement) -> Result<i64, DbError> {
    let rows = db
        .query_raw_params(
            "INSERT INTO measurements (
                city_id, range_id, captured_on, temperature,
                humidity, feels_like, pressure, wind_speed, description
            ) VALUES (
                $1, $2, CURRENT_DATE, $3,
                $4, $5, $6, $7, $8
            )
            RETURNING id",
            &[
                DatabaseValue::Int64(measurement.city_id),
                DatabaseValue::Int64(measurement.range_id),
                DatabaseValue::Int32(measurement.temperature),
                DatabaseValue::String(measurement.humidity.clone()),
                DatabaseValue::String(measurement.feels_like.clone()),
                DatabaseValue::String(measurement.pressure.clone()),
                DatabaseValue::String(measurement.wind_speed.clone()),
                DatabaseValue::String(measurement.description.clone()),
            ],
        )
        .await?;

    let row = rows.first().ok_or_else(|| DbError::Conversion {
        message: "Failed to get measurement id from insert".to_string(),
    })?;

    let id: i64 = row.to_value("id").map_err(|e| DbError::Conversion {
        message: format!("Failed to parse measurement id: {e}"),
    })?;

    Ok(id)
}

/// Lists every measurement with its city and range, newest first.
///
/// Ordered by capture date descending, then id descending so that rows
/// captured on the same day come back in reverse insertion order.
///
/// # Errors
///
/// Returns [`DbError`] if the query fails or a row cannot be decoded.
pub async fn list_all(db: &dyn Database) -> Result<Vec<MeasurementRow>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT m.id, CAST(m.captured_on AS TEXT) AS captured_on, m.temperature,
                    m.humidity, m.feels_like, m.pressure, m.wind_speed, m.description,
                    c.id AS city_id, c.name AS city_name,
                    c.region AS city_region, c.country AS city_country,
                    r.id AS range_id, r.name AS range_name,
                    r.lower_bound AS range_lower_bound, r.upper_bound AS range_upper_bound
             FROM measurements m
             JOIN cities c ON c.id = m.city_id
             JOIN temperature_ranges r ON r.id = m.range_id
             ORDER BY m.captured_on DESC, m.id DESC",
            &[],
        )
        .await?;

    rows.iter().map(measurement_from_row).collect()
}

fn measurement_from_row(row: &Row) -> Result<MeasurementRow, DbError> {
    let captured_on: String = row
        .to_value("captured_on")
        .map_err(|e| conversion("captured_on", e))?;
    let captured_on = NaiveDate::parse_from_str(&captured_on, "%Y-%m-%d")
        .map_err(|e| conversion("captured_on", e))?;

    Ok(MeasurementRow {
        id: row.to_value("id").map_err(|e| conversion("id", e))?,
        captured_on,
        temperature: row
            .to_value("temperature")
            .map_err(|e| conversion("temperature", e))?,
        humidity: row
            .to_value("humidity")
            .map_err(|e| conversion("humidity", e))?,
        feels_like: row
            .to_value("feels_like")
            .map_err(|e| conversion("feels_like", e))?,
        pressure: row
            .to_value("pressure")
            .map_err(|e| conversion("pressure", e))?,
        wind_speed: row
            .to_value("wind_speed")
            .map_err(|e| conversion("wind_speed", e))?,
        description: row
            .to_value("description")
            .map_err(|e| conversion("description", e))?,
        city: CityRow {
            id: row.to_value("city_id").map_err(|e| conversion("city_id", e))?,
            name: row
                .to_value("city_name")
                .map_err(|e| conversion("city_name", e))?,
            region: row
                .to_value("city_region")
                .map_err(|e| conversion("city_region", e))?,
            country: row
                .to_value("city_country")
                .map_err(|e| conversion("city_country", e))?,
        },
        range: RangeRow {
            id: row
                .to_value("range_id")
                .map_err(|e| conversion("range_id", e))?,
            name: row
                .to_value("range_name")
                .map_err(|e| conversion("range_name", e))?,
            lower_bound: row
                .to_value("range_lower_bound")
                .map_err(|e| conversion("range_lower_bound", e))?,
            upper_bound: row
                .to_value("range_upper_bound")
                .map_err(|e| conversion("range_upper_bound", e))?,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::{cities, ranges};
    use crate::test_utils::migrated_sqlite;

    fn reading(city_id: i64, range_id: i64, temperature: i32) -> NewMeasurement {
        NewMeasurement {
            city_id,
            range_id,
            temperature,
            humidity: "40".to_string(),
            feels_like: temperature.to_string(),
            pressure: "1013".to_string(),
            wind_speed: "12".to_string(),
            description: "Overcast".to_string(),
        }
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let (_dir, db) = migrated_sqlite().await;
        assert!(list_all(db.as_ref()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_expands_city_and_range_on_list() {
        let (_dir, db) = migrated_sqlite().await;
        let city_id = cities::create(db.as_ref(), "Ushuaia", "Tierra del Fuego", "AR")
            .await
            .unwrap();
        let range = ranges::find_for_temperature(db.as_ref(), 4)
            .await
            .unwrap()
            .unwrap();

        let id = insert(db.as_ref(), &reading(city_id, range.id, 4)).await.unwrap();
        let listed = list_all(db.as_ref()).await.unwrap();

        assert_eq!(listed.len(), 1);
        let row = &listed[0];
        assert_eq!(row.id, id);
        assert_eq!(row.temperature, 4);
        assert_eq!(row.feels_like, "4");
        assert_eq!(row.city.name, "Ushuaia");
        assert_eq!(row.city.region, "Tierra del Fuego");
        assert_eq!(row.range, range);
        assert_eq!(row.captured_on, chrono::Utc::now().date_naive());
    }

    #[tokio::test]
    async fn same_day_rows_come_back_newest_first() {
        let (_dir, db) = migrated_sqlite().await;
        let city_id = cities::create(db.as_ref(), "Mendoza", "Mendoza", "AR")
            .await
            .unwrap();
        let range = ranges::find_for_temperature(db.as_ref(), 15)
            .await
            .unwrap()
            .unwrap();

        let mut ids = Vec::new();
        for t in [15, 16, 17] {
            ids.push(insert(db.as_ref(), &reading(city_id, range.id, t)).await.unwrap());
        }
        ids.reverse();

        let listed: Vec<i64> = list_all(db.as_ref())
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(listed, ids);
    }

    #[tokio::test]
    async fn orders_by_date_then_id_descending() {
        let (_dir, db) = migrated_sqlite().await;
        let city_id = cities::create(db.as_ref(), "Rosario", "Santa Fe", "AR")
            .await
            .unwrap();

        // Insertion order deliberately differs from date order.
        for (id, date) in [
            (1, "2025-03-02"),
            (2, "2025-03-04"),
            (3, "2025-03-01"),
            (4, "2025-03-04"),
            (5, "2025-03-02"),
        ] {
            db.exec_raw_params(
                "INSERT INTO measurements (
                    id, city_id, range_id, captured_on, temperature,
                    humidity, feels_like, pressure, wind_speed, description
                ) VALUES ($1, $2, 3, $3, 12, '0', '12', '0', '0', 'No data')",
                &[
                    DatabaseValue::Int64(id),
                    DatabaseValue::Int64(city_id),
                    DatabaseValue::String(date.to_string()),
                ],
            )
            .await
            .unwrap();
        }

        let listed: Vec<(i64, String)> = list_all(db.as_ref())
            .await
            .unwrap()
            .into_iter()
            .map(|m| (m.id, m.captured_on.to_string()))
            .collect();

        assert_eq!(
            listed,
            vec![
                (4, "2025-03-04".to_string()),
                (2, "2025-03-04".to_string()),
                (5, "2025-03-02".to_string()),
                (1, "2025-03-02".to_string()),
                (3, "2025-03-01".to_string()),
            ]
        );
    }
}
