//! Rounds provider readings and renders the supplementary ones as text.

use weather_lab_registration_models::Readings;
use weather_lab_weather::CurrentConditions;

/// Text stored for an absent humidity, pressure, or wind reading.
pub const MISSING_READING: &str = "0";

/// Rounds to the nearest integer, ties to even (`2.5 -> 2`, `3.5 -> 4`,
/// `-0.5 -> 0`).
///
/// Values outside the `i32` range saturate; `NaN` becomes `0`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_reading(value: f64) -> i32 {
    value.round_ties_even() as i32
}

/// Coerces a provider snapshot into the persisted form.
///
/// The temperature is rounded. Each supplementary reading is rounded and
/// rendered as text; a missing humidity, pressure, or wind speed becomes
/// [`MISSING_READING`] and a missing apparent temperature falls back to the
/// rounded temperature.
#[must_use]
pub fn coerce(conditions: &CurrentConditions) -> Readings {
    let temperature = round_reading(conditions.temperature);
    let as_text = |value: Option<f64>| value.map(|v| round_reading(v).to_string());

    Readings {
        temperature,
        humidity: as_text(conditions.humidity).unwrap_or_else(|| MISSING_READING.to_string()),
        feels_like: as_text(conditions.feels_like).unwrap_or_else(|| temperature.to_string()),
        pressure: as_text(conditions.pressure).unwrap_or_else(|| MISSING_READING.to_string()),
        wind_speed: as_text(conditions.wind_speed).unwrap_or_else(|| MISSING_READING.to_string()),
        description: conditions.description(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions(temperature: f64) -> CurrentConditions {
        CurrentConditions {
            temperature,
            humidity: None,
            feels_like: None,
            pressure: None,
            wind_speed: None,
            weather_code: None,
        }
    }

    #[test]
    fn rounds_to_nearest() {
        assert_eq!(round_reading(21.6), 22);
        assert_eq!(round_reading(21.4), 21);
        assert_eq!(round_reading(-3.7), -4);
    }

    #[test]
    fn ties_round_to_even() {
        assert_eq!(round_reading(0.5), 0);
        assert_eq!(round_reading(1.5), 2);
        assert_eq!(round_reading(2.5), 2);
        assert_eq!(round_reading(21.5), 22);
        assert_eq!(round_reading(22.5), 22);
        assert_eq!(round_reading(-0.5), 0);
        assert_eq!(round_reading(-1.5), -2);
        assert_eq!(round_reading(-2.5), -2);
    }

    #[test]
    fn negative_half_never_renders_negative_zero() {
        let readings = coerce(&CurrentConditions {
            feels_like: Some(-0.5),
            ..conditions(-0.4)
        });
        assert_eq!(readings.temperature, 0);
        assert_eq!(readings.feels_like, "0");
    }

    #[test]
    fn text_round_trips_to_nearest_integer() {
        for value in [21.6, -7.2, 0.49, 1013.25, 99.99, -12.5] {
            let readings = coerce(&CurrentConditions {
                humidity: Some(value),
                ..conditions(0.0)
            });
            let parsed: i32 = readings.humidity.parse().unwrap();
            assert_eq!(parsed, round_reading(value), "value {value}");
            assert!((f64::from(parsed) - value).abs() <= 0.5, "value {value}");
        }
    }

    #[test]
    fn non_finite_values_saturate() {
        assert_eq!(round_reading(f64::NAN), 0);
        assert_eq!(round_reading(1e12), i32::MAX);
        assert_eq!(round_reading(f64::NEG_INFINITY), i32::MIN);
    }

    #[test]
    fn full_snapshot() {
        let readings = coerce(&CurrentConditions {
            temperature: 21.6,
            humidity: Some(40.4),
            feels_like: Some(20.5),
            pressure: Some(1013.2),
            wind_speed: Some(11.5),
            weather_code: Some(2),
        });

        assert_eq!(
            readings,
            Readings {
                temperature: 22,
                humidity: "40".to_string(),
                feels_like: "20".to_string(),
                pressure: "1013".to_string(),
                wind_speed: "12".to_string(),
                description: "Partly cloudy".to_string(),
            }
        );
    }

    #[test]
    fn missing_readings_use_fallbacks() {
        let readings = coerce(&conditions(-3.6));

        assert_eq!(readings.temperature, -4);
        assert_eq!(readings.humidity, MISSING_READING);
        assert_eq!(readings.feels_like, "-4");
        assert_eq!(readings.pressure, MISSING_READING);
        assert_eq!(readings.wind_speed, MISSING_READING);
        assert_eq!(readings.description, "No data");
    }
}
