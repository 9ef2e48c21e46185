//! WMO weather interpretation codes.
//!
//! See <https://open-meteo.com/en/docs> ("WMO Weather interpretation codes").

/// Description used when the provider did not report a code.
pub const NO_DATA: &str = "No data";

/// Maps a WMO weather code to a short description.
///
/// Unknown codes produce `"Weather code <n>"`; a missing code produces
/// [`NO_DATA`].
#[must_use]
pub fn describe(code: Option<i64>) -> String {
    let Some(code) = code else {
        return NO_DATA.to_string();
    };

    let text = match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with hail",
        99 => "Thunderstorm with heavy hail",
        other => return format!("Weather code {other}"),
    };

    text.to_string()
}
