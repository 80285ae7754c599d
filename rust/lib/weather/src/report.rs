use serde::Serialize;
use serde_json::Value;

use crate::error::WeatherError;

/// Shown when the API answered but carried no forecast for the location.
pub const NOT_AVAILABLE: &str = "Weather data not available.";

/// Shown when the request itself failed or the body was not JSON.
pub const FETCH_FAILED: &str = "Failed to fetch weather.";

/// First daily interval of a timelines response.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyWeather {
    /// `temperatureAvg`, degrees Celsius.
    pub temperature_avg: Option<f64>,
    /// `weatherCodeMax`.
    pub weather_code: Option<i64>,
}

/// What the weather card displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WeatherReport {
    Available {
        city: String,
        temperature_avg: Option<f64>,
        weather_code: Option<i64>,
        description: String,
    },
    Unavailable {
        city: String,
        error: String,
    },
}

impl WeatherReport {
    pub fn available(city: &str, daily: DailyWeather) -> Self {
        WeatherReport::Available {
            city: city.to_string(),
            description: describe(daily.weather_code),
            temperature_avg: daily.temperature_avg,
            weather_code: daily.weather_code,
        }
    }

    pub fn unavailable(city: &str, error: &str) -> Self {
        WeatherReport::Unavailable {
            city: city.to_string(),
            error: error.to_string(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, WeatherReport::Available { .. })
    }
}

/// Human description of a Tomorrow.io weather code.
pub fn describe(code: Option<i64>) -> String {
    let Some(code) = code else {
        return "Unknown".to_string();
    };
    let known = match code {
        1000 => "Clear",
        1001 => "Cloudy",
        1100 => "Mostly Clear",
        1101 => "Partly Cloudy",
        1102 => "Mostly Cloudy",
        2000 => "Fog",
        4200 => "Light Rain",
        4201 => "Heavy Rain",
        5000 => "Snow",
        8000 => "Thunderstorm",
        _ => return format!("Code {code}"),
    };
    known.to_string()
}

/// Extract `data.timelines[0].intervals[0].values` from a timelines body.
///
/// `Ok(None)` when the path to the first interval is missing, including an
/// empty interval list. A first interval without `values` is malformed and
/// counts as a failed fetch.
pub fn parse_timeline(body: &Value) -> Result<Option<DailyWeather>, WeatherError> {
    let Some(interval) = first_interval(body) else {
        return Ok(None);
    };
    let values = match interval.get("values") {
        None | Some(Value::Null) => {
            return Err(WeatherError::Decode("first interval has no values".to_string()));
        }
        Some(values) => values,
    };

    Ok(Some(DailyWeather {
        temperature_avg: values.get("temperatureAvg").and_then(Value::as_f64),
        weather_code: values
            .get("weatherCodeMax")
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))),
    }))
}

fn first_interval(body: &Value) -> Option<&Value> {
    body.get("data")?
        .get("timelines")?
        .get(0)?
        .get("intervals")?
        .get(0)
}
