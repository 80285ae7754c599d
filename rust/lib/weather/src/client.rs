use std::time::Duration;

use serde_json::Value;
use tracing::{error, warn};

use crate::error::WeatherError;
use crate::report::{parse_timeline, DailyWeather, WeatherReport, FETCH_FAILED, NOT_AVAILABLE};

pub const DEFAULT_BASE_URL: &str = "https://api.tomorrow.io";

const FIELDS: &str = "temperatureAvg,weatherCodeMax";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the Tomorrow.io `/v4/timelines` endpoint.
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl WeatherClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn timelines_url(&self) -> String {
        format!("{}/v4/timelines", self.base_url)
    }

    /// Fetch today's forecast for `city`.
    ///
    /// The HTTP status is not inspected: error bodies from the API simply
    /// lack the timelines structure and come back as `Ok(None)`. A first
    /// interval without `values` is a decode error.
    pub async fn fetch(&self, city: &str) -> Result<Option<DailyWeather>, WeatherError> {
        let resp = self
            .http
            .get(self.timelines_url())
            .query(&[
                ("location", city),
                ("fields", FIELDS),
                ("timesteps", "1d"),
                ("units", "metric"),
                ("apikey", self.api_key.as_str()),
            ])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = resp.status();
        let body: Value = resp
            .json()
            .await
            .map_err(|e| WeatherError::Decode(format!("timelines response ({status}): {e}")))?;

        parse_timeline(&body)
    }

    /// Fetch and render the weather for `city`. Never fails.
    pub async fn lookup(&self, city: &str) -> WeatherReport {
        match self.fetch(city).await {
            Ok(Some(daily)) => WeatherReport::available(city, daily),
            Ok(None) => {
                warn!(city, "no forecast intervals in weather response");
                WeatherReport::unavailable(city, NOT_AVAILABLE)
            }
            Err(e) => {
                error!(error = %e, city, "weather API error");
                WeatherReport::unavailable(city, FETCH_FAILED)
            }
        }
    }
}
