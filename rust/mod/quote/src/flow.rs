//! The client-side submit action: compute, look up weather, persist.
//!
//! ```text
//! QuoteRequest ─► compute ─┬─► POST /api/submit ──► SubmissionOutcome
//!                          ├─► weather lookup  ───► WeatherReport
//!                          └─► result delay
//! ```
//!
//! The three branches run together. None of them can fail the others: the
//! quote is always returned, with the weather and submission outcomes
//! reported separately.

use std::time::Duration;

use cover_weather::{WeatherClient, WeatherReport};
use serde::Serialize;
use tracing::error;

use crate::calculator::{compute, Quote};
use crate::client::SubmitClient;
use crate::model::{QuoteRequest, SubmissionPayload};

/// Pause before the result is shown.
pub const RESULT_DELAY: Duration = Duration::from_secs(1);

pub const WEATHER_KEY_MISSING: &str = "Weather API key not configured.";

/// Whether the submission reached storage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    Saved { message: String },
    Failed { error: String },
}

impl SubmissionOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SubmissionOutcome::Saved { .. })
    }
}

/// Everything one submit action produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteOutcome {
    pub request: QuoteRequest,
    pub quote: Quote,
    pub weather: WeatherReport,
    pub submission: SubmissionOutcome,
}

pub struct QuoteFlow {
    submit: SubmitClient,
    weather: Option<WeatherClient>,
    result_delay: Duration,
}

impl QuoteFlow {
    /// `weather` is None when no API key is configured.
    pub fn new(submit: SubmitClient, weather: Option<WeatherClient>) -> Self {
        Self {
            submit,
            weather,
            result_delay: RESULT_DELAY,
        }
    }

    pub fn with_result_delay(mut self, delay: Duration) -> Self {
        self.result_delay = delay;
        self
    }

    pub async fn run(&self, request: QuoteRequest) -> QuoteOutcome {
        let quote = compute(request.income, request.dependents);
        let payload = SubmissionPayload::new(&request, &quote);

        let weather = async {
            match &self.weather {
                Some(client) => client.lookup(&request.city).await,
                None => WeatherReport::unavailable(&request.city, WEATHER_KEY_MISSING),
            }
        };

        let submission = async {
            match self.submit.submit(&payload).await {
                Ok(ack) => SubmissionOutcome::Saved { message: ack.message },
                Err(e) => {
                    error!(error = %e, "failed to store form data");
                    SubmissionOutcome::Failed { error: e.to_string() }
                }
            }
        };

        let (weather, submission, ()) =
            tokio::join!(weather, submission, tokio::time::sleep(self.result_delay));

        QuoteOutcome {
            request,
            quote,
            weather,
            submission,
        }
    }
}
