//! `cover quote`: the full submit action.

use anyhow::Result;
use cover_quote::client::SubmitClient;
use cover_quote::flow::{QuoteFlow, QuoteOutcome, SubmissionOutcome};
use cover_quote::form::QuoteForm;
use cover_weather::{WeatherClient, WeatherReport};

/// Run the flow. `weather` is the Tomorrow.io base URL and key, if a key is set.
///
/// A failed submission is reported but does not fail the command: the quote
/// stands on its own.
pub async fn run(
    form: &QuoteForm,
    server: &str,
    weather: Option<(String, String)>,
    output_json: bool,
) -> Result<()> {
    let request = form.parse()?;

    let weather = weather.map(|(url, key)| WeatherClient::new(url, key));
    let flow = QuoteFlow::new(SubmitClient::new(server), weather);
    let outcome = flow.run(request).await;

    if output_json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", render(&outcome));
    }
    Ok(())
}

pub fn render(outcome: &QuoteOutcome) -> String {
    let mut out = String::new();
    out.push_str(&format!("Name:      {}\n", outcome.request.name));
    out.push_str(&format!("Cover:     {}\n", outcome.quote.cover));
    out.push_str(&format!("Premium:   {} / month\n", outcome.quote.premium));

    match &outcome.submission {
        SubmissionOutcome::Saved { message } => {
            out.push_str(&format!("Submitted: saved ({message})\n"));
        }
        SubmissionOutcome::Failed { error } => {
            out.push_str(&format!("Submitted: NOT saved ({error})\n"));
        }
    }

    out.push('\n');
    out.push_str(&render_weather(&outcome.weather));
    out
}

fn render_weather(report: &WeatherReport) -> String {
    match report {
        WeatherReport::Available {
            city,
            temperature_avg,
            description,
            ..
        } => {
            let temperature = match temperature_avg {
                Some(t) => format!("{t}°C"),
                None => "-".to_string(),
            };
            format!("Weather in {city}\n  {temperature}  {description}\n")
        }
        WeatherReport::Unavailable { city, error } => {
            format!("Weather in {city}\n  {error}\n")
        }
    }
}
