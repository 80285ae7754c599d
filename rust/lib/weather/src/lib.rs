//! Daily weather lookup against the Tomorrow.io timelines API.
//!
//! The lookup is decorative: it never fails towards its caller. Every
//! outcome, including network errors, becomes a [`WeatherReport`].
//!
//! ```ignore
//! let client = WeatherClient::new(DEFAULT_BASE_URL, api_key);
//! match client.lookup("Pune").await {
//!     WeatherReport::Available { description, .. } => println!("{description}"),
//!     WeatherReport::Unavailable { error, .. } => println!("{error}"),
//! }
//! ```

pub mod client;
pub mod error;
pub mod report;

pub use client::{WeatherClient, DEFAULT_BASE_URL};
pub use error::WeatherError;
pub use report::{describe, parse_timeline, DailyWeather, WeatherReport};
