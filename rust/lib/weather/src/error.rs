use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("decode: {0}")]
    Decode(String),
}
