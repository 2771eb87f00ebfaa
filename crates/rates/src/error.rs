use engine::EngineError;
use thiserror::Error;

/// Errors of the rate lookup and of conversions that depend on it.
#[derive(Debug, Error)]
pub enum RatesError {
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("rate provider answered with status {0}")]
    Status(u16),
    #[error("invalid rates url: {0}")]
    InvalidUrl(String),
    #[error("invalid rates payload: {0}")]
    Payload(String),
    #[error("no rate available: {0}")]
    MissingRate(String),
    #[error(transparent)]
    Engine(#[from] EngineError),
}
