use engine::EngineError;
use rates::RatesError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("{0}")]
    Engine(#[from] EngineError),
    #[error("{0}")]
    Rates(#[from] RatesError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid input: {0}")]
    Input(String),
}

impl AppError {
    /// Exit status: 2 for input the user has to fix, 1 for everything else.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Engine(_)
            | AppError::Input(_)
            | AppError::Rates(RatesError::Engine(_)) => 2,
            _ => 1,
        }
    }
}
