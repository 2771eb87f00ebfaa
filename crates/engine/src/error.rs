//! The module contains the errors the engine can return.
//!
//! Every calculator reports invalid input through [`EngineError`] instead of
//! falling back to a default value:
//!
//! - [`InvalidRange`] when a start date comes after its end date.
//! - [`InvalidPercent`] when a percentage is outside `[0, 100)`.
//! - [`InvalidAmount`] for negative or unrepresentable money.
//! - [`InvalidTerms`] for non-positive loan inputs.
//! - [`Evaluation`] for malformed or undefined arithmetic.
//!
//!  [`InvalidRange`]: EngineError::InvalidRange
//!  [`InvalidPercent`]: EngineError::InvalidPercent
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidTerms`]: EngineError::InvalidTerms
//!  [`Evaluation`]: EngineError::Evaluation
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid range: {0}")]
    InvalidRange(String),
    #[error("Invalid percent: {0}")]
    InvalidPercent(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid loan terms: {0}")]
    InvalidTerms(String),
    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),
    #[error("Evaluation error: {0}")]
    Evaluation(String),
}
