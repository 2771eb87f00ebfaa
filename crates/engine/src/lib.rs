//! Deterministic calculation core of the Hasiba calculators.
//!
//! Every operation is a pure function from typed inputs to a typed result or
//! an [`EngineError`]; nothing here performs I/O or keeps shared state.
//!
//! - [`calendar`]: years/months/days between two civil dates (age, tenure).
//! - [`percent`]: original price, discounted price and discount percentage.
//! - [`loan`]: fixed-rate annuity payment and totals.
//! - [`expression`]: keypad calculator and its restricted arithmetic evaluator.
//! - [`currency`]: supported currencies and amount conversion.
pub use calendar::{CivilDate, DateInterval};
pub use currency::Currency;
pub use error::EngineError;
pub use expression::{Calculator, Key, Mode, Operator, Readout};
pub use loan::{LoanResult, LoanTerms};
pub use money::{MONEY_DECIMALS, Money};
pub use percent::{Anchor, PercentRelation, PercentSolution};

pub mod calendar;
pub mod currency;
mod error;
pub mod expression;
pub mod loan;
mod money;
pub mod percent;

pub type ResultEngine<T> = Result<T, EngineError>;
