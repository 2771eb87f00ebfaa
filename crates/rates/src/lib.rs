//! Exchange-rate lookup for the currency converter.
//!
//! The provider is an external service answering `GET {base_url}/{CODE}` with
//! a JSON map of rates relative to `CODE`. [`RateBook`] keeps the last good
//! table: a failed refresh raises an error flag but never discards rates that
//! were already fetched.
pub use book::{RateBook, RateSource};
pub use client::HttpRateSource;
pub use error::RatesError;
pub use table::RateTable;

mod book;
mod client;
mod error;
mod table;

pub type Result<T> = std::result::Result<T, RatesError>;
