use std::future::Future;

use engine::{Currency, Money, currency};

use crate::{RateTable, RatesError, Result};

/// Something that can answer "what are today's rates for `base`?".
pub trait RateSource {
    fn fetch_rates(&self, base: Currency) -> impl Future<Output = Result<RateTable>> + Send;
}

/// Last fetched rates plus the outcome of the most recent refresh.
///
/// A failed refresh sets the error flag and keeps the previous table, so the
/// converter keeps working with stale rates. There is no retry: each call to
/// [`refresh`](RateBook::refresh) is a single request.
#[derive(Debug)]
pub struct RateBook<S> {
    source: S,
    table: Option<RateTable>,
    failed: bool,
}

impl<S: RateSource> RateBook<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            table: None,
            failed: false,
        }
    }

    /// Fetches rates for `base`, replacing the table on success.
    pub async fn refresh(&mut self, base: Currency) -> Result<&RateTable> {
        match self.source.fetch_rates(base).await {
            Ok(table) => {
                tracing::info!(base = %base, rates = table.len(), "exchange rates updated");
                self.failed = false;
                Ok(&*self.table.insert(table))
            }
            Err(err) => {
                tracing::warn!(
                    base = %base,
                    stale = self.table.is_some(),
                    "failed to fetch exchange rates: {err}"
                );
                self.failed = true;
                Err(err)
            }
        }
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The last successfully fetched table, possibly stale.
    #[must_use]
    pub fn table(&self) -> Option<&RateTable> {
        self.table.as_ref()
    }

    /// `true` when the most recent refresh failed.
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.failed
    }

    /// `true` when conversions rely on rates kept from before a failed refresh.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.failed && self.table.is_some()
    }

    /// Converts `amount` from one currency to another, rounding to 3 decimals.
    ///
    /// A missing rate is an error, never a zero amount.
    pub fn convert(&self, amount: Money, from: Currency, to: Currency) -> Result<Money> {
        if from == to {
            return Ok(currency::convert(amount, 1.0)?);
        }
        let table = self
            .table
            .as_ref()
            .ok_or_else(|| RatesError::MissingRate("no exchange rates loaded".to_string()))?;
        let rate = table
            .cross_rate(from, to)
            .ok_or_else(|| RatesError::MissingRate(format!("{from} -> {to}")))?;
        Ok(currency::convert(amount, rate)?)
    }
}
