use std::collections::HashMap;

use chrono::{DateTime, Utc};
use engine::Currency;
use serde::Deserialize;

use crate::{RatesError, Result};

/// Body returned by the rate provider. Extra fields are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct RatesPayload {
    pub base: String,
    pub rates: HashMap<String, f64>,
}

/// Rates relative to `base`, as fetched at `fetched_at`.
#[derive(Clone, Debug, PartialEq)]
pub struct RateTable {
    base: String,
    rates: HashMap<String, f64>,
    fetched_at: DateTime<Utc>,
}

impl RateTable {
    /// Builds a table, dropping rates that are not finite and positive.
    pub fn new(
        base: impl Into<String>,
        rates: HashMap<String, f64>,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        let base = base.into().trim().to_ascii_uppercase();
        let rates = rates
            .into_iter()
            .filter_map(|(code, rate)| {
                if rate.is_finite() && rate > 0.0 {
                    Some((code.to_ascii_uppercase(), rate))
                } else {
                    tracing::warn!(%code, rate, "ignoring invalid exchange rate");
                    None
                }
            })
            .collect();
        Self {
            base,
            rates,
            fetched_at,
        }
    }

    /// Parses a provider response body.
    pub fn from_json(body: &str, fetched_at: DateTime<Utc>) -> Result<Self> {
        let payload: RatesPayload =
            serde_json::from_str(body).map_err(|err| RatesError::Payload(err.to_string()))?;
        Ok(Self::from_payload(payload, fetched_at))
    }

    pub(crate) fn from_payload(payload: RatesPayload, fetched_at: DateTime<Utc>) -> Self {
        Self::new(payload.base, payload.rates, fetched_at)
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    #[must_use]
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Units of `code` per unit of the base currency.
    #[must_use]
    pub fn rate(&self, code: &str) -> Option<f64> {
        let code = code.to_ascii_uppercase();
        if code == self.base {
            return Some(self.rates.get(&code).copied().unwrap_or(1.0));
        }
        self.rates.get(&code).copied()
    }

    /// Units of `to` per unit of `from`.
    ///
    /// Uses the direct rate when `from` is the base, otherwise the cross rate
    /// through the base currency.
    #[must_use]
    pub fn cross_rate(&self, from: Currency, to: Currency) -> Option<f64> {
        if from == to {
            return Some(1.0);
        }
        let to_rate = self.rate(to.code())?;
        if from.code() == self.base {
            return Some(to_rate);
        }
        let from_rate = self.rate(from.code())?;
        Some(to_rate / from_rate)
    }
}
