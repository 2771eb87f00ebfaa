use std::time::Duration;

use chrono::Utc;
use engine::Currency;
use reqwest::Url;

use crate::{RateSource, RateTable, RatesError, Result, table::RatesPayload};

/// Rate provider reached over HTTP: `GET {base_url}/{CODE}`.
#[derive(Debug, Clone)]
pub struct HttpRateSource {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpRateSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut url = Url::parse(base_url)
            .map_err(|err| RatesError::InvalidUrl(format!("{base_url}: {err}")))?;
        if url.cannot_be_a_base() {
            return Err(RatesError::InvalidUrl(format!("{base_url}: not a base url")));
        }
        // `join` replaces the last path segment unless the path ends with '/'.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: url,
            http,
        })
    }

    /// Endpoint queried for `base`.
    pub fn endpoint(&self, base: Currency) -> Result<Url> {
        self.base_url
            .join(base.code())
            .map_err(|err| RatesError::InvalidUrl(format!("{}: {err}", self.base_url)))
    }
}

impl RateSource for HttpRateSource {
    async fn fetch_rates(&self, base: Currency) -> Result<RateTable> {
        let endpoint = self.endpoint(base)?;
        tracing::debug!(%endpoint, "fetching exchange rates");

        let res = self.http.get(endpoint).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(RatesError::Status(status.as_u16()));
        }

        let payload = res.json::<RatesPayload>().await?;
        Ok(RateTable::from_payload(payload, Utc::now()))
    }
}
