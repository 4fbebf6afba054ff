//! Exchange rate provider adapters.
//!
//! - [`StaticRateProvider`] serves a fixed table (the built-in development
//!   rates by default).
//! - [`HttpRateProvider`] queries a currencylayer-style `live` endpoint on
//!   every call. Nothing is cached, retried or timed out beyond the HTTP
//!   client defaults.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use catalog_types::{ExchangeError, ExchangeRateProvider, FxQuotes, SupportedCurrencies};

// ─────────────────────────────────────────────────────────────────────────────
// Static Provider
// ─────────────────────────────────────────────────────────────────────────────

/// Provider backed by a fixed table.
#[derive(Debug, Clone)]
pub struct StaticRateProvider {
    supported: SupportedCurrencies,
    quotes: FxQuotes,
}

impl StaticRateProvider {
    pub fn new(supported: SupportedCurrencies, quotes: FxQuotes) -> Self {
        Self { supported, quotes }
    }

    /// Built-in table restricted to the given supported list.
    pub fn builtin_with_supported(supported: SupportedCurrencies) -> Self {
        Self::new(supported, exchange_rates::builtin_quotes())
    }
}

impl Default for StaticRateProvider {
    fn default() -> Self {
        Self::new(
            exchange_rates::builtin_supported(),
            exchange_rates::builtin_quotes(),
        )
    }
}

#[async_trait]
impl ExchangeRateProvider for StaticRateProvider {
    async fn supported_currencies(&self) -> Result<SupportedCurrencies, ExchangeError> {
        Ok(self.supported.clone())
    }

    async fn quotes(&self) -> Result<FxQuotes, ExchangeError> {
        Ok(self.quotes.clone())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Live HTTP Provider
// ─────────────────────────────────────────────────────────────────────────────

/// Body of a `live` quotes response.
#[derive(Debug, Deserialize)]
struct LiveResponse {
    success: bool,
    #[serde(default)]
    quotes: HashMap<String, Decimal>,
    #[serde(default)]
    error: Option<LiveError>,
}

#[derive(Debug, Deserialize)]
struct LiveError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    info: String,
}

fn into_quotes(body: LiveResponse) -> Result<FxQuotes, ExchangeError> {
    if !body.success {
        let reason = body
            .error
            .map(|e| format!("provider error {}: {}", e.code, e.info))
            .unwrap_or_else(|| "provider reported failure".to_string());
        return Err(ExchangeError::ServiceUnavailable(reason));
    }
    Ok(FxQuotes::new(body.quotes))
}

/// Provider that fetches live quotes over HTTP.
///
/// The supported list is configuration, not fetched.
pub struct HttpRateProvider {
    http: reqwest::Client,
    api_url: String,
    access_key: String,
    supported: SupportedCurrencies,
}

impl HttpRateProvider {
    pub fn new(
        api_url: impl Into<String>,
        access_key: impl Into<String>,
        supported: SupportedCurrencies,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
            access_key: access_key.into(),
            supported,
        }
    }
}

#[async_trait]
impl ExchangeRateProvider for HttpRateProvider {
    async fn supported_currencies(&self) -> Result<SupportedCurrencies, ExchangeError> {
        Ok(self.supported.clone())
    }

    #[tracing::instrument(skip(self), fields(url = %self.api_url))]
    async fn quotes(&self) -> Result<FxQuotes, ExchangeError> {
        let currencies = self.supported.to_string();
        let resp = self
            .http
            .get(&self.api_url)
            .query(&[
                ("access_key", self.access_key.as_str()),
                ("currencies", currencies.as_str()),
                ("source", exchange_rates::BASE_CURRENCY),
                ("format", "1"),
            ])
            .send()
            .await
            .map_err(|e| ExchangeError::ServiceUnavailable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ExchangeError::ServiceUnavailable(format!(
                "quotes endpoint returned {}",
                status
            )));
        }

        let body: LiveResponse = resp
            .json()
            .await
            .map_err(|e| ExchangeError::InvalidResponse(e.to_string()))?;

        let quotes = into_quotes(body)?;
        tracing::debug!(count = quotes.len(), "fetched live quotes");
        Ok(quotes)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Runtime selection
// ─────────────────────────────────────────────────────────────────────────────

/// Provider chosen at startup from configuration.
pub enum RateProvider {
    Static(StaticRateProvider),
    Http(HttpRateProvider),
}

#[async_trait]
impl ExchangeRateProvider for RateProvider {
    async fn supported_currencies(&self) -> Result<SupportedCurrencies, ExchangeError> {
        match self {
            RateProvider::Static(inner) => inner.supported_currencies().await,
            RateProvider::Http(inner) => inner.supported_currencies().await,
        }
    }

    async fn quotes(&self) -> Result<FxQuotes, ExchangeError> {
        match self {
            RateProvider::Static(inner) => inner.quotes().await,
            RateProvider::Http(inner) => inner.quotes().await,
        }
    }
}
