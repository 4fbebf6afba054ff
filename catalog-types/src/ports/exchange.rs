//! Exchange rate provider port.
//!
//! This trait defines the interface for exchange rate services.
//! Implementations can be HTTP clients, static tables, mocks, etc.

use exchange_rates::{FxQuotes, SupportedCurrencies};

/// Error type for exchange rate operations.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Rate not available for {0}")]
    RateNotAvailable(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Port trait for exchange rate providers.
///
/// Both calls hit the provider every time; callers must not assume results
/// are cached.
#[async_trait::async_trait]
pub trait ExchangeRateProvider: Send + Sync + 'static {
    /// Currency codes this provider can quote.
    async fn supported_currencies(&self) -> Result<SupportedCurrencies, ExchangeError>;

    /// Current USD-based quotes, keyed `"USD" + code`.
    async fn quotes(&self) -> Result<FxQuotes, ExchangeError>;
}
