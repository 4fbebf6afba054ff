//! Configuration loading from environment.

use std::env;

use catalog_repo::{HttpRateProvider, RateProvider, StaticRateProvider};
use catalog_types::SupportedCurrencies;

const DEFAULT_FX_API_URL: &str = "http://api.currencylayer.com/live";
const DEFAULT_SUPPORTED_CURRENCIES: &str = "USD,CAD,EUR,GBP";

/// Which exchange rate adapter to run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FxProviderKind {
    Static,
    Http,
}

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub fx_provider: FxProviderKind,
    pub fx_api_url: String,
    pub fx_access_key: String,
    pub supported_currencies: SupportedCurrencies,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()?;

        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let fx_provider = match lookup("FX_PROVIDER").as_deref() {
            None | Some("static") => FxProviderKind::Static,
            Some("http") => FxProviderKind::Http,
            Some(other) => anyhow::bail!("FX_PROVIDER must be `static` or `http`, got `{}`", other),
        };

        let fx_api_url = lookup("FX_API_URL").unwrap_or_else(|| DEFAULT_FX_API_URL.to_string());
        let fx_access_key = lookup("FX_ACCESS_KEY").unwrap_or_default();

        let supported_currencies = SupportedCurrencies::parse(
            &lookup("FX_SUPPORTED_CURRENCIES")
                .unwrap_or_else(|| DEFAULT_SUPPORTED_CURRENCIES.to_string()),
        );
        if supported_currencies.is_empty() {
            anyhow::bail!("FX_SUPPORTED_CURRENCIES must list at least one currency");
        }

        Ok(Self {
            port,
            database_url,
            fx_provider,
            fx_api_url,
            fx_access_key,
            supported_currencies,
        })
    }

    /// Builds the configured exchange rate adapter.
    pub fn rate_provider(&self) -> RateProvider {
        match self.fx_provider {
            FxProviderKind::Static => RateProvider::Static(
                StaticRateProvider::builtin_with_supported(self.supported_currencies.clone()),
            ),
            FxProviderKind::Http => RateProvider::Http(HttpRateProvider::new(
                self.fx_api_url.clone(),
                self.fx_access_key.clone(),
                self.supported_currencies.clone(),
            )),
        }
    }
}
