//! Exchange Rate Primitives
//!
//! IO-free building blocks shared by the catalog's exchange rate providers:
//!
//! - [`SupportedCurrencies`] - the comma-delimited list a provider publishes,
//!   parsed into a set used to validate incoming currency codes.
//! - [`FxQuotes`] - a snapshot of USD-based rates keyed `"USD" + code`
//!   (for example `"USDEUR"`), the shape live quote services return.
//! - A built-in development rate table generated by [`define_currencies!`].
//!
//! # Example
//! ```
//! use exchange_rates::{FxQuotes, SupportedCurrencies, builtin_quotes};
//!
//! let supported: SupportedCurrencies = "USD,CAD,EUR,GBP".parse().unwrap();
//! assert!(supported.contains("EUR"));
//! assert!(!supported.contains("PLN"));
//!
//! let quotes: FxQuotes = builtin_quotes();
//! assert!(quotes.rate_for("EUR").is_some());
//! ```

use std::collections::{BTreeSet, HashMap};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency every stored price is denominated in.
pub const BASE_CURRENCY: &str = "USD";

/// Builds the snapshot key for a target currency: `"USD" + code`.
pub fn quote_key(code: &str) -> String {
    let mut key = String::with_capacity(BASE_CURRENCY.len() + code.len());
    key.push_str(BASE_CURRENCY);
    key.push_str(code);
    key
}

// ─────────────────────────────────────────────────────────────────────────────
// Supported Currencies
// ─────────────────────────────────────────────────────────────────────────────

/// Set of currency codes a provider accepts.
///
/// Parsed from a comma-delimited list such as `"USD,CAD,EUR,GBP"`. Entries
/// are trimmed and empty entries skipped. Lookups are exact and
/// case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportedCurrencies {
    codes: BTreeSet<String>,
}

impl SupportedCurrencies {
    pub fn parse(list: &str) -> Self {
        let codes = list
            .split(',')
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(String::from)
            .collect();
        Self { codes }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }
}

impl FromStr for SupportedCurrencies {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for SupportedCurrencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for code in &self.codes {
            if !first {
                f.write_str(",")?;
            }
            f.write_str(code)?;
            first = false;
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for SupportedCurrencies {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().map(Into::into).collect(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Quote Snapshot
// ─────────────────────────────────────────────────────────────────────────────

/// Point-in-time USD rates, keyed `"USD" + code`.
///
/// A rate is the number of target units one US dollar buys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FxQuotes {
    quotes: HashMap<String, Decimal>,
}

impl FxQuotes {
    /// Wraps an already-keyed map (for example a provider's `quotes` object).
    pub fn new(quotes: HashMap<String, Decimal>) -> Self {
        Self { quotes }
    }

    /// Builds a snapshot from `(code, rate)` pairs, deriving the keys.
    pub fn from_rates<'a>(rates: impl IntoIterator<Item = (&'a str, Decimal)>) -> Self {
        let quotes = rates
            .into_iter()
            .map(|(code, rate)| (quote_key(code), rate))
            .collect();
        Self { quotes }
    }

    /// Rate for the given key (`"USDEUR"`).
    pub fn get(&self, key: &str) -> Option<Decimal> {
        self.quotes.get(key).copied()
    }

    /// Rate converting one USD into `code`.
    pub fn rate_for(&self, code: &str) -> Option<Decimal> {
        self.get(&quote_key(code))
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Built-in Rate Table
// ─────────────────────────────────────────────────────────────────────────────

/// Defines the built-in development currencies.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     Name => ("CODE", rate_mantissa, rate_scale),
/// }
/// ```
/// The USD rate is `Decimal::new(rate_mantissa, rate_scale)`.
#[macro_export]
macro_rules! define_currencies {
    (
        $(
            $name:ident => ($code:literal, $mantissa:expr, $scale:expr)
        ),* $(,)?
    ) => {
        /// Currencies known to the built-in rate table.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum BuiltinCurrency {
            $($name),*
        }

        impl BuiltinCurrency {
            pub fn code(&self) -> &'static str {
                match self {
                    $(BuiltinCurrency::$name => $code),*
                }
            }

            pub fn usd_rate(&self) -> rust_decimal::Decimal {
                match self {
                    $(BuiltinCurrency::$name => rust_decimal::Decimal::new($mantissa, $scale)),*
                }
            }

            pub fn all() -> &'static [BuiltinCurrency] {
                &[$(BuiltinCurrency::$name),*]
            }
        }

        impl std::fmt::Display for BuiltinCurrency {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.code())
            }
        }
    };
}

define_currencies! {
    Usd => ("USD", 1, 0),
    Cad => ("CAD", 136, 2),
    Eur => ("EUR", 92, 2),
    Gbp => ("GBP", 79, 2),
}

/// Supported set covering every built-in currency.
pub fn builtin_supported() -> SupportedCurrencies {
    BuiltinCurrency::all().iter().map(|c| c.code()).collect()
}

/// Quote snapshot for every built-in currency, `USDUSD` included.
pub fn builtin_quotes() -> FxQuotes {
    FxQuotes::from_rates(BuiltinCurrency::all().iter().map(|c| (c.code(), c.usd_rate())))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_key() {
        assert_eq!(quote_key("EUR"), "USDEUR");
    }

    #[test]
    fn test_parse_supported_list() {
        let supported = SupportedCurrencies::parse("USD,CAD,EUR,GBP");
        assert_eq!(supported.len(), 4);
        assert!(supported.contains("CAD"));
        assert!(!supported.contains("PLN"));
    }

    #[test]
    fn test_parse_trims_and_skips_empty_entries() {
        let supported = SupportedCurrencies::parse(" USD , EUR,,");
        assert_eq!(supported.len(), 2);
        assert!(supported.contains("USD"));
        assert!(supported.contains("EUR"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let supported = SupportedCurrencies::parse("USD,EUR");
        assert!(!supported.contains("eur"));
    }

    #[test]
    fn test_empty_list() {
        assert!(SupportedCurrencies::parse("").is_empty());
    }

    #[test]
    fn test_supported_display() {
        let supported = SupportedCurrencies::parse("USD,EUR");
        assert_eq!(supported.to_string(), "EUR,USD");
    }

    #[test]
    fn test_rate_for_uses_usd_prefixed_key() {
        let quotes = FxQuotes::from_rates([("EUR", Decimal::new(165, 2))]);
        assert_eq!(quotes.get("USDEUR"), Some(Decimal::new(165, 2)));
        assert_eq!(quotes.rate_for("EUR"), Some(Decimal::new(165, 2)));
        assert_eq!(quotes.rate_for("CAD"), None);
    }

    #[test]
    fn test_quotes_deserialize_from_provider_shape() {
        let quotes: FxQuotes =
            serde_json::from_str(r#"{"quotes":{"USDCAD":1.25,"USDEUR":1.65}}"#).unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes.rate_for("CAD"), Some(Decimal::new(125, 2)));
    }

    #[test]
    fn test_builtin_table_is_consistent() {
        let supported = builtin_supported();
        let quotes = builtin_quotes();
        assert_eq!(supported.len(), BuiltinCurrency::all().len());
        assert_eq!(quotes.rate_for("USD"), Some(Decimal::ONE));
        for code in supported.iter() {
            assert!(quotes.rate_for(code).is_some(), "missing rate for {code}");
        }
    }

    #[test]
    fn test_builtin_currency_display() {
        assert_eq!(BuiltinCurrency::Gbp.to_string(), "GBP");
        assert_eq!(BuiltinCurrency::Eur.usd_rate(), Decimal::new(92, 2));
    }
}
