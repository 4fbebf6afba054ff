//! # Catalog Types
//!
//! Domain types and port traits for the product catalog service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Product, ProductId, NewProduct)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Repository and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{NewProduct, Product, ProductId};
pub use dto::*;
pub use error::{AppError, RepoError};
pub use exchange_rates::{BASE_CURRENCY, FxQuotes, SupportedCurrencies, quote_key};
pub use ports::{ExchangeError, ExchangeRateProvider, ProductRepository};
