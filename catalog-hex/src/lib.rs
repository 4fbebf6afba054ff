//! # Catalog Hex
//!
//! Application service layer and HTTP adapter for the catalog service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (currency validation, view counting,
//!   price conversion)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi/` - OpenAPI document served by the HTTP adapter
//!
//! The service is generic over `R: ProductRepository` and
//! `F: ExchangeRateProvider`, allowing different adapters to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::ProductService;
