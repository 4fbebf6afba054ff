//! Domain models for the catalog service.

pub mod product;

pub use product::{NewProduct, Product, ProductId};
