//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite, InMemory) will implement this trait.

use crate::domain::{NewProduct, Product, ProductId};
use crate::error::RepoError;

/// Key-value persistence for products, keyed by store-generated id.
#[async_trait::async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    /// Inserts a new product and returns it with its generated id.
    async fn insert(&self, product: NewProduct) -> Result<Product, RepoError>;

    /// Gets a product by ID.
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepoError>;

    /// Overwrites a stored product and bumps its version.
    ///
    /// Last write wins: the stored version is not compared. Returns
    /// `RepoError::NotFound` if the row no longer exists.
    async fn update(&self, product: &Product) -> Result<Product, RepoError>;

    /// Deletes a product. Deleting an absent id is not an error.
    async fn delete_by_id(&self, id: ProductId) -> Result<(), RepoError>;
}
