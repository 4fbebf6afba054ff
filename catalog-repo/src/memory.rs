//! In-memory repository adapter.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use catalog_types::{NewProduct, Product, ProductId, ProductRepository, RepoError};

/// Process-local product store. Ids start at 1 and are never reused.
pub struct MemoryRepo {
    products: DashMap<ProductId, Product>,
    next_id: AtomicI64,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self {
            products: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for MemoryRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for MemoryRepo {
    async fn insert(&self, product: NewProduct) -> Result<Product, RepoError> {
        let id = ProductId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let product = product.into_product(id);
        self.products.insert(id, product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepoError> {
        Ok(self.products.get(&id).map(|entry| entry.value().clone()))
    }

    async fn update(&self, product: &Product) -> Result<Product, RepoError> {
        let mut entry = self.products.get_mut(&product.id).ok_or(RepoError::NotFound)?;
        let version = entry.version + 1;
        *entry = Product {
            version,
            ..product.clone()
        };
        Ok(entry.clone())
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<(), RepoError> {
        self.products.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn lamp() -> NewProduct {
        NewProduct::new("Lamp", "LED desk lamp", Decimal::new(2499, 2))
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = MemoryRepo::new();

        let first = repo.insert(lamp()).await.unwrap();
        let second = repo.insert(lamp()).await.unwrap();

        assert_eq!(first.id, ProductId::new(1));
        assert_eq!(second.id, ProductId::new(2));
        assert_eq!(first.views, 0);
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_update_bumps_version() {
        let repo = MemoryRepo::new();
        let mut product = repo.insert(lamp()).await.unwrap();

        product.record_view();
        let updated = repo.update(&product).await.unwrap();

        assert_eq!(updated.views, 1);
        assert_eq!(updated.version, 1);
        assert_eq!(repo.find_by_id(product.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let repo = MemoryRepo::new();
        let product = lamp().into_product(ProductId::new(99));

        let result = repo.update(&product).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_absent_id_is_ok() {
        let repo = MemoryRepo::new();
        let product = repo.insert(lamp()).await.unwrap();

        repo.delete_by_id(product.id).await.unwrap();
        repo.delete_by_id(product.id).await.unwrap();

        assert!(repo.is_empty());
        assert!(repo.find_by_id(product.id).await.unwrap().is_none());
    }
}
