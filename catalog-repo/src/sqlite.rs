//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use catalog_types::{NewProduct, Product, ProductId, ProductRepository, RepoError};

use crate::types::{DbVersion, SqliteProductRow};

const SCHEMA: &str = include_str!("../migrations/sqlite/0001_create_products.sql");

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        let repo = Self { pool };
        repo.create_schema().await?;

        Ok(repo)
    }

    /// Creates the `products` table if it does not exist.
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl ProductRepository for SqliteRepo {
    async fn insert(&self, product: NewProduct) -> Result<Product, RepoError> {
        let result = sqlx::query(
            r#"INSERT INTO products (name, description, price, views, deleted, version)
               VALUES (?, ?, ?, 0, 0, 0)"#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        let id = ProductId::new(result.last_insert_rowid());
        tracing::debug!(product_id = %id, "inserted product");

        Ok(product.into_product(id))
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepoError> {
        let row: Option<SqliteProductRow> = sqlx::query_as(
            r#"SELECT id, name, description, price, views, deleted, version
               FROM products WHERE id = ?"#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(SqliteProductRow::into_domain).transpose()
    }

    async fn update(&self, product: &Product) -> Result<Product, RepoError> {
        let row: Option<DbVersion> = sqlx::query_as(
            r#"UPDATE products
               SET name = ?, description = ?, price = ?, views = ?, deleted = ?, version = version + 1
               WHERE id = ?
               RETURNING version"#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.to_string())
        .bind(product.views)
        .bind(product.deleted)
        .bind(product.id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        let DbVersion { version } = row.ok_or(RepoError::NotFound)?;

        Ok(Product {
            version,
            ..product.clone()
        })
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<(), RepoError> {
        sqlx::query(r#"DELETE FROM products WHERE id = ?"#)
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }
}
