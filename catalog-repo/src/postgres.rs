//! PostgreSQL repository adapter.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use catalog_types::{NewProduct, Product, ProductId, ProductRepository, RepoError};

use crate::types::{DbVersion, PgProductRow};

/// PostgreSQL repository implementation.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> anyhow::Result<()> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        execute_migration(
            &pool,
            include_str!("../migrations/postgres/0001_create_products.sql"),
            "0001",
        )
        .await?;

        Ok(Self { pool })
    }

}

#[async_trait]
impl ProductRepository for PostgresRepo {
    async fn insert(&self, product: NewProduct) -> Result<Product, RepoError> {
        let row: PgProductRow = sqlx::query_as(
            r#"INSERT INTO products (name, description, price, views, deleted, version)
               VALUES ($1, $2, $3, 0, FALSE, 0)
               RETURNING id, name, description, price, views, deleted, version"#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        tracing::debug!(product_id = row.id, "inserted product");

        Ok(row.into())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepoError> {
        let row: Option<PgProductRow> = sqlx::query_as(
            r#"SELECT id, name, description, price, views, deleted, version
               FROM products WHERE id = $1"#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(row.map(Product::from))
    }

    async fn update(&self, product: &Product) -> Result<Product, RepoError> {
        let row: Option<DbVersion> = sqlx::query_as(
            r#"UPDATE products
               SET name = $1, description = $2, price = $3, views = $4, deleted = $5,
                   version = version + 1
               WHERE id = $6
               RETURNING version"#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
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
        sqlx::query(r#"DELETE FROM products WHERE id = $1"#)
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }
}
