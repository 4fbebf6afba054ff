//! Database row types for the SQL adapters.

use sqlx::FromRow;

use catalog_types::{Product, ProductId};
#[cfg(feature = "sqlite")]
use catalog_types::RepoError;

/// Product row from SQLite. Price is stored as decimal text.
#[cfg(feature = "sqlite")]
#[derive(FromRow)]
pub struct SqliteProductRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: String,
    pub views: i64,
    pub deleted: bool,
    pub version: i64,
}

#[cfg(feature = "sqlite")]
impl SqliteProductRow {
    pub fn into_domain(self) -> Result<Product, RepoError> {
        let price = self
            .price
            .parse()
            .map_err(|e| RepoError::Database(format!("Invalid price {:?}: {}", self.price, e)))?;

        Ok(Product {
            id: ProductId::new(self.id),
            name: self.name,
            description: self.description,
            price,
            views: self.views,
            deleted: self.deleted,
            version: self.version,
        })
    }
}

/// Product row from PostgreSQL.
#[cfg(feature = "postgres")]
#[derive(FromRow)]
pub struct PgProductRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: rust_decimal::Decimal,
    pub views: i64,
    pub deleted: bool,
    pub version: i64,
}

#[cfg(feature = "postgres")]
impl From<PgProductRow> for Product {
    fn from(row: PgProductRow) -> Self {
        Product {
            id: ProductId::new(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            views: row.views,
            deleted: row.deleted,
            version: row.version,
        }
    }
}

/// Version column returned by `UPDATE ... RETURNING version`.
#[derive(FromRow)]
pub struct DbVersion {
    pub version: i64,
}
