//! Product records and identifiers.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Store-generated product identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A catalog entry as persisted by the store.
///
/// `price` is always denominated in USD. Currency conversion produces a
/// copy via [`Product::with_price`] and is never written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: ProductId,
    #[schema(example = "Desk lamp")]
    pub name: String,
    #[schema(example = "Adjustable LED desk lamp")]
    pub description: String,
    #[schema(value_type = f64, example = 24.99)]
    pub price: Decimal,
    /// Number of successful reads.
    #[schema(example = 3)]
    pub views: i64,
    pub deleted: bool,
    /// Bumped by the store on every update.
    pub version: i64,
}

impl Product {
    /// Increments the view counter.
    pub fn record_view(&mut self) {
        self.views = self.views.saturating_add(1);
    }

    /// Returns the product with its price replaced.
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }
}

/// Input to the store's insert: a product that has no id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
        }
    }

    /// Materializes the record a store saves for this input: no views,
    /// not deleted, version zero.
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            views: 0,
            deleted: false,
            version: 0,
        }
    }
}
