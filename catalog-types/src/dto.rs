//! Data Transfer Objects (DTOs) for requests and responses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{NewProduct, ProductId};

// ─────────────────────────────────────────────────────────────────────────────
// Product DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Form submitted to create a product.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateProductForm {
    /// Display name
    #[serde(rename = "productName")]
    #[schema(example = "Desk lamp")]
    pub product_name: String,
    #[schema(example = "Adjustable LED desk lamp")]
    pub description: String,
    /// Price in USD
    #[schema(value_type = f64, example = 24.99)]
    pub price: Decimal,
}

impl From<CreateProductForm> for NewProduct {
    fn from(form: CreateProductForm) -> Self {
        NewProduct::new(form.product_name, form.description, form.price)
    }
}

/// Query string of the delete endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteProductQuery {
    /// Product ID
    #[param(value_type = i64)]
    pub id: ProductId,
}
