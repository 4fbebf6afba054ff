//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use catalog_types::domain::{Product, ProductId};
use catalog_types::dto::{CreateProductForm, DeleteProductQuery};
use utoipa::OpenApi;

// Documentation-only stand-ins for the real handlers

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Get a product priced in USD
#[utoipa::path(
    get,
    path = "/api/product/{id}",
    tag = "products",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product with USD price; the view counter has been incremented", body = Product),
        (status = 400, description = "Malformed product ID, or USD not supported"),
        (status = 404, description = "Product does not exist")
    )
)]
async fn get_product() {}

/// Get a product priced in another currency
#[utoipa::path(
    get,
    path = "/api/product/{id}/{currencyAbbreviation}",
    tag = "products",
    params(
        ("id" = i64, Path, description = "Product ID"),
        ("currencyAbbreviation" = String, Path, description = "Target currency code, e.g. EUR")
    ),
    responses(
        (status = 200, description = "Product with price converted at the current rate", body = Product),
        (status = 400, description = "Invalid currency abbreviation"),
        (status = 404, description = "Product does not exist"),
        (status = 500, description = "Exchange rate provider failure")
    )
)]
async fn get_product_in_currency() {}

/// Create a product
#[utoipa::path(
    post,
    path = "/api/product",
    tag = "products",
    request_body(content = CreateProductForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Generated product ID", body = ProductId)
    )
)]
async fn create_product() {}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/api/product",
    tag = "products",
    params(DeleteProductQuery),
    responses(
        (status = 200, description = "Product deleted, or it did not exist")
    )
)]
async fn delete_product() {}

/// OpenAPI documentation for the Catalog API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product Catalog Service API",
        version = "1.0.0",
        description = "Create, read and delete catalog products. Prices are stored in USD and converted on read using live exchange rates.",
        license(name = "MIT"),
    ),
    paths(
        health,
        get_product,
        get_product_in_currency,
        create_product,
        delete_product,
    ),
    components(
        schemas(
            Product,
            ProductId,
            CreateProductForm,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "products", description = "Product catalog operations"),
    )
)]
pub struct ApiDoc;
