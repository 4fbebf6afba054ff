//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Form, Json,
    extract::{
        Path, Query, State,
        rejection::{FormRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};

use catalog_types::{
    AppError, BASE_CURRENCY, CreateProductForm, DeleteProductQuery, ExchangeRateProvider,
    ProductId, ProductRepository,
};

use crate::ProductService;

/// Application state shared across handlers.
pub struct AppState<R: ProductRepository, F: ExchangeRateProvider> {
    pub service: ProductService<R, F>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = match self.0 {
            AppError::BadRequest(msg) | AppError::Internal(msg) => msg,
            other => other.to_string(),
        };

        if status.is_server_error() {
            tracing::error!("request failed: {}", message);
        }

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

fn parse_product_id(raw: &str) -> Result<ProductId, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid product ID: {}", raw)))
}

fn bad_request(rejection: impl std::fmt::Display) -> AppError {
    AppError::BadRequest(rejection.to_string())
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Get a product priced in USD.
#[tracing::instrument(skip(state))]
pub async fn get_product<R: ProductRepository, F: ExchangeRateProvider>(
    State(state): State<Arc<AppState<R, F>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let product_id = parse_product_id(&id)?;
    let product = state.service.get(product_id, BASE_CURRENCY).await?;
    Ok(Json(product))
}

/// Get a product priced in the requested currency.
#[tracing::instrument(skip(state))]
pub async fn get_product_in_currency<R: ProductRepository, F: ExchangeRateProvider>(
    State(state): State<Arc<AppState<R, F>>>,
    Path((id, currency)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let product_id = parse_product_id(&id)?;
    let product = state.service.get(product_id, &currency).await?;
    Ok(Json(product))
}

/// Create a product from form fields; responds with the generated id.
#[tracing::instrument(skip(state, form))]
pub async fn create_product<R: ProductRepository, F: ExchangeRateProvider>(
    State(state): State<Arc<AppState<R, F>>>,
    form: Result<Form<CreateProductForm>, FormRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Form(form) = form.map_err(bad_request)?;
    let id = state.service.create(form).await?;
    Ok(Json(id))
}

/// Delete a product by id.
#[tracing::instrument(skip(state, query))]
pub async fn delete_product<R: ProductRepository, F: ExchangeRateProvider>(
    State(state): State<Arc<AppState<R, F>>>,
    query: Result<Query<DeleteProductQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query.map_err(bad_request)?;
    state.service.delete(query.id).await?;
    Ok(StatusCode::OK)
}
