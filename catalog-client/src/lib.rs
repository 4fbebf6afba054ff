//! # Catalog Client SDK
//!
//! A typed Rust client for the product catalog API.

use catalog_types::{CreateProductForm, Product, ProductId};
use reqwest::{Client, Url};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

/// Catalog API client.
pub struct CatalogClient {
    base_url: String,
    http: Client,
}

impl CatalogClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Creates a product and returns its generated id.
    pub async fn create_product(
        &self,
        name: &str,
        description: &str,
        price: Decimal,
    ) -> Result<ProductId, ClientError> {
        let form = CreateProductForm {
            product_name: name.to_string(),
            description: description.to_string(),
            price,
        };
        let resp = self
            .http
            .post(self.url("/api/product"))
            .form(&form)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    /// Gets a product with its price in `currency`, or in USD when `None`.
    ///
    /// Every successful call counts as a view.
    pub async fn get_product(
        &self,
        id: ProductId,
        currency: Option<&str>,
    ) -> Result<Product, ClientError> {
        let url = self.product_url(id, currency)?;
        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    /// Deletes a product. Succeeds even if the id does not exist.
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.url("/api/product"))
            .query(&[("id", id.get())])
            .send()
            .await?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(api_error(status, resp).await)
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `{base}/api/product/{id}[/{currency}]`, each segment percent-encoded.
    fn product_url(&self, id: ProductId, currency: Option<&str>) -> Result<Url, ClientError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?;
            segments
                .pop_if_empty()
                .extend(["api", "product"])
                .push(&id.to_string());
            if let Some(code) = currency {
                segments.push(code);
            }
        }
        Ok(url)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(api_error(status, resp).await)
        }
    }
}

async fn api_error(status: reqwest::StatusCode, resp: reqwest::Response) -> ClientError {
    let body = resp.text().await.unwrap_or_default();
    ClientError::Api {
        status: status.as_u16(),
        message: error_message(body),
    }
}

/// Pulls `error` out of a JSON error body, falling back to the raw text.
fn error_message(body: String) -> String {
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or(body)
}
