//! Product Application Service
//!
//! Orchestrates domain operations through the repository and exchange rate
//! ports. Contains NO infrastructure logic - pure business orchestration.

use catalog_types::{
    AppError, BASE_CURRENCY, CreateProductForm, ExchangeError, ExchangeRateProvider, NewProduct,
    Product, ProductId, ProductRepository, RepoError, quote_key,
};
use rust_decimal::Decimal;

/// Application service for catalog operations.
///
/// Generic over the store and the rate provider; both adapters are injected
/// at compile time.
pub struct ProductService<R: ProductRepository, F: ExchangeRateProvider> {
    repo: R,
    rates: F,
}

impl<R: ProductRepository, F: ExchangeRateProvider> ProductService<R, F> {
    /// Creates a new product service with the given adapters.
    pub fn new(repo: R, rates: F) -> Self {
        Self { repo, rates }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Returns a reference to the underlying rate provider.
    pub fn rates(&self) -> &F {
        &self.rates
    }

    /// Creates a product from a submitted form and returns its generated id.
    #[tracing::instrument(skip(self, form), fields(name = %form.product_name))]
    pub async fn create(&self, form: CreateProductForm) -> Result<ProductId, AppError> {
        tracing::info!("Creating new product");
        let product = self.repo.insert(NewProduct::from(form)).await?;
        tracing::info!(product_id = %product.id, price = %product.price, "Saved product");
        Ok(product.id)
    }

    /// Deletes a product. Unknown ids are ignored.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> Result<(), AppError> {
        tracing::info!("Deleting product");
        self.repo.delete_by_id(id).await?;
        tracing::info!("Product deleted");
        Ok(())
    }

    /// Gets a product with its price expressed in `currency`.
    ///
    /// The currency is validated before the store is touched. A successful
    /// lookup always counts as a view, even when conversion then fails. The
    /// converted price is never persisted.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: ProductId, currency: &str) -> Result<Product, AppError> {
        tracing::info!("Processing product lookup");

        let supported = self.rates.supported_currencies().await?;
        if !supported.contains(currency) {
            return Err(AppError::InvalidCurrency(currency.to_string()));
        }

        let product = match self.repo.find_by_id(id).await? {
            Some(product) => product,
            None => {
                let err = AppError::ProductNotFound(id);
                tracing::error!("{}", err);
                return Err(err);
            }
        };

        let product = self.record_view(product).await?;

        if currency == BASE_CURRENCY {
            return Ok(product);
        }

        tracing::info!("Fetching current exchange rate for {}", currency);
        let rate = self.current_rate(currency).await?;
        tracing::info!(%rate, "Currency rate for {}", currency);

        let converted = product.price.checked_mul(rate).ok_or_else(|| {
            AppError::Internal(format!(
                "Price conversion overflowed for product {}",
                product.id
            ))
        })?;
        tracing::info!(%converted, "Price after conversion");

        Ok(product.with_price(converted))
    }

    async fn record_view(&self, mut product: Product) -> Result<Product, AppError> {
        tracing::info!(current_views = product.views, "Updating views counter");
        product.record_view();
        self.repo.update(&product).await.map_err(|e| match e {
            RepoError::NotFound => AppError::ProductNotFound(product.id),
            other => other.into(),
        })
    }

    async fn current_rate(&self, currency: &str) -> Result<Decimal, AppError> {
        let key = quote_key(currency);
        let quotes = self.rates.quotes().await?;
        quotes
            .get(&key)
            .ok_or_else(|| ExchangeError::RateNotAvailable(key).into())
    }
}
