//! ProductService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use rust_decimal::Decimal;

    use catalog_types::{
        AppError, CreateProductForm, ExchangeError, ExchangeRateProvider, FxQuotes, NewProduct,
        Product, ProductId, ProductRepository, RepoError, SupportedCurrencies,
    };

    use crate::ProductService;

    const VALID_CURRENCY_ABBREVIATIONS: &str = "USD,CAD,EUR,GBP";
    const UNSUPPORTED_CURRENCY_ABBREVIATION: &str = "PLN";
    const NON_EXISTING_PRODUCT_ID: i64 = 500;

    fn product_price() -> Decimal {
        Decimal::new(20, 1)
    }

    fn cad_rate() -> Decimal {
        Decimal::new(125, 2)
    }

    fn eur_rate() -> Decimal {
        Decimal::new(165, 2)
    }

    /// Simple in-memory repository for testing the service layer.
    pub struct MockRepo {
        products: Mutex<HashMap<ProductId, Product>>,
        next_id: Mutex<i64>,
        updates: AtomicUsize,
    }

    impl MockRepo {
        pub fn new() -> Self {
            Self {
                products: Mutex::new(HashMap::new()),
                next_id: Mutex::new(1),
                updates: AtomicUsize::new(0),
            }
        }

        fn stored(&self, id: ProductId) -> Option<Product> {
            self.products.lock().unwrap().get(&id).cloned()
        }

        fn update_count(&self) -> usize {
            self.updates.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProductRepository for MockRepo {
        async fn insert(&self, product: NewProduct) -> Result<Product, RepoError> {
            let mut next_id = self.next_id.lock().unwrap();
            let product = product.into_product(ProductId::new(*next_id));
            *next_id += 1;
            self.products
                .lock()
                .unwrap()
                .insert(product.id, product.clone());
            Ok(product)
        }

        async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepoError> {
            Ok(self.stored(id))
        }

        async fn update(&self, product: &Product) -> Result<Product, RepoError> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            let mut products = self.products.lock().unwrap();
            let stored = products.get_mut(&product.id).ok_or(RepoError::NotFound)?;
            *stored = Product {
                version: stored.version + 1,
                ..product.clone()
            };
            Ok(stored.clone())
        }

        async fn delete_by_id(&self, id: ProductId) -> Result<(), RepoError> {
            self.products.lock().unwrap().remove(&id);
            Ok(())
        }
    }

    /// Rate provider with a fixed table that counts quote fetches.
    pub struct MockRates {
        supported: SupportedCurrencies,
        quotes: FxQuotes,
        quote_calls: AtomicUsize,
    }

    impl MockRates {
        pub fn new() -> Self {
            let mut quotes = HashMap::new();
            quotes.insert("USDUSD".to_string(), Decimal::ONE);
            quotes.insert("USDCAD".to_string(), cad_rate());
            quotes.insert("USDEUR".to_string(), eur_rate());
            Self {
                supported: SupportedCurrencies::parse(VALID_CURRENCY_ABBREVIATIONS),
                quotes: FxQuotes::new(quotes),
                quote_calls: AtomicUsize::new(0),
            }
        }

        fn quote_calls(&self) -> usize {
            self.quote_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ExchangeRateProvider for MockRates {
        async fn supported_currencies(&self) -> Result<SupportedCurrencies, ExchangeError> {
            Ok(self.supported.clone())
        }

        async fn quotes(&self) -> Result<FxQuotes, ExchangeError> {
            self.quote_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.quotes.clone())
        }
    }

    /// Rate provider whose quotes endpoint is down.
    pub struct DownRates;

    #[async_trait]
    impl ExchangeRateProvider for DownRates {
        async fn supported_currencies(&self) -> Result<SupportedCurrencies, ExchangeError> {
            Ok(SupportedCurrencies::parse(VALID_CURRENCY_ABBREVIATIONS))
        }

        async fn quotes(&self) -> Result<FxQuotes, ExchangeError> {
            Err(ExchangeError::ServiceUnavailable("connection refused".into()))
        }
    }

    fn product_form() -> CreateProductForm {
        CreateProductForm {
            product_name: "Example product name".to_string(),
            description: "Example description".to_string(),
            price: product_price(),
        }
    }

    async fn service_with_product() -> (ProductService<MockRepo, MockRates>, ProductId) {
        let service = ProductService::new(MockRepo::new(), MockRates::new());
        let id = service.create(product_form()).await.unwrap();
        (service, id)
    }

    #[tokio::test]
    async fn test_create_returns_store_id() {
        let service = ProductService::new(MockRepo::new(), MockRates::new());

        let first = service.create(product_form()).await.unwrap();
        let second = service.create(product_form()).await.unwrap();

        assert_eq!(first, ProductId::new(1));
        assert_eq!(second, ProductId::new(2));
    }

    #[tokio::test]
    async fn test_create_starts_with_zero_views() {
        let (service, id) = service_with_product().await;

        let stored = service.repo().stored(id).unwrap();

        assert_eq!(stored.name, "Example product name");
        assert_eq!(stored.description, "Example description");
        assert_eq!(stored.price, product_price());
        assert_eq!(stored.views, 0);
        assert!(!stored.deleted);
    }

    #[tokio::test]
    async fn test_delete() {
        let (service, id) = service_with_product().await;

        service.delete(id).await.unwrap();

        assert!(service.repo().stored(id).is_none());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_ok() {
        let service = ProductService::new(MockRepo::new(), MockRates::new());

        let result = service.delete(ProductId::new(NON_EXISTING_PRODUCT_ID)).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_get_when_usd_provided_as_currency() {
        let (service, id) = service_with_product().await;

        let product = service.get(id, "USD").await.unwrap();

        assert_eq!(product.name, "Example product name");
        assert_eq!(product.price, product_price());
        assert_eq!(service.rates().quote_calls(), 0);
    }

    #[tokio::test]
    async fn test_get_when_usd_provided_for_non_existent_id() {
        let service = ProductService::new(MockRepo::new(), MockRates::new());

        let err = service
            .get(ProductId::new(NON_EXISTING_PRODUCT_ID), "USD")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ProductNotFound(_)));
        assert_eq!(err.to_string(), "Product with id: 500 does not exist.");
        assert_eq!(err.status(), 404);
    }

    #[tokio::test]
    async fn test_get_when_eur_provided_as_currency() {
        let (service, id) = service_with_product().await;

        let product = service.get(id, "EUR").await.unwrap();

        assert_eq!(product.name, "Example product name");
        assert_eq!(product.price, product_price() * eur_rate());
        assert_eq!(product.price, Decimal::new(330, 2));
    }

    #[tokio::test]
    async fn test_get_when_cad_provided_as_currency() {
        let (service, id) = service_with_product().await;

        let product = service.get(id, "CAD").await.unwrap();

        assert_eq!(product.price, product_price() * cad_rate());
    }

    #[tokio::test]
    async fn test_get_when_unsupported_currency_provided() {
        let (service, id) = service_with_product().await;

        let err = service
            .get(id, UNSUPPORTED_CURRENCY_ABBREVIATION)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidCurrency(_)));
        assert_eq!(err.to_string(), "Invalid currency abbreviation: PLN");
        assert_eq!(err.status(), 400);
        assert_eq!(service.repo().stored(id).unwrap().views, 0);
    }

    #[tokio::test]
    async fn test_invalid_currency_checked_before_lookup() {
        let service = ProductService::new(MockRepo::new(), MockRates::new());

        let err = service
            .get(
                ProductId::new(NON_EXISTING_PRODUCT_ID),
                UNSUPPORTED_CURRENCY_ABBREVIATION,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidCurrency(_)));
    }

    #[tokio::test]
    async fn test_currency_match_is_case_sensitive() {
        let (service, id) = service_with_product().await;

        let err = service.get(id, "eur").await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid currency abbreviation: eur");
    }

    #[tokio::test]
    async fn test_each_get_increments_views_by_one() {
        let (service, id) = service_with_product().await;

        service.get(id, "USD").await.unwrap();
        service.get(id, "EUR").await.unwrap();
        let product = service.get(id, "CAD").await.unwrap();

        assert_eq!(product.views, 3);
        assert_eq!(service.repo().stored(id).unwrap().views, 3);
        assert_eq!(service.repo().update_count(), 3);
    }

    #[tokio::test]
    async fn test_conversion_does_not_touch_stored_price() {
        let (service, id) = service_with_product().await;

        let converted = service.get(id, "EUR").await.unwrap();
        let stored = service.repo().stored(id).unwrap();

        assert_ne!(converted.price, stored.price);
        assert_eq!(stored.price, product_price());
    }

    #[tokio::test]
    async fn test_missing_rate_is_internal_error() {
        let (service, id) = service_with_product().await;

        // GBP is supported but the snapshot has no USDGBP entry
        let err = service.get(id, "GBP").await.unwrap_err();

        assert!(matches!(err, AppError::Internal(ref msg) if msg.contains("USDGBP")));
        assert_eq!(err.status(), 500);
        assert_eq!(service.repo().stored(id).unwrap().views, 1);
    }

    #[tokio::test]
    async fn test_provider_failure_is_internal_error() {
        let service = ProductService::new(MockRepo::new(), DownRates);
        let id = service.create(product_form()).await.unwrap();

        let err = service.get(id, "EUR").await.unwrap_err();

        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(service.get(id, "USD").await.unwrap().price, product_price());
    }
}
