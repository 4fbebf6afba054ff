//! # Catalog Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the product store and exchange rate adapters
//! - Create the product service
//! - Start the HTTP server

mod config;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_hex::{ProductService, inbound::HttpServer};
use catalog_repo::build_repo;

const DEFAULT_LOG_FILTER: &str = "info,catalog_app=debug,catalog_hex=debug";

/// Installs the log subscriber and the OTLP span exporter.
///
/// The returned provider must be shut down to flush buffered spans.
fn init_tracing() -> anyhow::Result<SdkTracerProvider> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;
    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();
    let telemetry = tracing_opentelemetry::layer().with_tracer(provider.tracer("catalog-service"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    Ok(provider)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let otel_provider = init_tracing()?;

    let config = config::Config::from_env()?;

    tracing::info!("Starting catalog server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);
    tracing::info!(
        provider = ?config.fx_provider,
        supported = %config.supported_currencies,
        "Using exchange rate provider"
    );

    // Build repository (handles connection and schema creation)
    let repo = build_repo(&config.database_url).await?;
    tracing::info!("Product store ready: {}", repo.kind());

    let service = ProductService::new(repo, config.rate_provider());

    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    let _ = otel_provider.shutdown();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_filter_parses() {
        assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }
}
