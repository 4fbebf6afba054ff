//! Client example walking the product lifecycle against a running server.
//!
//! Run with: cargo run -p catalog-app --example client_example --no-default-features --features sqlite

use std::net::SocketAddr;

use catalog_client::CatalogClient;
use catalog_hex::{ProductService, inbound::HttpServer};
use catalog_repo::{StaticRateProvider, build_repo};
use rust_decimal::Decimal;
use tempfile::tempdir;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    let port = addr.port();
    drop(listener);

    // Use a temp file-backed SQLite DB
    let tmp = tempdir()?;
    let db_path = tmp.path().join("catalog.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    println!("🚀 Starting server on port {port}...");
    println!("   Database: {db_url}");

    let repo = build_repo(&db_url).await?;

    // Start server in background with the built-in rate table
    let service = ProductService::new(repo, StaticRateProvider::default());
    let router = HttpServer::new(service).router();

    let server_listener = TcpListener::bind(format!("127.0.0.1:{port}")).await?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(server_listener, router.into_make_service()).await {
            eprintln!("server error: {e}");
        }
    });

    let client = CatalogClient::new(format!("http://127.0.0.1:{port}"));

    let health = client.health().await?;
    println!("✅ Server health: {health}");

    let lamp = client
        .create_product("Desk lamp", "Adjustable LED desk lamp", Decimal::new(2499, 2))
        .await?;
    println!("✅ Created product id={lamp}");

    let product = client.get_product(lamp, None).await?;
    println!(
        "   {} costs ${} (views={})",
        product.name, product.price, product.views
    );

    for currency in ["EUR", "CAD", "GBP"] {
        let product = client.get_product(lamp, Some(currency)).await?;
        println!(
            "   {} in {currency}: {} (views={})",
            product.name, product.price, product.views
        );
    }

    let response = client.get_product(lamp, Some("PLN")).await;
    assert!(response.is_err());
    println!("✅ Unsupported currency rejected: {}", response.unwrap_err());

    client.delete_product(lamp).await?;
    println!("✅ Deleted product id={lamp}");

    let response = client.get_product(lamp, None).await;
    assert!(response.is_err());
    println!("✅ Lookup after delete: {}", response.unwrap_err());

    println!("\n🎉 Example completed successfully!");

    Ok(())
}
