//! Catalog CLI
//!
//! Command-line interface for the product catalog API.

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use catalog_client::CatalogClient;
use catalog_types::ProductId;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(author, version, about = "Product catalog API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the catalog API
    #[arg(long, env = "CATALOG_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Product operations
    Product {
        #[command(subcommand)]
        action: ProductCommands,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum ProductCommands {
    /// Create a new product; prints its id
    Create {
        /// Product name
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Price in USD
        #[arg(long)]
        price: Decimal,
    },
    /// Get product details (counts as a view)
    Get {
        /// Product ID
        id: String,
        /// Currency to price the product in (USD when omitted)
        #[arg(long)]
        currency: Option<String>,
    },
    /// Delete a product
    Delete {
        /// Product ID
        id: String,
    },
}

fn parse_product_id(s: &str) -> Result<ProductId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid product ID: {}", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = CatalogClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Product { action } => match action {
            ProductCommands::Create {
                name,
                description,
                price,
            } => {
                let id = client.create_product(&name, &description, price).await?;
                println!("{}", id);
            }
            ProductCommands::Get { id, currency } => {
                let product_id = parse_product_id(&id)?;
                let product = client
                    .get_product(product_id, currency.as_deref())
                    .await?;
                println!("{}", serde_json::to_string_pretty(&product)?);
            }
            ProductCommands::Delete { id } => {
                let product_id = parse_product_id(&id)?;
                client.delete_product(product_id).await?;
                println!("✓ Product deleted");
            }
        },
    }

    Ok(())
}
