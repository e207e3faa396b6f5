//! Catalog Smoke
//!
//! Sends hand-picked requests to a running Catalog API and prints each
//! status code and response body.

use clap::{Parser, Subcommand};
use core_config::Environment;
use core_config::tracing::{init_tracing, install_color_eyre};
use eyre::Result;
use serde_json::Value;
use tracing::info;

mod client;

use client::{CatalogClient, Reply};

#[derive(Parser, Debug)]
#[command(name = "catalog-smoke")]
#[command(about = "Manual smoke tests against a running Catalog API")]
struct Cli {
    /// Base URL of the Catalog API
    #[arg(long, global = true, default_value = "http://127.0.0.1:8080")]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Create `Product 0` .. `Product N-1` (price 80, not age-restricted)
    SeedProducts {
        #[arg(short = 'n', long, default_value_t = 100)]
        count: u32,

        #[arg(short, long, default_value_t = 1)]
        category_id: i32,
    },

    /// Create a single product
    CreateProduct {
        #[arg(long)]
        name: String,

        /// Sent verbatim; numeric strings are accepted by the server
        #[arg(long, default_value = "80")]
        price: String,

        #[arg(long = "is-18-plus")]
        is_18_plus: bool,

        #[arg(short, long, default_value_t = 1)]
        category_id: i32,
    },

    /// Set the age-restriction flag of a product
    UpdateProduct {
        #[arg(long)]
        id: i32,

        #[arg(long = "is-18-plus", action = clap::ArgAction::Set, default_value_t = false)]
        is_18_plus: bool,
    },

    /// Delete a product by id
    DeleteProduct {
        #[arg(long)]
        id: i32,
    },

    /// Create a category
    CreateCategory {
        #[arg(long)]
        name: String,
    },
}

fn print_reply(reply: &Reply) {
    println!("{}", reply.status.as_u16());
    println!("{}", reply.body);
}

/// Numeric prices go out as JSON numbers, anything else as a string.
fn price_value(raw: &str) -> Value {
    raw.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(raw.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();
    init_tracing(&Environment::from_env());

    let cli = Cli::parse();
    let client = CatalogClient::new(&cli.base_url);

    info!(base_url = %cli.base_url, "Running smoke command");

    match cli.command {
        Commands::SeedProducts { count, category_id } => {
            let price = Value::from(80);
            for i in 0..count {
                let reply = client
                    .create_product(&format!("Product {}", i), &price, false, category_id)
                    .await?;
                print_reply(&reply);
            }
        }

        Commands::CreateProduct {
            name,
            price,
            is_18_plus,
            category_id,
        } => {
            let reply = client
                .create_product(&name, &price_value(&price), is_18_plus, category_id)
                .await?;
            print_reply(&reply);
        }

        Commands::UpdateProduct { id, is_18_plus } => {
            print_reply(&client.update_product(id, is_18_plus).await?);
        }

        Commands::DeleteProduct { id } => {
            print_reply(&client.delete_product(id).await?);
        }

        Commands::CreateCategory { name } => {
            print_reply(&client.create_category(&name).await?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_default() {
        let cli = Cli::try_parse_from(["catalog-smoke", "delete-product", "--id", "10"]).unwrap();

        assert_eq!(cli.base_url, "http://127.0.0.1:8080");
        assert_eq!(cli.command, Commands::DeleteProduct { id: 10 });
    }

    #[test]
    fn test_seed_products_args() {
        let cli = Cli::try_parse_from([
            "catalog-smoke",
            "--base-url",
            "http://localhost:5000",
            "seed-products",
            "--count",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.base_url, "http://localhost:5000");
        assert_eq!(
            cli.command,
            Commands::SeedProducts {
                count: 5,
                category_id: 1
            }
        );
    }

    #[test]
    fn test_update_product_takes_explicit_bool() {
        let cli = Cli::try_parse_from([
            "catalog-smoke",
            "update-product",
            "--id",
            "3",
            "--is-18-plus",
            "true",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Commands::UpdateProduct {
                id: 3,
                is_18_plus: true
            }
        );
    }

    #[test]
    fn test_price_value() {
        assert_eq!(price_value("80"), Value::from(80.0));
        assert_eq!(price_value("abc"), Value::String("abc".to_string()));
    }
}
