use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{HttpProductApi, ProductApi};
use serde_json::json;
use shared::domain::{Product, ProductId};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod form;
mod render;
mod shell;

use config::{load_settings, DEFAULT_CONFIG_PATH};

#[derive(Parser, Debug)]
#[command(name = "storefront", about = "Browse and manage the product catalog")]
struct Cli {
    /// Products API base URL; overrides the config file and environment.
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every product.
    List,
    /// Print one product.
    Show { id: String },
    /// Create a product.
    Create {
        #[arg(long)]
        quantity: i64,
        #[arg(long = "field", value_parser = form::parse_field)]
        fields: Vec<form::Field>,
    },
    /// Replace a product, keeping fields that are not given.
    Update {
        id: String,
        #[arg(long)]
        quantity: Option<i64>,
        #[arg(long = "field", value_parser = form::parse_field)]
        fields: Vec<form::Field>,
    },
    /// Delete a product.
    Delete { id: String },
    /// Interactive session (the default).
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings(&cli.config);
    if let Some(api_url) = cli.api_url {
        settings.api_base_url = api_url;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    info!(api = %settings.api_base_url, "storefront starting");

    let api = Arc::new(
        HttpProductApi::with_timeout(&settings.api_base_url, settings.request_timeout())
            .context("failed to build products API client")?,
    );

    match cli.command.unwrap_or(Command::Shell) {
        Command::List => {
            let products = api.list_products().await.context("failed to list products")?;
            print!("{}", render::product_list(&products));
        }
        Command::Show { id } => {
            let product = fetch_product(api.as_ref(), &ProductId::from(id)).await?;
            print!("{}", render::product_detail(&product));
        }
        Command::Create { quantity, mut fields } => {
            fields.push(("quantity".to_string(), json!(quantity)));
            let product = form::new_product(fields)?;
            let created = api
                .create_product(&product)
                .await
                .context("failed to create product")?;
            print!("{}", render::product_detail(&created));
        }
        Command::Update {
            id,
            quantity,
            mut fields,
        } => {
            let id = ProductId::from(id);
            let original = fetch_product(api.as_ref(), &id).await?;
            if let Some(quantity) = quantity {
                fields.push(("quantity".to_string(), json!(quantity)));
            }
            let edited = form::edited_product(&original, fields)?;
            let updated = api
                .update_product(&id, &edited)
                .await
                .with_context(|| format!("failed to update product {id}"))?;
            print!("{}", render::product_detail(&updated));
        }
        Command::Delete { id } => {
            let id = ProductId::from(id);
            api.delete_product(&id)
                .await
                .with_context(|| format!("failed to delete product {id}"))?;
            println!("deleted product {id}");
        }
        Command::Shell => shell::run(api).await?,
    }

    Ok(())
}

async fn fetch_product(api: &dyn ProductApi, id: &ProductId) -> Result<Product> {
    let products = api.list_products().await.context("failed to list products")?;
    products
        .into_iter()
        .find(|product| product.has_id(id))
        .ok_or_else(|| anyhow!("product {id} not found"))
}
