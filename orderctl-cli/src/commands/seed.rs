//! Destructive reset + seed
//!
//! Drops the orders, products and order_product_map tables, recreates them
//! and inserts the fixed product catalogue. Not part of `serve`.

use anyhow::{bail, Context, Result};
use clap::Parser;

use orderctl_server::db::{create_pool, ping, schema};

use crate::config::database_config;

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Confirm that all existing orders may be destroyed
    #[arg(long)]
    pub yes: bool,
}

/// Reset the schema and insert seed products
pub async fn run_seed(args: SeedArgs) -> Result<()> {
    if !args.yes {
        bail!("seed drops every order and product; re-run with --yes to confirm");
    }

    let db = database_config()?;
    let pool = create_pool(db.connect_options())
        .await
        .context("Failed to create database pool")?;

    ping(&pool)
        .await
        .context("Database liveness check failed")?;

    schema::reset_and_seed(&pool)
        .await
        .context("Failed to reset and seed database")?;

    pool.close().await;
    println!(
        "Seeded {} products into {}",
        schema::SEED_PRODUCTS.len(),
        db.name
    );
    Ok(())
}
