//! HTTP server command
//!
//! Connects to the database, verifies it, reconciles the schema without
//! touching existing rows, then serves the orders/products API.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::{Context, Result};
use clap::Parser;

use orderctl_server::db::{create_pool, ping, schema};
use orderctl_server::http::{run_server, server::DEFAULT_PORT, ServerConfig};
use orderctl_server::AppState;

use crate::config::database_config;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, short = 'p', default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind to
    #[arg(long, short = 'b', default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let db = database_config()?;
    tracing::info!(host = %db.host, database = %db.name, "Connecting to database");

    let pool = create_pool(db.connect_options())
        .await
        .context("Failed to create database pool")?;

    ping(&pool)
        .await
        .context("Database liveness check failed")?;
    tracing::info!("Connection has been established successfully");

    schema::reconcile(&pool)
        .await
        .context("Failed to reconcile database schema")?;

    let config = ServerConfig {
        bind_addr: SocketAddr::new(args.bind, args.port),
    };

    // Blocks until shutdown
    run_server(AppState::new(pool), config)
        .await
        .context("Server error")?;

    Ok(())
}
