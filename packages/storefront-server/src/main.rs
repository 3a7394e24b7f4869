mod app;
mod auth;
mod db;
mod error;
mod routes;
mod services;
mod state;

use crate::state::AppState;
use clap::Parser;
use dotenvy::dotenv;
use sea_orm::Database;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_DB_URL: &str = "sqlite://storefront.db?mode=rwc";

#[derive(clap::Parser)]
struct CliArgs {
    /// Listen address, overrides STOREFRONT_ADDR
    #[clap(long)]
    addr: Option<String>,
    /// Database URL, overrides STOREFRONT_DB_URL
    #[clap(long)]
    db_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let args = CliArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async { storefront_service(args).await })
}

async fn storefront_service(args: CliArgs) -> anyhow::Result<()> {
    let db_url = args
        .db_url
        .or_else(|| std::env::var("STOREFRONT_DB_URL").ok())
        .unwrap_or_else(|| DEFAULT_DB_URL.to_string());
    let db_cnn = Database::connect(&db_url).await?;
    db::initialize::initial(&db_cnn).await?;

    let state = Arc::new(AppState { db: db_cnn });
    let app = app::axum_app(state);

    let addr = args
        .addr
        .or_else(|| std::env::var("STOREFRONT_ADDR").ok())
        .unwrap_or_else(|| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
