use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result};
use tracing::info;

mod classifier;
mod comparator;
mod config;
mod error;
mod fetcher;
mod models;
mod normalize;
mod scrapers;
mod selector_chain;
mod server;
mod traits;

use comparator::ProductComparator;
use config::Config;
use fetcher::HttpFetcher;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    info!("Starting product comparison service");

    let config = Config::from_env()?;
    let fetcher = HttpFetcher::new(&config)?;
    let comparator = web::Data::new(ProductComparator::new(Arc::new(fetcher)));

    info!(
        "Listening on http://{}:{} (fetch timeout {}s)",
        config.host, config.port, config.fetch_timeout_secs
    );

    HttpServer::new(move || {
        App::new()
            .app_data(comparator.clone())
            .wrap(server::cors_headers())
            .configure(server::configure)
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?
    .run()
    .await?;

    Ok(())
}
