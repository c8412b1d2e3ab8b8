mod aggregator;
mod config;
mod error;
mod extractors;
mod fetch;
mod models;
mod routes;
mod search;
mod sites;

use std::sync::Arc;

use clap::Parser;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::aggregator::{Aggregator, JobSource};
use crate::config::{Command, Config};
use crate::fetch::Fetcher;
use crate::routes::AppState;
use crate::sites::SiteRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("jobscout=info,tower_http=info"));
    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    if config.query.trim().is_empty() {
        anyhow::bail!("--query must not be empty");
    }

    // Unknown site names and broken selectors fail here, before serving anything.
    let registry = SiteRegistry::builtin()?;
    tracing::info!("Loaded {} sites", registry.len());

    let fetcher = Fetcher::new(&config.user_agent, config.timeout())?;
    let aggregator = Aggregator::new(fetcher, registry, config.on_detail_error);

    match config.resolved_command() {
        Command::Serve { listen_addr } => {
            tracing::info!(
                "Serving {} sites for \"{}\" ({:?} on detail errors)",
                aggregator.site_count(),
                config.query,
                config.on_detail_error
            );
            let state = AppState {
                source: Arc::new(aggregator),
                query: config.query.clone(),
            };
            let app = routes::router(state)
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive());

            let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
            tracing::info!("Listening on {listen_addr}");
            axum::serve(listener, app).await?;
        }
        Command::Collect { query } => {
            let term = query.unwrap_or_else(|| config.query.clone());
            let jobs = aggregator.collect_jobs(&term).await?;
            println!("{}", serde_json::to_string_pretty(&jobs)?);
        }
    }

    Ok(())
}
