// src/main.rs
mod config;
mod database;
mod dtos;
mod error;
mod extract;
mod handlers;
mod models;
mod planner;
mod routes;
mod state;
mod store;
mod validation;

#[cfg(test)]
mod test_support;

use dotenvy::dotenv;
use std::net::{IpAddr, SocketAddr};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Number of ports tried after the configured one.
const PORT_FALLBACKS: u16 = 20;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to open database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to bind to any port starting at {port} on {host}")]
    Bind { host: IpAddr, port: u16 },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server stopped");
        std::process::exit(1);
    }
}

pub async fn run(config: Config) -> Result<(), StartupError> {
    let db_pool = database::create_pool(&config.database_url, config.max_connections)
        .await
        .inspect_err(|e| tracing::error!(error = %e, url = %config.database_url, "Failed to create database pool"))?;

    let app_state = state::AppState::new(db_pool);
    let app = routes::create_app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = bind(config.host, config.port).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

// Try port..port+20 to avoid crash when address is in use
async fn bind(host: IpAddr, port: u16) -> Result<TcpListener, StartupError> {
    for offset in 0..=PORT_FALLBACKS {
        let addr = SocketAddr::from((host, port.saturating_add(offset)));
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                tracing::info!("Server running on http://{}", addr);
                return Ok(listener);
            }
            Err(e) => {
                if offset == 0 { tracing::warn!(%addr, error=%e, "Port in use, trying next"); }
            }
        }
    }
    Err(StartupError::Bind { host, port })
}
