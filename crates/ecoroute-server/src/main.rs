//! EcoRoute Server - eco-friendly route ranking backend

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ecoroute_server::api;
use ecoroute_server::config::{Config, DirectionsBackend};
use ecoroute_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine; the process environment still applies.
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("ecoroute_server=debug".parse()?))
        .init();

    tracing::info!("Starting EcoRoute Server...");

    let config = Config::from_env();
    warn_missing_keys(&config);
    let port = config.server_port;
    let cors = cors_layer(&config)?;
    let state = Arc::new(AppState::from_config(config).context("building provider clients")?);

    // Build the app
    let app = api::routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Run server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(config: &Config) -> Result<CorsLayer> {
    let Some(origin) = config.cors_origin.as_deref() else {
        return Ok(CorsLayer::permissive());
    };
    let origin: HeaderValue = origin
        .parse()
        .with_context(|| format!("invalid CORS_ORIGIN {:?}", origin))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true))
}

fn warn_missing_keys(config: &Config) {
    let directions_key = match config.directions_backend {
        DirectionsBackend::Google => ("GOOGLE_API_KEY", &config.google_api_key),
        DirectionsBackend::OpenRoute => ("ORS_API_KEY", &config.ors_api_key),
    };
    for (name, value) in [
        directions_key,
        ("OPENWEATHER_API_KEY", &config.openweather_api_key),
    ] {
        if value.trim().is_empty() {
            tracing::warn!("{} is not set; dependent requests will fail", name);
        }
    }
}
