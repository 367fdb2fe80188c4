//! Folkbörsen feed API
//!
//! Serves the Folkbörsen RSS feed with graceful degradation: the bundled
//! feed file, then the statically deployed copy, then a built-in fallback.
//! Run directly it doubles as a local dev server for the feed endpoint.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::{header, HeaderValue},
    routing::any,
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{FsFeedStore, HttpFeedFetcher};
use app::FeedService;
use config::Config;

/// Paths the dev server routes to the feed responder
pub const FEED_ROUTES: [&str; 3] = ["/api/generate-feed", "/api/generate_feed", "/generate-feed"];

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub feed_service: Arc<FeedService>,
    pub config: Config,
}

/// Build the router: the feed routes with CORS headers, 404 for the rest
pub fn router(state: AppState) -> Router {
    let mut feed_routes = Router::new();
    for path in FEED_ROUTES {
        feed_routes = feed_routes.route(path, any(handlers::generate_feed));
    }

    feed_routes
        .route_layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .route_layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, OPTIONS"),
        ))
        .route_layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,folkborsen_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Folkbörsen feed API...");

    // Load configuration
    let config = Config::from_env();

    let feed_path = std::env::current_dir()
        .context("Failed to resolve working directory")?
        .join(&config.feed_file);

    // Create adapters
    let store = Arc::new(FsFeedStore::new(feed_path));
    tracing::info!(
        path = %store.path().display(),
        timeout_secs = config.fetch_timeout.as_secs(),
        "Feed sources configured"
    );
    let fetcher =
        Arc::new(HttpFeedFetcher::new(config.fetch_timeout).context("Failed to build HTTP client")?);

    let state = AppState {
        feed_service: Arc::new(FeedService::new(store, fetcher, config.feed_file.clone())),
        config: config.clone(),
    };

    let app = router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(
        "Local feed server listening: http://localhost:{}/api/generate-feed",
        config.port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}
