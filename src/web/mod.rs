//! Web layer module
//!
//! Thin HTTP surface over [`NowPlayingService`]. Handlers pick the operation,
//! the service aggregates, and [`responses`] attaches the standard headers.

use anyhow::Result;
use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{config::Config, services::NowPlayingService};

pub mod handlers;
pub mod responses;

pub use responses::{json_with_cache, CacheControl};

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: Config, service: NowPlayingService) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;
        let state = AppState::new(config, service)?;

        Ok(Self {
            app: create_router(state),
            addr,
        })
    }

    /// Start the web server
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        axum::serve(listener, self.app).await?;
        Ok(())
    }

    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<NowPlayingService>,
    pub config: Arc<Config>,
    /// Upper bound on one whole aggregation, parsed once at startup
    pub aggregation_timeout: Duration,
}

impl AppState {
    pub fn new(config: Config, service: NowPlayingService) -> Result<Self> {
        let aggregation_timeout = config.web.aggregation_timeout()?;
        Ok(Self {
            service: Arc::new(service),
            config: Arc::new(config),
            aggregation_timeout,
        })
    }
}

/// Create the router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/nowplaying", get(handlers::nowplaying::now_playing))
        .route("/api/channels", get(handlers::channels::list_channels))
        // Middleware (applied in reverse order)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
