//! Web layer module
//!
//! This module provides the HTTP interface for the IPTV catalog. Handlers
//! are thin and delegate to [`CatalogService`] for business logic.
//!
//! # Architecture
//!
//! - **Handlers**: HTTP request handlers organized by audience
//! - **Responses**: Standardized response types and error mapping
//! - **Middleware**: Basic authentication for the admin routes
//!
//! Public routes live under `/api/v1`, admin routes under `/api/v1/admin`.

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::watch;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    config::Config, errors::SourceResult, services::CatalogService, sources::PlaylistLoader,
};

pub mod handlers;
pub mod middleware;
pub mod responses;

// Re-export commonly used types
pub use responses::{handle_error, handle_result, ApiResponse};

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: Config, catalog: Arc<CatalogService>) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;
        let state = AppState::new(config, catalog)?;
        let app = create_router(state);

        Ok(Self { app, addr })
    }

    /// Serve until `shutdown` flips to true or its sender is dropped
    pub async fn serve(self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        info!("Listening on http://{}", listener.local_addr()?);

        axum::serve(listener, self.app)
            .with_graceful_shutdown(async move {
                while shutdown.changed().await.is_ok() {
                    if *shutdown.borrow() {
                        break;
                    }
                }
            })
            .await?;
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
    pub catalog: Arc<CatalogService>,
    pub loader: Arc<PlaylistLoader>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, catalog: Arc<CatalogService>) -> SourceResult<Self> {
        let loader = Arc::new(PlaylistLoader::from_config(&config.import)?);
        Ok(Self {
            catalog,
            loader,
            config,
        })
    }
}

/// Build the full router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/api/v1", api_v1_routes(state.clone()))
        // Middleware (applied in reverse order)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_v1_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/categories", get(handlers::channels::list_categories))
        .route("/channels", get(handlers::channels::list_channels))
        .route("/channels/:id", get(handlers::channels::get_channel))
        .route("/channels/:id/stream", get(handlers::channels::stream_channel))
        .route("/channels/:id/favorite", post(handlers::channels::toggle_favorite))
        .route("/catalog/version", get(handlers::channels::catalog_version))
        .nest("/admin", admin_routes(state))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    let body_limit = usize::try_from(state.config.import.max_playlist_bytes).unwrap_or(usize::MAX);

    Router::new()
        .route("/channels", post(handlers::admin::create_channel))
        .route(
            "/channels/:id",
            put(handlers::admin::update_channel).delete(handlers::admin::delete_channel),
        )
        .route("/import", post(handlers::admin::import_playlist))
        .route("/import/preview", post(handlers::admin::preview_import))
        .route("/import/url", post(handlers::admin::import_from_url))
        .route("/import/sample", post(handlers::admin::import_sample))
        .layer(DefaultBodyLimit::max(body_limit))
        .route_layer(from_fn_with_state(state, middleware::admin_auth_middleware))
}
