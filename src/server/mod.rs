//! Local REST façade over [`GraphClient`].
//!
//! Every request resolves its own credential (see [`auth`]) and gets a fresh
//! client sharing the server's transport. Unmatched paths answer a JSON 404,
//! wrong verbs a JSON 405.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;

use crate::client::Config;
use crate::rest::GraphClient;
use crate::transport::Transport;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::ApiError;

/// Route table, used for the startup log
pub const ROUTES: &[&str] = &[
    "GET /api/pages",
    "GET /api/pages/{page_id}",
    "GET /api/pages/{page_id}/posts",
    "GET /api/posts/{post_id}/comments",
    "GET /api/comments/{comment_id}",
    "GET /api/comments/{comment_id}/replies",
    "GET /health",
];

/// Behaviour switches for the router
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouterOptions {
    /// Permissive CORS headers and bare 200 on `OPTIONS`
    pub cors: bool,
    /// Environment variable consulted at request time when nothing else
    /// supplies a credential
    pub env_fallback: Option<String>,
}

/// Read-only state shared by all requests
pub struct AppState {
    pub default_token: Option<String>,
    pub config: Config,
    pub transport: Arc<dyn Transport>,
    pub options: RouterOptions,
}

impl AppState {
    pub fn new(config: Config, transport: Arc<dyn Transport>) -> Self {
        AppState {
            default_token: None,
            config,
            transport,
            options: RouterOptions::default(),
        }
    }

    pub fn with_default_token(mut self, token: Option<String>) -> Self {
        self.default_token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn with_options(mut self, options: RouterOptions) -> Self {
        self.options = options;
        self
    }

    /// Client bound to one request's credential
    pub fn client(&self, token: &str) -> GraphClient {
        GraphClient::with_transport(token, self.config.clone(), Arc::clone(&self.transport))
    }
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

pub fn router(state: AppState) -> Router {
    let cors = state.options.cors;

    let mut app: Router<Arc<AppState>> = Router::new()
        .route("/api/pages", get(handlers::get_pages))
        .route("/api/pages/{page_id}", get(handlers::get_page))
        .route("/api/pages/{page_id}/posts", get(handlers::get_posts))
        .route("/api/posts/{post_id}/comments", get(handlers::get_post_comments))
        .route("/api/comments/{comment_id}", get(handlers::get_comment))
        .route("/api/comments/{comment_id}/replies", get(handlers::get_comment_replies))
        .route("/health", get(handlers::health))
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .fallback(handlers::not_found);

    if cors {
        app = app.layer(cors_layer());
    }

    app.layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Serve until ctrl-c
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(
        %addr,
        api_version = %state.config.api_version,
        default_token = state.default_token.is_some(),
        cors = state.options.cors,
        env_fallback = ?state.options.env_fallback,
        "facebook pages api listening"
    );
    for route in ROUTES {
        tracing::info!("  {}", route);
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install ctrl-c handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
