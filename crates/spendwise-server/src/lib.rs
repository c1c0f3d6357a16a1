//! Spendwise Web Server
//!
//! Axum-based REST API wrapping the Spendwise expense analyzer.
//!
//! The server is a thin transport: it decodes the request body, hands it to
//! the analyzer and returns the result as JSON. It holds no per-request state.
//!
//! - `POST /suggest` - budgeting tips for a JSON array of expense records
//! - `POST /summary` - structured window statistics for the same input
//! - `GET /health` - liveness probe
//!
//! Cross-origin calls are allowed from any origin unless an allow-list is
//! configured.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use spendwise_core::ExpenseAnalyzer;

mod handlers;

/// Maximum request body size (10 MB)
pub const MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Default listen port
pub const DEFAULT_PORT: u16 = 5000;

/// Default bind address
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Environment variable overriding the listen port
pub const PORT_ENV: &str = "PORT";

/// Environment variable overriding the bind address
pub const HOST_ENV: &str = "SPENDWISE_HOST";

/// Environment variable holding a comma-separated CORS origin allow-list
pub const ALLOWED_ORIGINS_ENV: &str = "SPENDWISE_ALLOWED_ORIGINS";

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Allowed CORS origins (empty = any origin)
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            allowed_origins: vec![],
        }
    }
}

impl ServerConfig {
    /// Build configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = std::env::var(HOST_ENV)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);

        let port = match std::env::var(PORT_ENV) {
            Ok(value) => value.trim().parse::<u16>().unwrap_or_else(|_| {
                warn!(value = %value, "Invalid {} value, using {}", PORT_ENV, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            Err(_) => defaults.port,
        };

        let allowed_origins =
            parse_origin_list(&std::env::var(ALLOWED_ORIGINS_ENV).unwrap_or_default());

        Self {
            host,
            port,
            allowed_origins,
        }
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse a comma-separated list of origins
pub fn parse_origin_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Shared application state
pub struct AppState {
    pub analyzer: ExpenseAnalyzer,
}

/// Create the application router
pub fn create_router(config: ServerConfig) -> Router {
    let cors = build_cors(&config.allowed_origins);

    let state = Arc::new(AppState {
        analyzer: ExpenseAnalyzer::new(),
    });

    Router::new()
        .route("/suggest", post(handlers::suggest))
        .route("/summary", post(handlers::summarize))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn build_cors(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(origins)
}

/// Start the server with the given configuration
///
/// Runs until Ctrl+C is received.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    if config.allowed_origins.is_empty() {
        info!("CORS: any origin allowed");
    } else {
        info!(origins = ?config.allowed_origins, "CORS: restricted origins");
    }

    let addr = config.bind_addr();
    let app = create_router(config);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        warn!(status = %self.status, message = %self.message, "Request rejected");

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}
