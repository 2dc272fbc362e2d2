//! Monthcast Web Server
//!
//! Axum-based web UI and JSON API for the Monthcast forecaster.
//!
//! Every upload triggers a fresh analysis pass; the server keeps no per-user
//! state between requests. Only the configuration is shared.
//!
//! Security features:
//! - Upload size limit
//! - Sanitized error responses
//! - Security headers (CSP, no framing, no sniffing)

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use monthcast_core::{Analysis, Analyzer, Config};

mod handlers;
mod pages;

/// Maximum file upload size (10 MB)
pub const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Headroom for multipart boundaries and form fields on top of the file itself
const BODY_LIMIT_SLACK: usize = 64 * 1024;

/// Body limit for the JSON endpoint: base64 of a maximum-size file plus slack
const JSON_BODY_LIMIT: usize = MAX_UPLOAD_SIZE.div_ceil(3) * 4 + BODY_LIMIT_SLACK;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub analyzer: Analyzer,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let analyzer = Analyzer::new(&config.forecast);
        Self { config, analyzer }
    }

    /// Load and analyze one uploaded CSV file
    pub fn run_pass(&self, file_data: &[u8]) -> monthcast_core::Result<Analysis> {
        let series = monthcast_core::parse_csv(file_data, &self.config.columns)?;
        self.analyzer.analyze(&series)
    }
}

/// Create the application router
pub fn create_router(config: Config) -> Router {
    let state = Arc::new(AppState::new(config));

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/analyze", post(handlers::analyze_upload))
        .route(
            "/analyze/json",
            post(handlers::analyze_json).layer(DefaultBodyLimit::max(JSON_BODY_LIMIT)),
        );

    // CSP: inline styles and inline SVG only, no scripts
    let csp_value = HeaderValue::from_static(
        "default-src 'self'; script-src 'none'; style-src 'self' 'unsafe-inline'; img-src 'self' data:; form-action 'self'; frame-ancestors 'none'",
    );

    Router::new()
        .route("/", get(handlers::index_page))
        .route("/analyze", post(handlers::analyze_page))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE + BODY_LIMIT_SLACK))
        .layer(TraceLayer::new_for_http())
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ))
}

/// Start the server
pub async fn serve(config: Config, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);
    if host != "127.0.0.1" && host != "localhost" {
        warn!("⚠️  Listening on {} - uploads are not authenticated", host);
    }

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn payload_too_large() -> Self {
        Self {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: format!(
                "File too large. Maximum size is {} MB",
                MAX_UPLOAD_SIZE / 1024 / 1024
            ),
            internal: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Log the internal cause, if any
    pub(crate) fn log(&self) {
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        } else if self.status.is_client_error() {
            warn!(status = %self.status, message = %self.message, "Rejected request");
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();

        // Problems with the uploaded data are reported back verbatim
        if let Some(core_err) = err.downcast_ref::<monthcast_core::Error>() {
            if core_err.is_input_error() {
                return Self::bad_request(&core_err.to_string());
            }
        }

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
