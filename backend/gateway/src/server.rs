//! Main HTTP Gateway Server.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use medrelay_config::RelayConfig;
use medrelay_core::{Predictor, TextExtractor};
use medrelay_logging::redact_sensitive_data;
use medrelay_ocr::TesseractExtractor;
use medrelay_predictor::HttpPredictor;

use crate::{cors, extract, health_api, predict};

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub config: Arc<RelayConfig>,
    pub predictor: Arc<dyn Predictor>,
    pub extractor: Arc<dyn TextExtractor>,
}

impl GatewayState {
    pub fn new(
        config: RelayConfig,
        predictor: Arc<dyn Predictor>,
        extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            predictor,
            extractor,
        }
    }

    /// Wire the production collaborators: HTTP predictor and Tesseract.
    pub fn from_config(config: RelayConfig) -> Result<Self> {
        let predictor = HttpPredictor::new(
            &config.upstream_base_url,
            Duration::from_secs(config.upstream_timeout_secs),
        )?;
        let extractor = TesseractExtractor::new(&config.ocr_binary, &config.scratch_dir)
            .with_language(&config.ocr_language)
            .with_timeout(Duration::from_secs(config.ocr_timeout_secs));

        if config.enable_extract_route {
            if let Err(e) = extractor.resolve() {
                warn!(error = %e, "Extract route enabled but OCR engine is missing");
            }
        }

        Ok(Self::new(config, Arc::new(predictor), Arc::new(extractor)))
    }
}

/// Build the router with every route, CORS, body limit, and request tracing.
pub fn build_router(state: GatewayState) -> Result<Router> {
    let origin = HeaderValue::from_str(&state.config.allowed_origin)
        .context("Allowed origin is not a valid header value")?;
    let body_limit = state.config.max_upload_bytes;

    let mut app = Router::new()
        .route("/predict", post(predict::predict))
        .route("/health", get(health_api::get_health));

    if state.config.enable_extract_route {
        app = app.route("/extract", post(extract::extract));
    }

    let app = app
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn_with_state(origin, cors::apply_cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

/// Bind and serve until `shutdown` resolves.
#[instrument(skip_all)]
pub async fn start_server(
    state: GatewayState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let addr = state.config.listen_addr();
    info!(
        upstream = %redact_sensitive_data(&state.config.upstream_base_url),
        origin = %state.config.allowed_origin,
        extract_enabled = state.config.enable_extract_route,
        "Gateway configured"
    );

    let app = build_router(state)?;

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Gateway HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")?;

    info!("Gateway stopped");
    Ok(())
}
