//! Shared helpers for router tests.

use std::path::Path;
use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response};
use serde_json::Value;
use tower::ServiceExt;

use medrelay_config::RelayConfig;
use medrelay_core::{Predictor, TextExtractor};

use crate::server::{build_router, GatewayState};

pub const TEST_ORIGIN: &str = "http://frontend.test";

pub fn mock_state(
    predictor: Arc<dyn Predictor>,
    extractor: Arc<dyn TextExtractor>,
    extract_enabled: bool,
) -> GatewayState {
    mock_state_in(&std::env::temp_dir(), predictor, extractor, extract_enabled)
}

pub fn mock_state_in(
    scratch_dir: &Path,
    predictor: Arc<dyn Predictor>,
    extractor: Arc<dyn TextExtractor>,
    extract_enabled: bool,
) -> GatewayState {
    let config = RelayConfig {
        allowed_origin: TEST_ORIGIN.to_string(),
        enable_extract_route: extract_enabled,
        scratch_dir: scratch_dir.to_path_buf(),
        ..Default::default()
    };
    GatewayState::new(config, predictor, extractor)
}

pub async fn send(state: &GatewayState, request: Request<Body>) -> Response {
    build_router(state.clone())
        .unwrap()
        .oneshot(request)
        .await
        .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
