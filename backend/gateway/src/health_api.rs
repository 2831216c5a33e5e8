//! Gateway Health API
//!
//! Local liveness only; never calls the prediction service.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::GatewayState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub extract_enabled: bool,
}

/// Handler for `GET /health`
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        service: "medrelay",
        version: env!("CARGO_PKG_VERSION"),
        extract_enabled: state.config.enable_extract_route,
    })
}
