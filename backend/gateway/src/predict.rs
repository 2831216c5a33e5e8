//! Prediction relay (`POST /predict`).

use std::time::Instant;

use axum::{body::Bytes, extract::State, Json};
use tracing::debug;
use uuid::Uuid;

use medrelay_core::{MeasurementRecord, PredictionResult, RelayError};
use medrelay_logging::{EventLogger, RelayEvent};

use crate::error::ApiError;
use crate::server::GatewayState;

const ROUTE: &str = "/predict";

/// Handler for `POST /predict`.
///
/// The body is decoded as JSON whatever its `Content-Type`, forwarded to the
/// configured predictor, and the label is returned as `{"prediction": ...}`.
pub async fn predict(
    State(state): State<GatewayState>,
    body: Bytes,
) -> Result<Json<PredictionResult>, ApiError> {
    let request_id = Uuid::new_v4().to_string();
    let start = Instant::now();

    let record: MeasurementRecord = serde_json::from_slice(&body)
        .map_err(|e| ApiError::logged(ROUTE, &request_id, RelayError::BadRequest(e.to_string())))?;

    debug!(request_id = %request_id, predictor = state.predictor.name(), "Relaying prediction");

    let result = state
        .predictor
        .predict(&record)
        .await
        .map_err(|e| ApiError::logged(ROUTE, &request_id, e))?;

    EventLogger::log_event(
        &request_id,
        RelayEvent::PredictionRelayed {
            predictor: state.predictor.name().to_string(),
            label: result.prediction.clone(),
            latency_ms: start.elapsed().as_millis() as u64,
        },
    );

    Ok(Json(result))
}
