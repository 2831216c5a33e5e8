use std::error::Error as StdError;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use medrelay_core::{MeasurementRecord, PredictionResult, Predictor, RelayError};

/// Success body from the prediction service. A missing key reads as "".
#[derive(Debug, Default, Deserialize)]
struct UpstreamReply {
    #[serde(default)]
    prediction: String,
}

/// Relays records to `POST <base_url>/predict` on the remote ML service.
pub struct HttpPredictor {
    client: Client,
    endpoint: String,
}

impl HttpPredictor {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build prediction HTTP client")?;
        Ok(Self {
            client,
            endpoint: format!("{}/predict", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Predictor for HttpPredictor {
    fn name(&self) -> &str {
        "http"
    }

    async fn predict(&self, record: &MeasurementRecord) -> Result<PredictionResult, RelayError> {
        debug!(endpoint = %self.endpoint, "Sending record to prediction service");

        let response = self
            .client
            .post(&self.endpoint)
            .json(record)
            .send()
            .await
            .map_err(|e| RelayError::UpstreamUnreachable(error_chain(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            debug!(status = %status, body = %error_body, "Prediction service rejected request");
            return Err(RelayError::upstream_status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RelayError::UpstreamUnreachable(error_chain(&e)))?;

        let reply = serde_json::from_slice::<UpstreamReply>(&body).unwrap_or_else(|e| {
            warn!(error = %e, bytes = body.len(), "Prediction reply is not JSON; relaying empty label");
            UpstreamReply::default()
        });

        Ok(PredictionResult::new(reply.prediction))
    }
}

/// reqwest's top-level message hides the cause ("error sending request ...");
/// join the whole chain so "Connection refused" reaches the caller.
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    async fn spawn_upstream(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn record() -> MeasurementRecord {
        MeasurementRecord {
            pregnancies: 2,
            glucose: 148.0,
            blood_pressure: 72.0,
            bmi: 33.6,
            age: 50,
            ..Default::default()
        }
    }

    fn predictor(base_url: &str) -> HttpPredictor {
        HttpPredictor::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        assert_eq!(
            predictor("http://ml.local/").endpoint(),
            "http://ml.local/predict"
        );
        assert_eq!(predictor("http://ml.local").endpoint(), "http://ml.local/predict");
    }

    #[tokio::test]
    async fn forwards_record_and_returns_label() {
        let router = Router::new().route(
            "/predict",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["glucose"], json!(148.0));
                assert_eq!(body["bloodPressure"], json!(72.0));
                assert_eq!(body["pregnancies"], json!(2));
                assert_eq!(body["insulin"], json!(0.0));
                Json(json!({"prediction": "positive"}))
            }),
        );
        let base = spawn_upstream(router).await;

        let result = predictor(&base).predict(&record()).await.unwrap();
        assert_eq!(result, PredictionResult::new("positive"));
    }

    #[tokio::test]
    async fn non_success_status_is_upstream_error() {
        let router = Router::new().route(
            "/predict",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "warming up") }),
        );
        let base = spawn_upstream(router).await;

        let err = predictor(&base).predict(&record()).await.unwrap_err();
        assert!(matches!(err, RelayError::UpstreamError(_)));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn refused_connection_is_unreachable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = predictor(&format!("http://{addr}"))
            .predict(&record())
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::UpstreamUnreachable(_)));
        assert!(err.to_string().contains("Failed to connect"));
    }

    #[tokio::test]
    async fn reply_without_prediction_key_is_empty_label() {
        let router = Router::new().route(
            "/predict",
            post(|| async { Json(json!({"label": "x"})) }),
        );
        let base = spawn_upstream(router).await;

        let result = predictor(&base).predict(&record()).await.unwrap();
        assert_eq!(result, PredictionResult::new(""));
    }

    #[tokio::test]
    async fn plain_text_reply_is_empty_label() {
        let router = Router::new().route("/predict", post(|| async { "ok" }));
        let base = spawn_upstream(router).await;

        let result = predictor(&base).predict(&record()).await.unwrap();
        assert_eq!(result, PredictionResult::new(""));
    }
}
