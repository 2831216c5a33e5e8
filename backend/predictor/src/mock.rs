use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use medrelay_core::{MeasurementRecord, PredictionResult, Predictor, RelayError};

#[derive(Debug, Clone)]
enum Outcome {
    Label(String),
    Unreachable(String),
    Status(u16),
}

/// A predictor that returns a canned outcome and counts its calls.
pub struct MockPredictor {
    outcome: Outcome,
    calls: AtomicUsize,
}

impl MockPredictor {
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Label(label.into()))
    }

    /// Fails every call as if the service could not be reached.
    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Unreachable(reason.into()))
    }

    /// Fails every call as if the service answered with `status`.
    pub fn status(status: u16) -> Self {
        Self::with_outcome(Outcome::Status(status))
    }

    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Predictor for MockPredictor {
    fn name(&self) -> &str {
        "mock"
    }

    async fn predict(&self, _record: &MeasurementRecord) -> Result<PredictionResult, RelayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Outcome::Label(label) => Ok(PredictionResult::new(label.clone())),
            Outcome::Unreachable(reason) => Err(RelayError::UpstreamUnreachable(reason.clone())),
            Outcome::Status(status) => Err(RelayError::upstream_status(*status)),
        }
    }
}
