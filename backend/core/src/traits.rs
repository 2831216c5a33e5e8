use std::path::Path;

use async_trait::async_trait;

use crate::error::RelayError;
use crate::types::{MeasurementRecord, PredictionResult};

/// Anything that can turn a measurement record into a prediction label.
///
/// The production implementation calls the remote ML service over HTTP;
/// tests swap in a canned one.
#[async_trait]
pub trait Predictor: Send + Sync {
    /// Short name for logs (e.g., "http", "mock").
    fn name(&self) -> &str;

    async fn predict(&self, record: &MeasurementRecord) -> Result<PredictionResult, RelayError>;
}

/// Turns an image on disk into raw text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    fn name(&self) -> &str;

    /// Run recognition on `image_path` and return whatever text was found.
    /// An image with no legible text yields an empty string, not an error.
    async fn extract(&self, image_path: &Path) -> Result<String, RelayError>;
}
