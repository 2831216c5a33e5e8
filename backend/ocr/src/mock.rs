use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use medrelay_core::{RelayError, TextExtractor};

#[derive(Debug, Clone)]
enum Outcome {
    Text(String),
    NotInstalled,
    ExecutionFailed(String),
}

/// What the mock saw on one call.
#[derive(Debug, Clone)]
pub struct SeenImage {
    pub path: PathBuf,
    /// Upload bytes as they were on disk during the call.
    pub contents: Option<Vec<u8>>,
}

/// A text extractor that returns canned text and records the images it was given.
pub struct MockExtractor {
    outcome: Outcome,
    seen: Mutex<Vec<SeenImage>>,
}

impl MockExtractor {
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Text(text.into()))
    }

    /// Behaves like a host without the OCR engine installed.
    pub fn not_installed() -> Self {
        Self::with_outcome(Outcome::NotInstalled)
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::ExecutionFailed(reason.into()))
    }

    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<SeenImage> {
        self.seen.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TextExtractor for MockExtractor {
    fn name(&self) -> &str {
        "mock"
    }

    async fn extract(&self, image_path: &Path) -> Result<String, RelayError> {
        let contents = tokio::fs::read(image_path).await.ok();
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(SeenImage {
                path: image_path.to_path_buf(),
                contents,
            });
        }

        match &self.outcome {
            Outcome::Text(text) => Ok(text.clone()),
            Outcome::NotInstalled => Err(RelayError::ServerConfiguration(
                "OCR engine not installed or not in PATH: mock".to_string(),
            )),
            Outcome::ExecutionFailed(reason) => Err(RelayError::OcrExecution(reason.clone())),
        }
    }
}
