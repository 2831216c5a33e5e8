//! Tesseract subprocess bridge.
//!
//! Runs `<binary> <image> <output-base> -l <language>` and reads the
//! `<output-base>.txt` file the engine writes.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use medrelay_core::{RelayError, TextExtractor};

use crate::lookup::find_executable;
use crate::scratch::ScratchFile;

/// Longest slice of engine stderr carried into an error message.
const MAX_STDERR_CHARS: usize = 400;

pub struct TesseractExtractor {
    binary: String,
    language: String,
    timeout: Duration,
    scratch_dir: PathBuf,
}

impl TesseractExtractor {
    pub fn new(binary: impl Into<String>, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            language: "eng".to_string(),
            timeout: Duration::from_secs(60),
            scratch_dir: scratch_dir.into(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Path of the engine if it can be found, without running it.
    pub fn resolve(&self) -> Result<PathBuf, RelayError> {
        find_executable(&self.binary).ok_or_else(|| {
            RelayError::ServerConfiguration(format!(
                "OCR engine not installed or not in PATH: {} not found",
                self.binary
            ))
        })
    }
}

#[async_trait]
impl TextExtractor for TesseractExtractor {
    fn name(&self) -> &str {
        "tesseract"
    }

    async fn extract(&self, image_path: &Path) -> Result<String, RelayError> {
        let engine = self.resolve()?;

        let output = ScratchFile::reserve(&self.scratch_dir, "ocr", ".txt");
        let output_base = output.path().with_extension("");

        info!(image = %image_path.display(), engine = %engine.display(), "Running OCR");

        let run = Command::new(&engine)
            .arg(image_path)
            .arg(&output_base)
            .arg("-l")
            .arg(&self.language)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let result = match tokio::time::timeout(self.timeout, run).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => return Err(RelayError::OcrExecution(e.to_string())),
            Err(_) => {
                warn!(timeout = ?self.timeout, "OCR engine timed out; killed");
                return Err(RelayError::OcrExecution(format!(
                    "timed out after {:?}",
                    self.timeout
                )));
            }
        };

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let stderr: String = stderr.trim().chars().take(MAX_STDERR_CHARS).collect();
            return Err(RelayError::OcrExecution(if stderr.is_empty() {
                result.status.to_string()
            } else {
                format!("{}: {stderr}", result.status)
            }));
        }

        let raw = tokio::fs::read(output.path())
            .await
            .map_err(|e| RelayError::OcrOutputUnreadable(e.to_string()))?;
        let text = String::from_utf8_lossy(&raw).into_owned();

        debug!(chars = text.len(), "OCR produced text");
        Ok(text)
    }
}
