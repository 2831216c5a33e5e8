//! Built-in values used when no source sets an option.

/// Hosted prediction service.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://smart-disease-ml.onrender.com";

/// Hosted frontend allowed by CORS.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://smart-disease-predictor-509.web.app";

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

pub const DEFAULT_LISTEN_PORT: u16 = 8080;

pub const DEFAULT_OCR_BINARY: &str = "tesseract";

pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

/// Upper bound on a single OCR run.
pub const DEFAULT_OCR_TIMEOUT_SECS: u64 = 60;

/// Upper bound on a single call to the prediction service.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub const DEFAULT_LOG_LEVEL: &str = "info";
