use thiserror::Error;

/// Every failure a relay request can terminate with.
///
/// Each variant carries the full message that ends up in the
/// `{"error": ...}` body returned to the caller.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Failed to connect to ML server: {0}")]
    UpstreamUnreachable(String),

    #[error("{0}")]
    UpstreamError(String),

    #[error("{0}")]
    ServerConfiguration(String),

    #[error("OCR failed: {0}")]
    OcrExecution(String),

    #[error("Failed to read OCR output: {0}")]
    OcrOutputUnreadable(String),

    #[error("Failed to save image: {0}")]
    UploadUnwritable(String),

    #[error("Image too large: {0}")]
    UploadTooLarge(String),
}

impl RelayError {
    /// Upstream answered with a non-success status code.
    pub fn upstream_status(status: u16) -> Self {
        Self::UpstreamError(format!("ML server error: status {status}"))
    }

    /// Stable kind name, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::UpstreamUnreachable(_) => "upstream_unreachable",
            Self::UpstreamError(_) => "upstream_error",
            Self::ServerConfiguration(_) => "server_configuration",
            Self::OcrExecution(_) => "ocr_execution",
            Self::OcrOutputUnreadable(_) => "ocr_output_unreadable",
            Self::UploadUnwritable(_) => "upload_unwritable",
            Self::UploadTooLarge(_) => "upload_too_large",
        }
    }

    /// True when the caller sent something unusable; everything else is a server fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::BadRequest(_) | Self::UploadTooLarge(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_message_names_code() {
        let err = RelayError::upstream_status(503);
        assert_eq!(err.to_string(), "ML server error: status 503");
        assert_eq!(err.kind(), "upstream_error");
    }

    #[test]
    fn only_caller_mistakes_are_client_errors() {
        assert!(RelayError::BadRequest("x".into()).is_client_error());
        assert!(RelayError::UploadTooLarge("x".into()).is_client_error());
        assert!(!RelayError::OcrExecution("x".into()).is_client_error());
        assert!(!RelayError::UpstreamUnreachable("x".into()).is_client_error());
    }

    #[test]
    fn unreachable_message_mentions_connect() {
        let err = RelayError::UpstreamUnreachable("connection refused".into());
        assert!(err.to_string().contains("Failed to connect"));
        assert!(err.to_string().contains("connection refused"));
    }
}
