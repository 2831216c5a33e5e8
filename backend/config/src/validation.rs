//! Config validation: checks with user-friendly error messages.

use crate::schema::RelayConfig;
use thiserror::Error;

/// One finding: the camelCase key it concerns and what is wrong with it.
#[derive(Debug, Error)]
#[error("Invalid config key '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// Every problem found in one pass. Only `errors` block startup.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: &str, message: impl Into<String>) {
        self.errors.push(finding(path, message));
    }

    fn warn(&mut self, path: &str, message: impl Into<String>) {
        self.warnings.push(finding(path, message));
    }
}

fn finding(path: &str, message: impl Into<String>) -> ConfigValidationError {
    ConfigValidationError {
        path: path.to_string(),
        message: message.into(),
    }
}

/// Check a resolved config without touching the network or filesystem.
pub fn validate(config: &RelayConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_upstream(config, &mut report);
    validate_server(config, &mut report);
    validate_ocr(config, &mut report);
    report
}

fn validate_upstream(config: &RelayConfig, report: &mut ValidationReport) {
    let url = config.upstream_base_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        report.error("upstreamBaseUrl", "Must start with http:// or https://");
    } else if url.starts_with("http://") && !is_local(url) {
        report.warn(
            "upstreamBaseUrl",
            "Plain http to a non-local host; measurements travel unencrypted",
        );
    }
    if config.upstream_timeout_secs == 0 {
        report.error("upstreamTimeoutSecs", "Timeout must be greater than zero");
    }
}

fn validate_server(config: &RelayConfig, report: &mut ValidationReport) {
    if config.listen_port == 0 {
        report.error("listenPort", "Port cannot be 0");
    }
    if config.bind_address.trim().is_empty() {
        report.error("bindAddress", "Bind address cannot be empty");
    }
    if config.allowed_origin.trim().is_empty() {
        report.error("allowedOrigin", "Allowed origin cannot be empty");
    } else if config.allowed_origin.trim() == "*" {
        report.warn("allowedOrigin", "Wildcard origin allows any site to call the relay");
    }
    if config.max_upload_bytes == 0 {
        report.error("maxUploadBytes", "Upload limit must be greater than zero");
    }
}

fn validate_ocr(config: &RelayConfig, report: &mut ValidationReport) {
    if config.ocr_binary.trim().is_empty() {
        report.error("ocrBinary", "OCR binary cannot be empty");
    }
    if config.ocr_language.trim().is_empty() {
        report.error("ocrLanguage", "OCR language cannot be empty");
    }
    if config.ocr_timeout_secs == 0 {
        report.error("ocrTimeoutSecs", "Timeout must be greater than zero");
    }
}

fn is_local(url: &str) -> bool {
    let rest = url.trim_start_matches("http://");
    if rest.starts_with("[::1]") {
        return true;
    }
    let host = rest.split(['/', ':']).next().unwrap_or_default();
    host == "localhost" || host == "0.0.0.0" || host.starts_with("127.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let report = validate(&RelayConfig::default());
        assert!(report.is_valid(), "errors: {:?}", report.errors);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn non_http_upstream_is_error() {
        let cfg = RelayConfig {
            upstream_base_url: "ftp://models.internal".into(),
            ..Default::default()
        };
        let report = validate(&cfg);
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].path, "upstreamBaseUrl");
    }

    #[test]
    fn plain_http_remote_warns_but_local_does_not() {
        let remote = RelayConfig {
            upstream_base_url: "http://ml.example.com".into(),
            ..Default::default()
        };
        let report = validate(&remote);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);

        let local = RelayConfig {
            upstream_base_url: "http://127.0.0.1:5000".into(),
            ..Default::default()
        };
        assert!(validate(&local).warnings.is_empty());
    }

    #[test]
    fn zero_values_are_errors() {
        let cfg = RelayConfig {
            listen_port: 0,
            ocr_timeout_secs: 0,
            upstream_timeout_secs: 0,
            max_upload_bytes: 0,
            ..Default::default()
        };
        let report = validate(&cfg);
        let paths: Vec<_> = report.errors.iter().map(|e| e.path.as_str()).collect();
        assert!(paths.contains(&"listenPort"));
        assert!(paths.contains(&"ocrTimeoutSecs"));
        assert!(paths.contains(&"upstreamTimeoutSecs"));
        assert!(paths.contains(&"maxUploadBytes"));
    }
}
