//! medrelay runtime configuration schema.
//!
//! `RelayConfig` is the resolved form handed to the gateway. `ConfigOverlay`
//! is the partial form produced by each source (YAML file, environment,
//! command line) and layered on top of the defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::defaults;

/// Fully resolved configuration. Built once at start-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayConfig {
    /// Base URL of the remote prediction service (without `/predict`).
    pub upstream_base_url: String,
    /// Origin echoed in `Access-Control-Allow-Origin`.
    pub allowed_origin: String,
    pub bind_address: String,
    pub listen_port: u16,
    /// Expose `POST /extract`.
    pub enable_extract_route: bool,
    /// OCR executable name (looked up on `PATH`) or path.
    pub ocr_binary: String,
    pub ocr_language: String,
    pub ocr_timeout_secs: u64,
    pub upstream_timeout_secs: u64,
    /// Where per-request scratch files are written.
    pub scratch_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub log_level: String,
    /// When set, JSON logs are also written here with daily rotation.
    pub log_dir: Option<PathBuf>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            upstream_base_url: defaults::DEFAULT_UPSTREAM_BASE_URL.to_string(),
            allowed_origin: defaults::DEFAULT_ALLOWED_ORIGIN.to_string(),
            bind_address: defaults::DEFAULT_BIND_ADDRESS.to_string(),
            listen_port: defaults::DEFAULT_LISTEN_PORT,
            enable_extract_route: false,
            ocr_binary: defaults::DEFAULT_OCR_BINARY.to_string(),
            ocr_language: defaults::DEFAULT_OCR_LANGUAGE.to_string(),
            ocr_timeout_secs: defaults::DEFAULT_OCR_TIMEOUT_SECS,
            upstream_timeout_secs: defaults::DEFAULT_UPSTREAM_TIMEOUT_SECS,
            scratch_dir: std::env::temp_dir(),
            max_upload_bytes: defaults::DEFAULT_MAX_UPLOAD_BYTES,
            log_level: defaults::DEFAULT_LOG_LEVEL.to_string(),
            log_dir: None,
        }
    }
}

impl RelayConfig {
    /// `host:port` the listener binds to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.listen_port)
    }

    /// Layer `overlay` on top of this config; fields left `None` keep their value.
    pub fn apply(&mut self, overlay: ConfigOverlay) {
        let ConfigOverlay {
            upstream_base_url,
            allowed_origin,
            bind_address,
            listen_port,
            enable_extract_route,
            ocr_binary,
            ocr_language,
            ocr_timeout_secs,
            upstream_timeout_secs,
            scratch_dir,
            max_upload_bytes,
            log_level,
            log_dir,
        } = overlay;

        if let Some(v) = upstream_base_url {
            self.upstream_base_url = v;
        }
        if let Some(v) = allowed_origin {
            self.allowed_origin = v;
        }
        if let Some(v) = bind_address {
            self.bind_address = v;
        }
        if let Some(v) = listen_port {
            self.listen_port = v;
        }
        if let Some(v) = enable_extract_route {
            self.enable_extract_route = v;
        }
        if let Some(v) = ocr_binary {
            self.ocr_binary = v;
        }
        if let Some(v) = ocr_language {
            self.ocr_language = v;
        }
        if let Some(v) = ocr_timeout_secs {
            self.ocr_timeout_secs = v;
        }
        if let Some(v) = upstream_timeout_secs {
            self.upstream_timeout_secs = v;
        }
        if let Some(v) = scratch_dir {
            self.scratch_dir = v;
        }
        if let Some(v) = max_upload_bytes {
            self.max_upload_bytes = v;
        }
        if let Some(v) = log_level {
            self.log_level = v;
        }
        if log_dir.is_some() {
            self.log_dir = log_dir;
        }
    }
}

/// A partial configuration from one source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigOverlay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listen_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_extract_route: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_binary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scratch_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_upload_bytes: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}
