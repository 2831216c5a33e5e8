//! `medrelay-config`: runtime configuration for the medrelay gateway.
//!
//! Provides:
//! - Typed config schema and partial overlays
//! - Built-in defaults
//! - Environment variable source
//! - Optional YAML file source
//! - Validation with errors and warnings

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

pub use env::{config_file_from_env, overlay_from_env, overlay_from_env_with, InvalidEnvVarError};
pub use io::load_overlay;
pub use schema::{ConfigOverlay, RelayConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Context, Result};
use std::path::Path;

/// Layer the sources in priority order: defaults, file, environment, command line.
pub fn resolve(file: ConfigOverlay, env: ConfigOverlay, cli: ConfigOverlay) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.apply(file);
    config.apply(env);
    config.apply(cli);
    config
}

/// Load the file (if any) and environment, and layer the CLI overlay on top.
pub async fn load(file: Option<&Path>, cli: ConfigOverlay) -> Result<RelayConfig> {
    let file_overlay = match file {
        Some(path) => load_overlay(path).await?,
        None => ConfigOverlay::default(),
    };
    let env_overlay = overlay_from_env().context("Failed to read config from environment")?;

    Ok(resolve(file_overlay, env_overlay, cli))
}

/// Log every warning and error in the config; fail if there are errors.
pub fn ensure_valid(config: &RelayConfig) -> Result<()> {
    let report = validate(config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    if report.is_valid() {
        return Ok(());
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    bail!("{}", report.errors[0]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_sources_win() {
        let file = ConfigOverlay {
            upstream_base_url: Some("http://file:5000".into()),
            listen_port: Some(7000),
            ocr_language: Some("deu".into()),
            ..Default::default()
        };
        let env = ConfigOverlay {
            upstream_base_url: Some("http://env:5000".into()),
            listen_port: Some(7001),
            ..Default::default()
        };
        let cli = ConfigOverlay {
            listen_port: Some(7002),
            ..Default::default()
        };
        let cfg = resolve(file, env, cli);
        assert_eq!(cfg.upstream_base_url, "http://env:5000");
        assert_eq!(cfg.listen_port, 7002);
        assert_eq!(cfg.ocr_language, "deu");
    }

    #[test]
    fn ensure_valid_rejects_bad_config() {
        let cfg = RelayConfig {
            upstream_base_url: "smart-disease-ml.onrender.com".into(),
            ..Default::default()
        };
        let err = ensure_valid(&cfg).unwrap_err();
        assert!(err.to_string().contains("upstreamBaseUrl"));
        assert!(ensure_valid(&RelayConfig::default()).is_ok());
    }

    #[test]
    fn no_sources_gives_defaults() {
        let cfg = resolve(
            ConfigOverlay::default(),
            ConfigOverlay::default(),
            ConfigOverlay::default(),
        );
        assert_eq!(cfg, RelayConfig::default());
    }
}
