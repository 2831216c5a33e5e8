//! Environment variable source.
//!
//! The three variables the hosted deployment already sets (`ML_URL`,
//! `FRONTEND_URL`, `PORT`) keep their bare names; everything else is
//! prefixed with `MEDRELAY_`. Empty values count as unset.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use crate::schema::ConfigOverlay;

pub const ENV_UPSTREAM_BASE_URL: &str = "ML_URL";
pub const ENV_ALLOWED_ORIGIN: &str = "FRONTEND_URL";
pub const ENV_LISTEN_PORT: &str = "PORT";
pub const ENV_BIND_ADDRESS: &str = "MEDRELAY_BIND";
pub const ENV_ENABLE_EXTRACT: &str = "MEDRELAY_ENABLE_EXTRACT";
pub const ENV_OCR_BINARY: &str = "MEDRELAY_OCR_BINARY";
pub const ENV_OCR_LANGUAGE: &str = "MEDRELAY_OCR_LANGUAGE";
pub const ENV_OCR_TIMEOUT_SECS: &str = "MEDRELAY_OCR_TIMEOUT_SECS";
pub const ENV_UPSTREAM_TIMEOUT_SECS: &str = "MEDRELAY_UPSTREAM_TIMEOUT_SECS";
pub const ENV_SCRATCH_DIR: &str = "MEDRELAY_SCRATCH_DIR";
pub const ENV_MAX_UPLOAD_BYTES: &str = "MEDRELAY_MAX_UPLOAD_BYTES";
pub const ENV_LOG_LEVEL: &str = "RUST_LOG";
pub const ENV_LOG_DIR: &str = "MEDRELAY_LOG_DIR";
/// Path of an optional YAML config file.
pub const ENV_CONFIG_FILE: &str = "MEDRELAY_CONFIG";

/// A variable was set but its value could not be used.
#[derive(Debug, thiserror::Error)]
#[error("Invalid value {value:?} for env var \"{var_name}\": {reason}")]
pub struct InvalidEnvVarError {
    pub var_name: String,
    pub value: String,
    pub reason: String,
}

/// Read the overlay from the process environment.
pub fn overlay_from_env() -> Result<ConfigOverlay, InvalidEnvVarError> {
    overlay_from_env_with(&std::env::vars().collect())
}

/// Read the overlay from a provided map (useful for testing).
pub fn overlay_from_env_with(
    env: &HashMap<String, String>,
) -> Result<ConfigOverlay, InvalidEnvVarError> {
    Ok(ConfigOverlay {
        upstream_base_url: string_var(env, ENV_UPSTREAM_BASE_URL),
        allowed_origin: string_var(env, ENV_ALLOWED_ORIGIN),
        bind_address: string_var(env, ENV_BIND_ADDRESS),
        listen_port: parsed_var(env, ENV_LISTEN_PORT)?,
        enable_extract_route: bool_var(env, ENV_ENABLE_EXTRACT)?,
        ocr_binary: string_var(env, ENV_OCR_BINARY),
        ocr_language: string_var(env, ENV_OCR_LANGUAGE),
        ocr_timeout_secs: parsed_var(env, ENV_OCR_TIMEOUT_SECS)?,
        upstream_timeout_secs: parsed_var(env, ENV_UPSTREAM_TIMEOUT_SECS)?,
        scratch_dir: string_var(env, ENV_SCRATCH_DIR).map(PathBuf::from),
        max_upload_bytes: parsed_var(env, ENV_MAX_UPLOAD_BYTES)?,
        log_level: string_var(env, ENV_LOG_LEVEL),
        log_dir: string_var(env, ENV_LOG_DIR).map(PathBuf::from),
    })
}

/// Config file path named by the environment, if any.
pub fn config_file_from_env() -> Option<PathBuf> {
    std::env::var(ENV_CONFIG_FILE)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

fn string_var(env: &HashMap<String, String>, name: &str) -> Option<String> {
    env.get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parsed_var<T>(env: &HashMap<String, String>, name: &str) -> Result<Option<T>, InvalidEnvVarError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = string_var(env, name) else {
        return Ok(None);
    };
    raw.parse::<T>().map(Some).map_err(|e| InvalidEnvVarError {
        var_name: name.to_string(),
        value: raw.clone(),
        reason: e.to_string(),
    })
}

fn bool_var(env: &HashMap<String, String>, name: &str) -> Result<Option<bool>, InvalidEnvVarError> {
    let Some(raw) = string_var(env, name) else {
        return Ok(None);
    };
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(InvalidEnvVarError {
            var_name: name.to_string(),
            value: raw,
            reason: "expected true/false".to_string(),
        }),
    }
}
