//! Optional YAML config file.

use crate::schema::ConfigOverlay;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

/// Load and parse an overlay from disk.
///
/// Returns an empty overlay if the file doesn't exist.
pub async fn load_overlay(path: &Path) -> Result<ConfigOverlay> {
    if !path.exists() {
        warn!(path = %path.display(), "Config file does not exist; ignoring");
        return Ok(ConfigOverlay::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    if raw.trim().is_empty() {
        return Ok(ConfigOverlay::default());
    }

    let overlay: ConfigOverlay = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config file");
    Ok(overlay)
}
