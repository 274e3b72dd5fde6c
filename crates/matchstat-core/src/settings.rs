//! Engine settings and their on-disk formats.
//!
//! Settings may be written as RON, TOML, or JSON. The format is picked from
//! the file extension. Every field has a default, so an empty file (or a
//! partial one) is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::id::MAX_CATEGORY_COUNT;

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {source_name}: {detail}")]
    Parse { source_name: String, detail: String },

    /// A field holds a value the engine cannot run with.
    #[error("invalid setting '{field}': {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Settings
// ===========================================================================

/// Statistics engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsSettings {
    /// Master switch for recording. Lifecycle calls ignore it.
    pub statistics_enabled: bool,
    /// Minimum wall-clock gap between two throughput samples.
    pub rate_window_ms: u64,
    /// Multiplier from raw world distance to the displayed unit.
    pub distance_scale: f64,
    /// Category count used when the host cannot report one.
    pub fallback_category_count: usize,
}

impl Default for StatsSettings {
    fn default() -> Self {
        Self {
            statistics_enabled: true,
            rate_window_ms: 5_000,
            distance_scale: 0.001,
            fallback_category_count: 128,
        }
    }
}

impl StatsSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.rate_window_ms == 0 {
            return Err(SettingsError::Invalid {
                field: "rate_window_ms",
                reason: "must be greater than zero",
            });
        }
        if self.fallback_category_count == 0 {
            return Err(SettingsError::Invalid {
                field: "fallback_category_count",
                reason: "must be greater than zero",
            });
        }
        if self.fallback_category_count > MAX_CATEGORY_COUNT {
            return Err(SettingsError::Invalid {
                field: "fallback_category_count",
                reason: "exceeds the addressable category range",
            });
        }
        if !self.distance_scale.is_finite() || self.distance_scale <= 0.0 {
            return Err(SettingsError::Invalid {
                field: "distance_scale",
                reason: "must be a positive finite number",
            });
        }
        Ok(())
    }
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported settings file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, SettingsError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(SettingsError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// Loading
// ===========================================================================

/// Parse and validate settings from an in-memory string.
pub fn parse_settings(content: &str, format: Format) -> Result<StatsSettings, SettingsError> {
    parse_named(content, format, "<inline>")
}

/// Read, parse, and validate a settings file.
pub fn load_settings(path: &Path) -> Result<StatsSettings, SettingsError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    let settings = parse_named(&content, format, &path.display().to_string())?;
    tracing::debug!(path = %path.display(), ?settings, "loaded statistics settings");
    Ok(settings)
}

fn parse_named(
    content: &str,
    format: Format,
    source_name: &str,
) -> Result<StatsSettings, SettingsError> {
    let parse_err = |detail: String| SettingsError::Parse {
        source_name: source_name.to_string(),
        detail,
    };

    let settings: StatsSettings = match format {
        Format::Ron => ron::from_str(content).map_err(|e| parse_err(e.to_string()))?,
        Format::Json => serde_json::from_str(content).map_err(|e| parse_err(e.to_string()))?,
        Format::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string()))?,
    };
    settings.validate()?;
    Ok(settings)
}
