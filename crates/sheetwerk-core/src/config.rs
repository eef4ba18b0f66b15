// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SheetwerkError;

/// Persistent application settings.
///
/// Only presentation and output tunables live here. The snapping thresholds
/// are fixed constants in `sheetwerk-document`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Longest side of a rectified raster, in pixels.
    pub max_output_dimension: u32,
    /// Whether dragged corners snap to detected features.
    pub snapping_enabled: bool,
    /// Distance between the pointer and the magnifier centre (screen px).
    pub magnifier_offset: f64,
    /// Diameter of the magnifier (screen px).
    pub magnifier_size: f64,
    /// How close a pointer-down must land to a corner handle (screen px).
    pub handle_hit_radius: f64,
    /// Lower bound for pinch zoom.
    pub min_zoom: f64,
    /// Upper bound for pinch zoom.
    pub max_zoom: f64,
    /// Window radius for the guide-angle probe after each move (image px).
    pub guide_radius: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_output_dimension: 1920,
            snapping_enabled: true,
            magnifier_offset: 100.0,
            magnifier_size: 120.0,
            handle_hit_radius: 30.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
            guide_radius: 10,
        }
    }
}

impl AppConfig {
    /// Read a JSON config file. Missing keys take their default values.
    ///
    /// The loaded values are validated; see [`AppConfig::validate`].
    pub fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the zoom bounds: both finite and `0 < min_zoom <= max_zoom`.
    pub fn validate(&self) -> crate::Result<()> {
        let (min, max) = (self.min_zoom, self.max_zoom);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(SheetwerkError::InvalidZoomRange { min, max });
        }
        Ok(())
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> crate::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"snapping_enabled": false}"#).unwrap();
        assert!(!config.snapping_enabled);
        assert_eq!(config.max_output_dimension, 1920);
        assert_eq!(config.guide_radius, 10);
    }

    #[test]
    fn default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn load_rejects_inverted_or_nan_zoom_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        std::fs::write(&path, r#"{"min_zoom": 5.0, "max_zoom": 1.0}"#).unwrap();
        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, SheetwerkError::InvalidZoomRange { min, max } if min == 5.0 && max == 1.0));

        std::fs::write(&path, r#"{"min_zoom": 0.0}"#).unwrap();
        assert!(AppConfig::load(&path).is_err());

        let nan = AppConfig {
            max_zoom: f64::NAN,
            ..AppConfig::default()
        };
        assert!(matches!(nan.validate(), Err(SheetwerkError::InvalidZoomRange { .. })));
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = AppConfig {
            snapping_enabled: false,
            max_zoom: 4.0,
            ..AppConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(AppConfig::load(&path).unwrap(), config);
    }
}
