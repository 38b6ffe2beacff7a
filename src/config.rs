// config.rs - sync thresholds and pilot settings
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, PilotError};

pub const POSITION_EPSILON: f32 = 0.001;
pub const ROTATION_EPSILON_DEGREES: f32 = 0.1;
pub const DEFAULT_UNDO_LABEL: &str = "Camera Pilot Movement";

/// Change-detection thresholds for the per-frame copy
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncThresholds {
    /// World units the viewport must move before the target follows
    pub position_epsilon: f32,
    /// Degrees the viewport must turn before the target follows
    pub rotation_epsilon_degrees: f32,
}

impl Default for SyncThresholds {
    fn default() -> Self {
        Self {
            position_epsilon: POSITION_EPSILON,
            rotation_epsilon_degrees: ROTATION_EPSILON_DEGREES,
        }
    }
}

impl SyncThresholds {
    pub fn validate(&self) -> Result<(), PilotError> {
        let finite_non_negative = |v: f32| v.is_finite() && v >= 0.0;
        if !finite_non_negative(self.position_epsilon) {
            return Err(PilotError::Config(format!(
                "position_epsilon must be a finite non-negative number, got {}",
                self.position_epsilon
            )));
        }
        if !finite_non_negative(self.rotation_epsilon_degrees) {
            return Err(PilotError::Config(format!(
                "rotation_epsilon_degrees must be a finite non-negative number, got {}",
                self.rotation_epsilon_degrees
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PilotConfig {
    pub thresholds: SyncThresholds,
    /// Name attached to every undo entry the sync engine records
    pub undo_label: String,
    /// Location of the JSON store document, if any
    pub store_path: Option<PathBuf>,
}

impl Default for PilotConfig {
    fn default() -> Self {
        Self {
            thresholds: SyncThresholds::default(),
            undo_label: DEFAULT_UNDO_LABEL.to_string(),
            store_path: None,
        }
    }
}

impl PilotConfig {
    /// Load from a JSON file; missing fields fall back to defaults
    pub fn load(path: &Path) -> Result<Self, PilotError> {
        let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, PilotError> {
        let config: PilotConfig = serde_json::from_str(contents)?;
        config.thresholds.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = PilotConfig::default();
        assert_eq!(config.thresholds.position_epsilon, 0.001);
        assert_eq!(config.thresholds.rotation_epsilon_degrees, 0.1);
        assert_eq!(config.undo_label, "Camera Pilot Movement");
        assert!(config.store_path.is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            PilotConfig::from_json(r#"{ "thresholds": { "position_epsilon": 0.05 } }"#).unwrap();
        assert_eq!(config.thresholds.position_epsilon, 0.05);
        assert_eq!(config.thresholds.rotation_epsilon_degrees, 0.1);
        assert_eq!(config.undo_label, DEFAULT_UNDO_LABEL);
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let err =
            PilotConfig::from_json(r#"{ "thresholds": { "rotation_epsilon_degrees": -1.0 } }"#)
                .unwrap_err();
        assert!(matches!(err, PilotError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("pilot.json");
        std::fs::write(&path, r#"{ "undo_label": "Fly", "store_path": "prefs.json" }"#).unwrap();

        let config = PilotConfig::load(&path).unwrap();
        assert_eq!(config.undo_label, "Fly");
        assert_eq!(config.store_path, Some(PathBuf::from("prefs.json")));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = PilotConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, PilotError::Io { .. }));
    }
}
