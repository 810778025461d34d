//! Configuration structures for the geofence_verify pipeline.
//!
//! All tunable parameters live here: which concrete tag names carry the
//! two logical metadata fields, which JSON keys carry vertex and point
//! coordinates, the membership mode, and the scan extension set.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed
//! programmatically:
//!
//! ```no_run
//! use geofence_verify::PipelineConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = PipelineConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use defaults
//! let config = PipelineConfig::default();
//! # Ok::<(), geofence_verify::VerifyError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, VerifyError};
use crate::geometry::membership::MembershipMode;
use crate::geometry::polygon::FieldKeys;
use crate::metadata::tags::TagKeys;
use crate::scan::default_extensions;

/// Complete pipeline configuration.
///
/// Can be serialized to/from JSON for reproducible runs. The two
/// [`FieldKeys`] sections are intentionally independent: boundary files
/// and point-batch files use different key conventions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Concrete tag names for the logical metadata tags
    #[serde(default)]
    pub tag_keys: TagKeys,

    /// Field keys for boundary (polygon vertex) JSON files
    #[serde(default = "FieldKeys::boundary_default")]
    pub polygon_keys: FieldKeys,

    /// Field keys for point-batch JSON files
    #[serde(default = "FieldKeys::point_default")]
    pub point_keys: FieldKeys,

    /// Boundary membership mode for capture coordinates
    #[serde(default)]
    pub mode: MembershipMode,

    /// Lowercase media extensions included by the directory scan
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tag_keys: TagKeys::default(),
            polygon_keys: FieldKeys::boundary_default(),
            point_keys: FieldKeys::point_default(),
            mode: MembershipMode::default(),
            extensions: default_extensions(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| VerifyError::input_read(path, "cannot read config", e))?;
        serde_json::from_str(&content)
            .map_err(|e| VerifyError::input_read(path, "invalid config JSON", e))
    }

    /// Save configuration to a JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| VerifyError::output_write(path, "config serialization failed", e))?;
        std::fs::write(path, json)
            .map_err(|e| VerifyError::output_write(path, "cannot write config", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_key_conventions() {
        let config = PipelineConfig::default();
        assert_eq!(config.polygon_keys.lat, "lat");
        assert_eq!(config.polygon_keys.lon, "lng");
        assert_eq!(config.point_keys.lat, "latitude");
        assert_eq!(config.point_keys.lon, "longitude");
        assert_eq!(config.mode, MembershipMode::Inclusive);
        assert_eq!(config.extensions, vec!["mov".to_string()]);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = PipelineConfig::default();
        config.mode = MembershipMode::Exclusive;
        config.extensions = vec!["mov".to_string(), "mp4".to_string()];
        config.to_json_file(&path).unwrap();

        let loaded = PipelineConfig::from_json_file(&path).unwrap();
        assert_eq!(loaded.mode, MembershipMode::Exclusive);
        assert_eq!(loaded.extensions.len(), 2);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{"mode": "exclusive"}"#).unwrap();

        let config = PipelineConfig::from_json_file(&path).unwrap();
        assert_eq!(config.mode, MembershipMode::Exclusive);
        assert_eq!(config.polygon_keys.lon, "lng");
        assert_eq!(config.tag_keys.location, "comapplequicktimelocationiso6709");
    }

    #[test]
    fn test_missing_config_is_fatal() {
        let err = PipelineConfig::from_json_file(Path::new("no/such/config.json")).unwrap_err();
        assert!(err.is_fatal());
    }
}
