//! Error types for the geofence_verify library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for geofence_verify operations
pub type Result<T> = std::result::Result<T, VerifyError>;

/// Error taxonomy for metadata extraction and geofence verification
#[derive(Error, Debug)]
pub enum VerifyError {
    /// Boundary polygon failed construction-time validation
    #[error("Invalid polygon: {reason}")]
    InvalidPolygon { reason: String },

    /// An input source could not be read or decoded
    #[error("Failed to read input {}: {message}", path.display())]
    InputReadError {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Embedded location string did not match the composite format
    #[error("Malformed location string: {value:?}")]
    MalformedLocationString { value: String },

    /// Embedded creation timestamp could not be parsed after offset repair
    #[error("Malformed timestamp: {value:?}")]
    MalformedTimestamp { value: String },

    /// Output record set could not be written
    #[error("Failed to write output {}: {message}", path.display())]
    OutputWriteError {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl VerifyError {
    /// Create an input read error with context
    pub fn input_read<E>(path: impl Into<PathBuf>, message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::InputReadError {
            path: path.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an output write error with context
    pub fn output_write<E>(path: impl Into<PathBuf>, message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::OutputWriteError {
            path: path.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid polygon error
    pub fn invalid_polygon(reason: impl Into<String>) -> Self {
        Self::InvalidPolygon {
            reason: reason.into(),
        }
    }

    /// Whether this error must abort the run.
    ///
    /// Fatal errors surface before or instead of producing records; all
    /// other variants are recorded per asset and the batch continues with
    /// the affected fields set to `Unknown`.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            VerifyError::InvalidPolygon { .. }
                | VerifyError::InputReadError { .. }
                | VerifyError::OutputWriteError { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatality_classification() {
        assert!(VerifyError::invalid_polygon("too few vertices").is_fatal());
        assert!(VerifyError::InputReadError {
            path: PathBuf::from("boundary.json"),
            message: "no such file".into(),
            source: None,
        }
        .is_fatal());

        assert!(!VerifyError::MalformedLocationString {
            value: "+1.0".into()
        }
        .is_fatal());
        assert!(!VerifyError::MalformedTimestamp {
            value: "yesterday".into()
        }
        .is_fatal());
    }

    #[test]
    fn test_error_display_includes_context() {
        let err = VerifyError::invalid_polygon("self-intersecting ring");
        assert!(err.to_string().contains("self-intersecting ring"));

        let err = VerifyError::InputReadError {
            path: PathBuf::from("points.json"),
            message: "unexpected EOF".into(),
            source: None,
        };
        assert!(err.to_string().contains("points.json"));
    }
}
