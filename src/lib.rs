//! # Geofence Verify
//!
//! A Rust crate for verifying where media assets were captured.
//!
//! This library extracts vendor-embedded geospatial metadata and tests it
//! against a user-defined geographic boundary by:
//! - Decoding composite ISO6709-style location strings into coordinates
//! - Normalizing capture timestamps with the colon-less offset convention
//! - Testing coordinates against a validated boundary polygon with
//!   explicit inclusive/exclusive boundary semantics
//! - Assembling one immutable record per asset, isolating per-asset
//!   failures as `Unknown` fields
//!
//! ## Example
//!
//! ```rust
//! use geofence_verify::{
//!     AssetInput, Field, MembershipMode, Polygon, TagKeys, VerificationPipeline,
//! };
//!
//! let polygon = Polygon::new(vec![(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)])?;
//! let pipeline = VerificationPipeline::new(polygon, TagKeys::default(), MembershipMode::Inclusive);
//!
//! let asset = AssetInput {
//!     filename: "clip.mov".to_string(),
//!     checksum: "9f86d081884c7d65".to_string(),
//!     tags: [(
//!         "comapplequicktimelocationiso6709".to_string(),
//!         "+5.0+5.0+100.0/".to_string(),
//!     )]
//!     .into_iter()
//!     .collect(),
//! };
//!
//! let records = pipeline.process(&[asset]);
//! assert_eq!(records[0].inside_polygon, Field::Known(true));
//! # Ok::<(), geofence_verify::VerifyError>(())
//! ```

pub mod checksum;
pub mod config;
pub mod error;
pub mod geometry;
pub mod metadata;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod scan;

pub use config::PipelineConfig;
pub use error::{Result, VerifyError};
pub use geometry::membership::{
    verify_points_file, MembershipEngine, MembershipMode, PointLocation,
};
pub use geometry::polygon::{load_points_from_json, FieldKeys, LonLat, Polygon};
pub use metadata::location::{parse_iso6709, parse_iso6709_strict};
pub use metadata::tags::{LogicalTag, TagKeys, TagSet};
pub use metadata::timestamp::{parse_timestamp, parse_timestamp_strict};
pub use pipeline::{AssetInput, VerificationPipeline};
pub use record::{AssetRecord, CaptureTimestamp, Coordinate, Field};
