//! Per-asset verification pipeline
//!
//! Drives each asset through the extraction stages: look up the embedded
//! location and timestamp tags, parse both, test the coordinate against
//! the boundary, and assemble the output record. Every stage failure
//! collapses into `Unknown` fields on that asset's record; one asset can
//! never halt the batch.
//!
//! The batch runs on a rayon worker pool. Results are collected in input
//! order, so the association between record and source asset is stable no
//! matter how the pool schedules the work.

use rayon::prelude::*;

use crate::config::PipelineConfig;
use crate::geometry::membership::{MembershipEngine, MembershipMode};
use crate::geometry::polygon::Polygon;
use crate::metadata::location::parse_iso6709;
use crate::metadata::tags::{LogicalTag, TagKeys, TagSet};
use crate::metadata::timestamp::parse_timestamp;
use crate::record::{AssetRecord, CaptureTimestamp, Coordinate, Field};

/// Raw per-asset input, as supplied by the external collaborators
#[derive(Debug, Clone, PartialEq)]
pub struct AssetInput {
    /// Asset path or name; carried through to the record verbatim
    pub filename: String,
    /// Hex-encoded content digest from the checksum collaborator
    pub checksum: String,
    /// Tag map from the metadata collaborator
    pub tags: TagSet,
}

/// Orchestrates extraction and membership testing over asset batches.
///
/// Holds only immutable state (the engine's polygon and the configured
/// keys), so a single pipeline value serves all worker threads.
pub struct VerificationPipeline {
    engine: MembershipEngine,
    tag_keys: TagKeys,
    mode: MembershipMode,
}

impl VerificationPipeline {
    /// Create a pipeline over a validated boundary polygon
    pub fn new(polygon: Polygon, tag_keys: TagKeys, mode: MembershipMode) -> Self {
        Self {
            engine: MembershipEngine::new(polygon),
            tag_keys,
            mode,
        }
    }

    /// Create a pipeline using the tag keys and mode from a config
    pub fn from_config(polygon: Polygon, config: &PipelineConfig) -> Self {
        Self::new(polygon, config.tag_keys.clone(), config.mode)
    }

    /// The membership engine backing this pipeline
    pub fn engine(&self) -> &MembershipEngine {
        &self.engine
    }

    /// Process one asset to completion.
    ///
    /// Public so callers that need early cancellation can drive assets one
    /// at a time; records already assembled stay valid when a run stops.
    pub fn process_one(&self, asset: &AssetInput) -> AssetRecord {
        let coordinate = self.extract_coordinate(asset);
        let timestamp = self.extract_timestamp(asset);

        let inside_polygon = match &coordinate {
            Field::Known(coord) => Field::Known(self.engine.contains(coord.lon_lat(), self.mode)),
            Field::Unknown => Field::Unknown,
        };

        AssetRecord {
            filename: asset.filename.clone(),
            checksum: asset.checksum.clone(),
            coordinate,
            timestamp,
            inside_polygon,
        }
    }

    /// Process a batch of assets in parallel.
    ///
    /// Returns one record per input asset, in input order, regardless of
    /// worker scheduling.
    pub fn process(&self, assets: &[AssetInput]) -> Vec<AssetRecord> {
        assets.par_iter().map(|a| self.process_one(a)).collect()
    }

    fn extract_coordinate(&self, asset: &AssetInput) -> Field<Coordinate> {
        let raw = asset.tags.lookup(&self.tag_keys, LogicalTag::LocationIso6709);
        let coordinate = parse_iso6709(raw);

        match (raw, &coordinate) {
            (Some(value), Field::Unknown) => {
                log::warn!("{}: malformed location string {value:?}", asset.filename);
            }
            (None, _) => {
                log::debug!("{}: no location tag", asset.filename);
            }
            _ => {}
        }
        coordinate
    }

    fn extract_timestamp(&self, asset: &AssetInput) -> Field<CaptureTimestamp> {
        let raw = asset.tags.lookup(&self.tag_keys, LogicalTag::CreationTimestamp);
        let timestamp = parse_timestamp(raw);

        match (raw, &timestamp) {
            (Some(value), Field::Unknown) => {
                log::warn!("{}: malformed timestamp {value:?}", asset.filename);
            }
            (None, _) => {
                log::debug!("{}: no creation timestamp tag", asset.filename);
            }
            _ => {}
        }
        timestamp
    }
}
