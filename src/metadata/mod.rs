//! Vendor metadata extraction module
//!
//! This module handles interpretation of vendor-embedded metadata strings:
//! composite ISO6709-style location strings, capture timestamps with the
//! colon-less offset convention, and the logical tag accessor that maps
//! container-specific tag names onto the two fields the pipeline consumes.

pub mod location;
pub mod tags;
pub mod timestamp;

pub use location::{parse_iso6709, parse_iso6709_strict};
pub use tags::{LogicalTag, TagKeys, TagSet};
pub use timestamp::{parse_timestamp, parse_timestamp_strict};
