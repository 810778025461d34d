//! Logical tag accessor for per-asset metadata maps
//!
//! The metadata collaborator hands the pipeline a flat map of
//! container-specific tag names to string values. The pipeline only ever
//! consumes two logical tags; which concrete tag name carries each one is
//! configuration, not code. Lookup returns an explicit found/not-found
//! result instead of probing for attribute presence.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The logical tags the verification pipeline consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalTag {
    /// Composite ISO6709-style location string
    LocationIso6709,
    /// Capture creation timestamp string
    CreationTimestamp,
}

impl LogicalTag {
    /// Stable name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            LogicalTag::LocationIso6709 => "location",
            LogicalTag::CreationTimestamp => "creation_timestamp",
        }
    }
}

/// Concrete tag names carrying each logical tag.
///
/// Defaults follow the QuickTime container convention written by iPhones;
/// other containers (e.g. Matroska via ffprobe dumps) override these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagKeys {
    /// Tag name holding the composite location string
    pub location: String,
    /// Tag name holding the creation timestamp string
    pub creation_timestamp: String,
}

impl Default for TagKeys {
    fn default() -> Self {
        Self {
            location: "comapplequicktimelocationiso6709".to_string(),
            creation_timestamp: "comapplequicktimecreationdate".to_string(),
        }
    }
}

impl TagKeys {
    /// Tag names as written by ffprobe for Matroska/WebM containers
    pub fn matroska() -> Self {
        Self {
            location: "LOCATION".to_string(),
            creation_timestamp: "CREATION_DATE".to_string(),
        }
    }

    /// Resolve a logical tag to its configured concrete name
    pub fn concrete_name(&self, tag: LogicalTag) -> &str {
        match tag {
            LogicalTag::LocationIso6709 => &self.location,
            LogicalTag::CreationTimestamp => &self.creation_timestamp,
        }
    }
}

/// One asset's tag map, as supplied by the metadata collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagSet {
    #[serde(flatten)]
    tags: HashMap<String, String>,
}

impl TagSet {
    pub fn new(tags: HashMap<String, String>) -> Self {
        Self { tags }
    }

    /// Look up a logical tag under the configured concrete name.
    ///
    /// Returns `None` when the tag is absent; an absent tag is an ordinary
    /// outcome for assets without embedded metadata, not an error.
    pub fn lookup(&self, keys: &TagKeys, tag: LogicalTag) -> Option<&str> {
        self.tags.get(keys.concrete_name(tag)).map(String::as_str)
    }

    /// Number of raw tags in the map
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl FromIterator<(String, String)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().collect(),
        }
    }
}
