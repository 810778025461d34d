//! Core data model: tri-state fields and per-asset output records
//!
//! Every field derived from vendor metadata is modeled as an explicit
//! tri-state [`Field`]: either a known concrete value or `Unknown`.
//! Downstream consumers must match the `Unknown` arm; there are no
//! sentinel numerics and no bare nulls threaded through the pipeline.

use chrono::{FixedOffset, NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A value that is either known or explicitly unknown.
///
/// Distinct from `Option`: `Unknown` means the source material did not
/// yield this field (absent tag, malformed string), not that the field
/// is optional in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field<T> {
    /// A successfully derived value
    Known(T),
    /// The field could not be derived from the asset's metadata
    #[default]
    Unknown,
}

impl<T> Field<T> {
    /// True if the field holds a known value
    pub fn is_known(&self) -> bool {
        matches!(self, Field::Known(_))
    }

    /// Borrow the known value, if any
    pub fn as_known(&self) -> Option<&T> {
        match self {
            Field::Known(v) => Some(v),
            Field::Unknown => None,
        }
    }

    /// Convert into an `Option`, discarding the tri-state distinction
    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Known(v) => Some(v),
            Field::Unknown => None,
        }
    }

    /// Map the known value, preserving `Unknown`
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Field<U> {
        match self {
            Field::Known(v) => Field::Known(f(v)),
            Field::Unknown => Field::Unknown,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => Field::Known(v),
            None => Field::Unknown,
        }
    }
}

// On the wire a Field is the value or null, like every optional field in
// the boundary/point JSON files. The tri-state stays an in-code contract.
impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Known(v) => serializer.serialize_some(v),
            Field::Unknown => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Field::from)
    }
}

/// A capture coordinate in decimal degrees (WGS84 lon/lat, flat model).
///
/// Latitude and longitude are required together; altitude is optional
/// because some location strings legitimately omit it even when present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in decimal degrees, positive north
    pub latitude: f64,
    /// Longitude in decimal degrees, positive east
    pub longitude: f64,
    /// Altitude in meters, if the source string carried one
    pub altitude: Option<f64>,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64, altitude: Option<f64>) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    /// The `(lon, lat)` pair used for membership testing
    pub fn lon_lat(&self) -> (f64, f64) {
        (self.longitude, self.latitude)
    }
}

/// Capture timestamp split into calendar date and time-of-day.
///
/// The offset is the one the device wrote (after repair of the colon-less
/// form); it is retained as data and is NOT applied to shift date or time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureTimestamp {
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Informational timezone offset from the source string
    pub offset: FixedOffset,
}

/// One fully assembled verification record for a media asset.
///
/// Created exactly once per processed asset and never mutated afterwards.
/// Downstream filtering selects records with `inside_polygon == Known(true)`.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRecord {
    /// Asset path or name as supplied by the caller
    pub filename: String,
    /// Hex-encoded content digest, treated as an opaque identity field
    pub checksum: String,
    /// Capture coordinate parsed from the embedded location string
    pub coordinate: Field<Coordinate>,
    /// Capture timestamp parsed from the embedded creation-date string
    pub timestamp: Field<CaptureTimestamp>,
    /// Geofence membership of the capture coordinate
    pub inside_polygon: Field<bool>,
}
