//! Boundary polygon and membership testing module
//!
//! This module holds the geofence geometry: the validated boundary ring
//! and the point-in-polygon engine with explicit boundary semantics.

pub mod membership;
pub mod polygon;

pub use membership::{MembershipEngine, MembershipMode, PointLocation};
pub use polygon::{FieldKeys, Polygon};
