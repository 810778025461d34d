//! Boundary polygon construction and validation
//!
//! A polygon is an ordered `(lon, lat)` vertex ring, implicitly closed.
//! All invariants are enforced once at construction: at least three
//! vertices, finite coordinates, and a simple (non-self-intersecting)
//! ring. After construction the polygon is immutable, so the membership
//! engine can share it across worker threads without locking.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, VerifyError};

/// A point or vertex as `(lon, lat)` in decimal degrees
pub type LonLat = (f64, f64);

/// Configurable field names for vertex/point objects in boundary files.
///
/// Boundary files and point-batch files historically use different key
/// conventions (`lat`/`lng` vs `latitude`/`longitude`), so the two are
/// configured independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldKeys {
    /// Key holding the latitude value
    pub lat: String,
    /// Key holding the longitude value
    pub lon: String,
}

impl FieldKeys {
    /// Default key convention for boundary (polygon vertex) files
    pub fn boundary_default() -> Self {
        Self {
            lat: "lat".to_string(),
            lon: "lng".to_string(),
        }
    }

    /// Default key convention for point-batch files
    pub fn point_default() -> Self {
        Self {
            lat: "latitude".to_string(),
            lon: "longitude".to_string(),
        }
    }
}

/// An immutable, validated boundary ring
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<LonLat>,
}

impl Polygon {
    /// Construct a polygon from an ordered `(lon, lat)` vertex ring.
    ///
    /// The ring is implicitly closed; an explicit closing vertex equal to
    /// the first is dropped. Fails with [`VerifyError::InvalidPolygon`]
    /// when fewer than three distinct vertices remain, any coordinate is
    /// non-finite, consecutive vertices coincide, or the ring
    /// self-intersects.
    pub fn new(mut vertices: Vec<LonLat>) -> Result<Self> {
        if vertices.len() >= 2 && vertices.first() == vertices.last() {
            vertices.pop();
        }

        if vertices.len() < 3 {
            return Err(VerifyError::invalid_polygon(format!(
                "ring needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }

        for &(lon, lat) in &vertices {
            if !lon.is_finite() || !lat.is_finite() {
                return Err(VerifyError::invalid_polygon(format!(
                    "non-finite vertex ({lon}, {lat})"
                )));
            }
        }

        let n = vertices.len();
        for i in 0..n {
            if vertices[i] == vertices[(i + 1) % n] {
                return Err(VerifyError::invalid_polygon(format!(
                    "repeated consecutive vertex at index {i}"
                )));
            }
        }

        Self::check_simple(&vertices)?;

        Ok(Self { vertices })
    }

    /// The vertex ring, without the implicit closing vertex
    pub fn vertices(&self) -> &[LonLat] {
        &self.vertices
    }

    /// Edge count (equals vertex count for a closed ring)
    pub fn edge_count(&self) -> usize {
        self.vertices.len()
    }

    /// Load a polygon from a JSON array of vertex objects.
    ///
    /// Each element must expose latitude and longitude under the
    /// configured keys. Read or decode failures are
    /// [`VerifyError::InputReadError`]; an undersized or degenerate ring
    /// is [`VerifyError::InvalidPolygon`].
    pub fn from_json_file(path: &Path, keys: &FieldKeys) -> Result<Self> {
        let vertices = load_lon_lat_array(path, keys)?;
        Self::new(vertices)
    }

    // Every pair of non-adjacent edges must be fully disjoint; adjacent
    // edges share exactly their common endpoint (coincidence is already
    // ruled out above).
    fn check_simple(vertices: &[LonLat]) -> Result<()> {
        let n = vertices.len();
        for i in 0..n {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            for j in (i + 1)..n {
                // skip the two adjacent edges sharing a vertex with edge i
                if (j + 1) % n == i || (i + 1) % n == j {
                    continue;
                }
                let c = vertices[j];
                let d = vertices[(j + 1) % n];
                if segments_intersect(a, b, c, d) {
                    return Err(VerifyError::invalid_polygon(format!(
                        "self-intersecting ring: edge {i} crosses edge {j}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Load a JSON array of point objects as `(lon, lat)` pairs under the
/// configured keys, preserving array order.
pub fn load_points_from_json(path: &Path, keys: &FieldKeys) -> Result<Vec<LonLat>> {
    load_lon_lat_array(path, keys)
}

fn load_lon_lat_array(path: &Path, keys: &FieldKeys) -> Result<Vec<LonLat>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| VerifyError::input_read(path, "cannot read file", e))?;

    let items: Vec<serde_json::Value> = serde_json::from_str(&content)
        .map_err(|e| VerifyError::input_read(path, "not a JSON array", e))?;

    let mut pairs = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match lon_lat_of(item, keys) {
            Some(pair) => pairs.push(pair),
            None => {
                return Err(VerifyError::InputReadError {
                    path: path.to_path_buf(),
                    message: format!(
                        "element {i} is missing numeric '{}'/'{}' fields",
                        keys.lat, keys.lon
                    ),
                    source: None,
                })
            }
        }
    }
    Ok(pairs)
}

/// Read a `(lon, lat)` pair out of a JSON object under the given keys
pub(crate) fn lon_lat_of(item: &serde_json::Value, keys: &FieldKeys) -> Option<LonLat> {
    let lat = item.get(&keys.lat).and_then(serde_json::Value::as_f64)?;
    let lon = item.get(&keys.lon).and_then(serde_json::Value::as_f64)?;
    Some((lon, lat))
}

/// Signed area of the triangle `(p, q, r)`, doubled.
///
/// Positive for counter-clockwise turn, zero for collinear points.
pub(crate) fn orientation(p: LonLat, q: LonLat, r: LonLat) -> f64 {
    (q.0 - p.0) * (r.1 - p.1) - (q.1 - p.1) * (r.0 - p.0)
}

/// Whether `r` lies on the closed segment `[p, q]`
pub(crate) fn point_on_segment(p: LonLat, q: LonLat, r: LonLat) -> bool {
    orientation(p, q, r) == 0.0
        && r.0 >= p.0.min(q.0)
        && r.0 <= p.0.max(q.0)
        && r.1 >= p.1.min(q.1)
        && r.1 <= p.1.max(q.1)
}

/// Whether closed segments `[a, b]` and `[c, d]` share any point
pub(crate) fn segments_intersect(a: LonLat, b: LonLat, c: LonLat, d: LonLat) -> bool {
    let d1 = orientation(c, d, a);
    let d2 = orientation(c, d, b);
    let d3 = orientation(a, b, c);
    let d4 = orientation(a, b, d);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && point_on_segment(c, d, a))
        || (d2 == 0.0 && point_on_segment(c, d, b))
        || (d3 == 0.0 && point_on_segment(a, b, c))
        || (d4 == 0.0 && point_on_segment(a, b, d))
}
