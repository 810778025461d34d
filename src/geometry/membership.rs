//! Point-in-polygon membership engine
//!
//! Ray-casting classification with an explicit boundary class: a point on
//! a vertex or edge is neither interior nor exterior, so the two
//! membership modes can disagree on it and nothing else. The engine holds
//! only the immutable polygon and no per-call state; concurrent batch
//! calls are safe without locking.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::geometry::polygon::{load_points_from_json, point_on_segment, FieldKeys, LonLat, Polygon};

/// Whether boundary-exact points count as inside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipMode {
    /// Boundary points are members (the default)
    Inclusive,
    /// Boundary points are not members
    Exclusive,
}

impl Default for MembershipMode {
    fn default() -> Self {
        MembershipMode::Inclusive
    }
}

/// Exact classification of a point against the ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointLocation {
    Interior,
    Boundary,
    Exterior,
}

/// Immutable membership tester over a validated polygon
#[derive(Debug, Clone)]
pub struct MembershipEngine {
    polygon: Polygon,
}

impl MembershipEngine {
    /// Create an engine over a validated polygon
    pub fn new(polygon: Polygon) -> Self {
        Self { polygon }
    }

    /// The boundary ring this engine tests against
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// Classify one `(lon, lat)` point as interior, boundary, or exterior.
    ///
    /// O(edge count). Boundary detection is exact: the point must lie
    /// precisely on a vertex or edge segment.
    pub fn classify(&self, point: LonLat) -> PointLocation {
        let (x, y) = point;
        let vertices = self.polygon.vertices();
        let n = vertices.len();

        let mut inside = false;
        for i in 0..n {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];

            if point_on_segment(a, b, point) {
                return PointLocation::Boundary;
            }

            // Half-open crossing rule: each edge owns its lower endpoint,
            // so a ray through a vertex is counted exactly once.
            if (a.1 > y) != (b.1 > y) {
                let t = (y - a.1) / (b.1 - a.1);
                let crossing_x = a.0 + t * (b.0 - a.0);
                if x < crossing_x {
                    inside = !inside;
                }
            }
        }

        if inside {
            PointLocation::Interior
        } else {
            PointLocation::Exterior
        }
    }

    /// Whether one point is a member under the given mode
    pub fn contains(&self, point: LonLat, mode: MembershipMode) -> bool {
        match self.classify(point) {
            PointLocation::Interior => true,
            PointLocation::Exterior => false,
            PointLocation::Boundary => mode == MembershipMode::Inclusive,
        }
    }

    /// Batch membership test.
    ///
    /// Returns exactly one boolean per input point, positionally aligned
    /// with the input sequence.
    pub fn test_membership(&self, points: &[LonLat], mode: MembershipMode) -> Vec<bool> {
        points.iter().map(|&p| self.contains(p, mode)).collect()
    }
}

/// Test every point in a points file against a boundary file.
///
/// Loads the polygon and point batch under their (independently
/// configured) field keys and returns the ordered membership sequence.
pub fn verify_points_file(
    polygon_path: &Path,
    points_path: &Path,
    polygon_keys: &FieldKeys,
    point_keys: &FieldKeys,
    mode: MembershipMode,
) -> Result<Vec<bool>> {
    let polygon = Polygon::from_json_file(polygon_path, polygon_keys)?;
    let points = load_points_from_json(points_path, point_keys)?;
    Ok(MembershipEngine::new(polygon).test_membership(&points, mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rectangle_engine() -> MembershipEngine {
        let polygon =
            Polygon::new(vec![(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]).unwrap();
        MembershipEngine::new(polygon)
    }

    #[test]
    fn test_interior_point_true_in_both_modes() {
        let engine = rectangle_engine();
        assert!(engine.contains((5.0, 5.0), MembershipMode::Inclusive));
        assert!(engine.contains((5.0, 5.0), MembershipMode::Exclusive));
        assert_eq!(engine.classify((5.0, 5.0)), PointLocation::Interior);
    }

    #[test]
    fn test_boundary_point_depends_on_mode() {
        let engine = rectangle_engine();
        assert_eq!(engine.classify((0.0, 5.0)), PointLocation::Boundary);
        assert!(engine.contains((0.0, 5.0), MembershipMode::Inclusive));
        assert!(!engine.contains((0.0, 5.0), MembershipMode::Exclusive));
    }

    #[test]
    fn test_vertex_is_boundary() {
        let engine = rectangle_engine();
        assert_eq!(engine.classify((0.0, 0.0)), PointLocation::Boundary);
        assert_eq!(engine.classify((10.0, 10.0)), PointLocation::Boundary);
    }

    #[test]
    fn test_exterior_point_false_in_both_modes() {
        let engine = rectangle_engine();
        assert!(!engine.contains((20.0, 20.0), MembershipMode::Inclusive));
        assert!(!engine.contains((20.0, 20.0), MembershipMode::Exclusive));
        assert_eq!(engine.classify((20.0, 20.0)), PointLocation::Exterior);
    }

    #[test]
    fn test_exterior_point_level_with_an_edge() {
        // Same y as the bottom edge but outside: the ray along y=0 must
        // not produce spurious crossings.
        let engine = rectangle_engine();
        assert_eq!(engine.classify((-1.0, 0.0)), PointLocation::Exterior);
        assert_eq!(engine.classify((11.0, 0.0)), PointLocation::Exterior);
    }

    #[test]
    fn test_ray_through_vertex_counted_once() {
        // Diamond: a ray from an interior point level with a vertex passes
        // exactly through it.
        let polygon =
            Polygon::new(vec![(0.0, -5.0), (5.0, 0.0), (0.0, 5.0), (-5.0, 0.0)]).unwrap();
        let engine = MembershipEngine::new(polygon);
        assert_eq!(engine.classify((0.0, 0.0)), PointLocation::Interior);
        assert_eq!(engine.classify((-6.0, 0.0)), PointLocation::Exterior);
        assert_eq!(engine.classify((6.0, 0.0)), PointLocation::Exterior);
    }

    #[test]
    fn test_concave_polygon_notch() {
        // L-shape: the notch corner region is outside
        let polygon = Polygon::new(vec![
            (0.0, 0.0),
            (0.0, 10.0),
            (4.0, 10.0),
            (4.0, 4.0),
            (10.0, 4.0),
            (10.0, 0.0),
        ])
        .unwrap();
        let engine = MembershipEngine::new(polygon);
        assert_eq!(engine.classify((2.0, 2.0)), PointLocation::Interior);
        assert_eq!(engine.classify((8.0, 8.0)), PointLocation::Exterior);
        assert_eq!(engine.classify((4.0, 7.0)), PointLocation::Boundary);
    }

    #[test]
    fn test_batch_preserves_count_and_order() {
        let engine = rectangle_engine();
        let points = vec![(5.0, 5.0), (0.0, 5.0), (20.0, 20.0), (1.0, 1.0)];

        let inclusive = engine.test_membership(&points, MembershipMode::Inclusive);
        assert_eq!(inclusive, vec![true, true, false, true]);

        let exclusive = engine.test_membership(&points, MembershipMode::Exclusive);
        assert_eq!(exclusive, vec![true, false, false, true]);
    }

    #[test]
    fn test_empty_batch_yields_empty_result() {
        let engine = rectangle_engine();
        assert!(engine
            .test_membership(&[], MembershipMode::Inclusive)
            .is_empty());
    }
}
