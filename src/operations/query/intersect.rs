use crate::error::Result;
use crate::math::distance_2d::segment_to_segment_dist;
use crate::tessellation::TessellationParams;
use crate::topology::{TopologyStore, WireId};

use super::{Aabb, WirePoints};

/// Tests whether two wires touch or cross in the XY plane.
///
/// Shared points, crossings and collinear overlap all count. Curved edges
/// are compared through their tessellation.
pub struct WireWireIntersect {
    wire_a: WireId,
    wire_b: WireId,
    tolerance: f64,
    params: TessellationParams,
}

impl WireWireIntersect {
    /// Creates a new `WireWireIntersect` query.
    #[must_use]
    pub fn new(wire_a: WireId, wire_b: WireId, tolerance: f64) -> Self {
        Self {
            wire_a,
            wire_b,
            tolerance,
            params: TessellationParams::default(),
        }
    }

    /// Overrides the tessellation used for curved edges.
    #[must_use]
    pub fn with_params(mut self, params: TessellationParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if either wire is missing.
    pub fn execute(&self, store: &TopologyStore) -> Result<bool> {
        if self.wire_a == self.wire_b {
            return Ok(true);
        }
        let a = WirePoints::new(self.wire_a, self.params).execute(store)?;
        let b = WirePoints::new(self.wire_b, self.params).execute(store)?;

        let (Some(box_a), Some(box_b)) = (Aabb::from_points(&a), Aabb::from_points(&b)) else {
            return Ok(false);
        };
        if !box_a.overlaps_2d(&box_b, self.tolerance) {
            return Ok(false);
        }

        let hit = a.windows(2).any(|sa| {
            b.windows(2)
                .any(|sb| segment_to_segment_dist(&sa[0], &sa[1], &sb[0], &sb[1]) <= self.tolerance)
        });
        Ok(hit)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, POINT_TOLERANCE};
    use crate::operations::creation::MakeWire;

    fn polyline(store: &mut TopologyStore, pts: &[(f64, f64)], close: bool) -> WireId {
        let points = pts.iter().map(|&(x, y)| Point3::new(x, y, 0.0)).collect();
        MakeWire::new(points, close).execute(store).unwrap()
    }

    #[test]
    fn crossing_lines_intersect() {
        let mut store = TopologyStore::new();
        let a = polyline(&mut store, &[(0.0, 0.0), (2.0, 2.0)], false);
        let b = polyline(&mut store, &[(0.0, 2.0), (2.0, 0.0)], false);
        assert!(WireWireIntersect::new(a, b, POINT_TOLERANCE)
            .execute(&store)
            .unwrap());
    }

    #[test]
    fn touching_endpoints_intersect() {
        let mut store = TopologyStore::new();
        let a = polyline(&mut store, &[(0.0, 0.0), (1.0, 0.0)], false);
        let b = polyline(&mut store, &[(1.0, 0.0), (1.0, 1.0)], false);
        assert!(WireWireIntersect::new(a, b, POINT_TOLERANCE)
            .execute(&store)
            .unwrap());
    }

    #[test]
    fn nested_squares_do_not_intersect() {
        let mut store = TopologyStore::new();
        let outer = polyline(
            &mut store,
            &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)],
            true,
        );
        let inner = polyline(
            &mut store,
            &[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)],
            true,
        );
        assert!(!WireWireIntersect::new(outer, inner, POINT_TOLERANCE)
            .execute(&store)
            .unwrap());
    }

    #[test]
    fn collinear_overlap_intersects() {
        let mut store = TopologyStore::new();
        let a = polyline(&mut store, &[(0.0, 0.0), (2.0, 0.0)], false);
        let b = polyline(&mut store, &[(1.0, 0.0), (3.0, 0.0)], false);
        assert!(WireWireIntersect::new(a, b, POINT_TOLERANCE)
            .execute(&store)
            .unwrap());
    }
}
