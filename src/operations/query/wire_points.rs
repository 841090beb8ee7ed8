use crate::error::Result;
use crate::math::{point_equals, Point3, POINT_TOLERANCE};
use crate::tessellation::{TessellateCurve, TessellationParams};
use crate::topology::{TopologyStore, WireId};

/// Returns the ordered point chain of a wire.
///
/// Each edge is tessellated in its traversal direction; the shared point at
/// every joint appears once. A closed wire ends on its first point.
pub struct WirePoints {
    wire: WireId,
    params: TessellationParams,
}

impl WirePoints {
    /// Creates a new `WirePoints` query.
    #[must_use]
    pub fn new(wire: WireId, params: TessellationParams) -> Self {
        Self { wire, params }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the wire or one of its edges is missing.
    pub fn execute(&self, store: &TopologyStore) -> Result<Vec<Point3>> {
        let wire = store.wire(self.wire)?;
        let mut points: Vec<Point3> = Vec::new();
        for oe in &wire.edges {
            let mut poly = TessellateCurve::new(oe.edge, self.params)
                .execute(store)?
                .points;
            if !oe.forward {
                poly.reverse();
            }
            let skip = usize::from(
                points
                    .last()
                    .zip(poly.first())
                    .is_some_and(|(a, b)| point_equals(a, b, POINT_TOLERANCE)),
            );
            points.extend(poly.into_iter().skip(skip));
        }
        Ok(points)
    }
}
