use crate::error::{OperationError, Result};
use crate::math::{point_equals, Point3, POINT_TOLERANCE};
use crate::topology::{OrientedEdge, TopologyStore, VertexData, WireData, WireId};

use super::MakeEdge;

/// Creates a polyline wire from a sequence of 3D points.
///
/// Consecutive edges share their vertices. With `close`, a closing edge
/// back to the first point is added unless the last point already
/// coincides with it.
pub struct MakeWire {
    points: Vec<Point3>,
    close: bool,
}

impl MakeWire {
    /// Creates a new `MakeWire` operation.
    #[must_use]
    pub fn new(points: Vec<Point3>, close: bool) -> Self {
        Self { points, close }
    }

    /// Executes the operation, creating the wire in the topology store.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for fewer than two points and
    /// a geometry error if two consecutive points coincide.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<WireId> {
        if self.points.len() < 2 {
            return Err(OperationError::InvalidInput(
                "at least 2 points required for a wire".to_owned(),
            )
            .into());
        }

        let mut points = self.points.clone();
        let closes_itself = self.close
            && points.len() > 2
            && points
                .first()
                .zip(points.last())
                .is_some_and(|(a, b)| point_equals(a, b, POINT_TOLERANCE));
        if closes_itself {
            points.pop();
        }

        let vertices: Vec<_> = points
            .iter()
            .map(|&p| store.add_vertex(VertexData::new(p)))
            .collect();

        let mut segments: Vec<(usize, usize)> = (1..points.len()).map(|i| (i - 1, i)).collect();
        if self.close {
            segments.push((points.len() - 1, 0));
        }

        let mut edges = Vec::with_capacity(segments.len());
        for (a, b) in segments {
            let edge = MakeEdge::line(points[a], points[b])
                .between(vertices[a], vertices[b])
                .execute(store)?;
            edges.push(OrientedEdge::new(edge, true));
        }

        Ok(store.add_wire(WireData::new(edges, self.close)))
    }
}
