use crate::error::{GeometryError, Result};
use crate::geometry::curve::{Arc, Curve, Line};
use crate::math::{point_equals, Point3, POINT_TOLERANCE};
use crate::topology::{EdgeCurve, EdgeData, EdgeId, TopologyStore, VertexData, VertexId};

enum EdgeSpec {
    Line { start: Point3, end: Point3 },
    Arc { arc: Arc, t_start: f64, t_end: f64 },
}

/// Creates a single edge together with its two vertices.
///
/// Every call creates fresh vertices, so two edges made this way never
/// share a `VertexId` even when their endpoints coincide. Use
/// [`MakeEdge::between`] to connect existing vertices.
pub struct MakeEdge {
    spec: EdgeSpec,
    vertices: Option<(VertexId, VertexId)>,
}

impl MakeEdge {
    /// A straight edge from `start` to `end`.
    #[must_use]
    pub fn line(start: Point3, end: Point3) -> Self {
        Self {
            spec: EdgeSpec::Line { start, end },
            vertices: None,
        }
    }

    /// An edge along `arc` between angles `t_start` and `t_end`.
    #[must_use]
    pub fn arc(arc: Arc, t_start: f64, t_end: f64) -> Self {
        Self {
            spec: EdgeSpec::Arc {
                arc,
                t_start,
                t_end,
            },
            vertices: None,
        }
    }

    /// Reuses existing vertices instead of creating new ones.
    ///
    /// The vertex positions must match the curve endpoints.
    #[must_use]
    pub fn between(mut self, start: VertexId, end: VertexId) -> Self {
        self.vertices = Some((start, end));
        self
    }

    /// Executes the operation, inserting the edge into the store.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for a zero-length edge or when
    /// reused vertices do not sit on the curve endpoints.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<EdgeId> {
        let (curve, t_start, t_end, start, end) = match &self.spec {
            EdgeSpec::Line { start, end } => {
                if point_equals(start, end, POINT_TOLERANCE) {
                    return Err(GeometryError::Degenerate("zero-length line edge".into()).into());
                }
                let (line, t_end) = Line::through(*start, *end)?;
                (EdgeCurve::Line(line), 0.0, t_end, *start, *end)
            }
            EdgeSpec::Arc {
                arc,
                t_start,
                t_end,
            } => {
                if arc.length_between(*t_start, *t_end) < POINT_TOLERANCE {
                    return Err(GeometryError::Degenerate("zero-length arc edge".into()).into());
                }
                let start = arc.evaluate(*t_start)?;
                let end = arc.evaluate(*t_end)?;
                (EdgeCurve::Arc(arc.clone()), *t_start, *t_end, start, end)
            }
        };

        let (start_id, end_id) = match self.vertices {
            Some((s, e)) => {
                let on_curve = point_equals(&store.vertex(s)?.point, &start, POINT_TOLERANCE)
                    && point_equals(&store.vertex(e)?.point, &end, POINT_TOLERANCE);
                if !on_curve {
                    return Err(GeometryError::Degenerate(
                        "edge vertices do not match curve endpoints".into(),
                    )
                    .into());
                }
                (s, e)
            }
            None => (
                store.add_vertex(VertexData::new(start)),
                store.add_vertex(VertexData::new(end)),
            ),
        };

        Ok(store.add_edge(EdgeData {
            start: start_id,
            end: end_id,
            curve,
            t_start,
            t_end,
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn line_edge_has_fresh_vertices() {
        let mut store = TopologyStore::new();
        let a = MakeEdge::line(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0))
            .execute(&mut store)
            .unwrap();
        let b = MakeEdge::line(Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0))
            .execute(&mut store)
            .unwrap();
        assert_ne!(store.edge(a).unwrap().end, store.edge(b).unwrap().start);
        let (_, end) = store.edge_endpoints(a).unwrap();
        assert!((end - Point3::new(1.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn zero_length_line_rejected() {
        let mut store = TopologyStore::new();
        let p = Point3::new(1.0, 1.0, 0.0);
        assert!(MakeEdge::line(p, p).execute(&mut store).is_err());
    }

    #[test]
    fn arc_edge_endpoints_match_angles() {
        let mut store = TopologyStore::new();
        let arc = Arc::in_xy(Point3::origin(), 1.0).unwrap();
        let edge = MakeEdge::arc(arc, 0.0, FRAC_PI_2)
            .execute(&mut store)
            .unwrap();
        let (s, e) = store.edge_endpoints(edge).unwrap();
        assert!((s - Point3::new(1.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((e - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn between_rejects_misplaced_vertices() {
        let mut store = TopologyStore::new();
        let v0 = store.add_vertex(VertexData::new(Point3::new(0.0, 0.0, 0.0)));
        let v1 = store.add_vertex(VertexData::new(Point3::new(5.0, 0.0, 0.0)));
        let result = MakeEdge::line(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0))
            .between(v0, v1)
            .execute(&mut store);
        assert!(result.is_err());
    }
}
