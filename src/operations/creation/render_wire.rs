use crate::error::{OperationError, Result, TopologyError};
use crate::math::{point_equals, Point3};
use crate::topology::{EdgeId, OrientedEdge, TopologyStore, WireData, WireId};

/// Builds a wire from an ordered list of edges.
///
/// Each edge is oriented so that it starts where the previous one ended.
/// The wire is marked closed when the chain returns to its first point,
/// unless the caller already knows and sets it with
/// [`with_closed`](Self::with_closed).
pub struct RenderWire {
    edges: Vec<EdgeId>,
    tolerance: f64,
    closed: Option<bool>,
}

impl RenderWire {
    /// Creates a new `RenderWire` operation.
    #[must_use]
    pub fn new(edges: Vec<EdgeId>, tolerance: f64) -> Self {
        Self {
            edges,
            tolerance,
            closed: None,
        }
    }

    /// Marks the wire closed or open instead of comparing its end points.
    #[must_use]
    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = Some(closed);
        self
    }

    /// Executes the operation, creating the wire in the topology store.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for an empty edge list and
    /// `TopologyError::WireDisconnected` if two consecutive edges share no
    /// endpoint.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<WireId> {
        let data = self.orient(store)?;
        Ok(store.add_wire(data))
    }

    fn orient(&self, store: &TopologyStore) -> Result<WireData> {
        let Some((&first, rest)) = self.edges.split_first() else {
            return Err(OperationError::InvalidInput("cannot render an empty wire".into()).into());
        };

        let (a, b) = store.edge_endpoints(first)?;
        // Orient the first edge towards the second one.
        let forward = match rest.first() {
            Some(&next) => {
                let (c, d) = store.edge_endpoints(next)?;
                let touches = |p: &Point3| {
                    point_equals(p, &c, self.tolerance) || point_equals(p, &d, self.tolerance)
                };
                if touches(&b) {
                    true
                } else if touches(&a) {
                    false
                } else {
                    return Err(TopologyError::WireDisconnected.into());
                }
            }
            None => true,
        };

        let mut oriented = Vec::with_capacity(self.edges.len());
        oriented.push(OrientedEdge::new(first, forward));
        let start = if forward { a } else { b };
        let mut cursor = if forward { b } else { a };

        for &edge in rest {
            let (s, e) = store.edge_endpoints(edge)?;
            if point_equals(&cursor, &s, self.tolerance) {
                oriented.push(OrientedEdge::new(edge, true));
                cursor = e;
            } else if point_equals(&cursor, &e, self.tolerance) {
                oriented.push(OrientedEdge::new(edge, false));
                cursor = s;
            } else {
                return Err(TopologyError::WireDisconnected.into());
            }
        }

        let is_closed = self
            .closed
            .unwrap_or_else(|| point_equals(&start, &cursor, self.tolerance));
        Ok(WireData::new(oriented, is_closed))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ToolpathError;
    use crate::math::POINT_TOLERANCE;
    use crate::operations::creation::MakeEdge;

    fn line(store: &mut TopologyStore, a: (f64, f64), b: (f64, f64)) -> EdgeId {
        MakeEdge::line(Point3::new(a.0, a.1, 0.0), Point3::new(b.0, b.1, 0.0))
            .execute(store)
            .unwrap()
    }

    #[test]
    fn orients_mixed_direction_edges() {
        let mut store = TopologyStore::new();
        let e0 = line(&mut store, (1.0, 0.0), (0.0, 0.0));
        let e1 = line(&mut store, (1.0, 0.0), (1.0, 1.0));
        let e2 = line(&mut store, (2.0, 1.0), (1.0, 1.0));

        let wire = RenderWire::new(vec![e0, e1, e2], POINT_TOLERANCE)
            .execute(&mut store)
            .unwrap();
        let data = store.wire(wire).unwrap();
        let forwards: Vec<bool> = data.edges.iter().map(|oe| oe.forward).collect();
        assert_eq!(forwards, vec![false, true, false]);
        assert!(!data.is_closed);

        let (start, end) = store.wire_endpoints(wire).unwrap();
        assert!((start - Point3::new(0.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((end - Point3::new(2.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn closed_chain_is_marked_closed() {
        let mut store = TopologyStore::new();
        let edges = vec![
            line(&mut store, (0.0, 0.0), (1.0, 0.0)),
            line(&mut store, (1.0, 0.0), (1.0, 1.0)),
            line(&mut store, (1.0, 1.0), (0.0, 0.0)),
        ];
        let wire = RenderWire::new(edges, POINT_TOLERANCE)
            .execute(&mut store)
            .unwrap();
        assert!(store.wire(wire).unwrap().is_closed);
    }

    #[test]
    fn known_closure_overrides_end_point_check() {
        let mut store = TopologyStore::new();
        // Ends 1.5e-6 apart: both within 1e-6 of a vertex at (0.75e-6, 0).
        let edges = vec![
            line(&mut store, (0.0, 0.0), (1.0, 0.0)),
            line(&mut store, (1.0, 0.0), (1.0, 1.0)),
            line(&mut store, (1.0, 1.0), (1.5e-6, 0.0)),
        ];
        let open = RenderWire::new(edges.clone(), POINT_TOLERANCE)
            .execute(&mut store)
            .unwrap();
        assert!(!store.wire(open).unwrap().is_closed);

        let closed = RenderWire::new(edges, POINT_TOLERANCE)
            .with_closed(true)
            .execute(&mut store)
            .unwrap();
        assert!(store.wire(closed).unwrap().is_closed);
    }

    #[test]
    fn gap_is_rejected() {
        let mut store = TopologyStore::new();
        let edges = vec![
            line(&mut store, (0.0, 0.0), (1.0, 0.0)),
            line(&mut store, (2.0, 0.0), (3.0, 0.0)),
        ];
        let result = RenderWire::new(edges, POINT_TOLERANCE).execute(&mut store);
        assert!(matches!(
            result,
            Err(ToolpathError::Topology(TopologyError::WireDisconnected))
        ));
    }

    #[test]
    fn empty_is_rejected() {
        let mut store = TopologyStore::new();
        assert!(RenderWire::new(Vec::new(), POINT_TOLERANCE)
            .execute(&mut store)
            .is_err());
    }
}
