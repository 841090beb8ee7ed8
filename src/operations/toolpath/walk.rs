use std::collections::HashSet;

use crate::error::{Result, TopologyError};
use crate::math::Point3;
use crate::topology::EdgeId;

use super::graph::{EdgeGraph, GraphVertexId};

/// One item produced by [`WireWalker`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkStep {
    /// The vertex reached.
    pub vertex: GraphVertexId,
    /// Its representative position.
    pub point: Point3,
    /// The edge leaving the vertex, or `None` at the terminal vertex.
    pub edge: Option<EdgeId>,
}

#[derive(Debug, Clone, Copy)]
enum WalkState {
    Start { vertex: GraphVertexId, edge: EdgeId },
    Continue { vertex: GraphVertexId, edge: EdgeId },
    Done,
}

/// Traces a path through an [`EdgeGraph`] from a vertex along one of its
/// edges, passing through degree-2 vertices until a leaf or branch.
///
/// Yields `(vertex, Some(edge))` for the start and every pass-through
/// vertex, then `(terminal, None)`. Each edge is traversed at most once; a
/// walk that comes back to an edge it already used yields
/// [`TopologyError::CycleDetected`]. After any error the walker is
/// exhausted.
#[derive(Debug)]
pub struct WireWalker<'g> {
    graph: &'g EdgeGraph,
    state: WalkState,
    visited: HashSet<EdgeId>,
}

impl<'g> WireWalker<'g> {
    /// Starts a walk at the vertex matching `start` along `edge`.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::VertexNotFound` if no vertex lies within
    /// tolerance of `start`, and `TopologyError::EdgeNotConnected` if
    /// `edge` is not incident to it.
    pub fn new(graph: &'g EdgeGraph, start: &Point3, edge: EdgeId) -> Result<Self> {
        let vertex = graph
            .find_vertex(start)
            .ok_or(TopologyError::VertexNotFound)?;
        Self::from_vertex(graph, vertex, edge)
    }

    /// Starts a walk at a known vertex.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EdgeNotConnected` if `edge` is not incident
    /// to `vertex`.
    pub fn from_vertex(graph: &'g EdgeGraph, vertex: GraphVertexId, edge: EdgeId) -> Result<Self> {
        if !graph.incident(vertex).contains(&edge) {
            return Err(TopologyError::EdgeNotConnected.into());
        }
        Ok(Self {
            graph,
            state: WalkState::Start { vertex, edge },
            visited: HashSet::new(),
        })
    }

    /// Drains the walk, returning the traversed edges in order.
    ///
    /// # Errors
    ///
    /// Propagates the first error produced by the walk.
    pub fn collect_edges(self) -> Result<Vec<EdgeId>> {
        let mut edges = Vec::new();
        for step in self {
            if let Some(edge) = step?.edge {
                edges.push(edge);
            }
        }
        Ok(edges)
    }

    fn step(&self, vertex: GraphVertexId, edge: Option<EdgeId>) -> WalkStep {
        let point = self
            .graph
            .vertex(vertex)
            .map_or_else(Point3::origin, |v| v.point);
        WalkStep {
            vertex,
            point,
            edge,
        }
    }

    /// The endpoint of `edge` that is not `vertex`.
    fn far_end(&self, vertex: GraphVertexId, edge: EdgeId) -> Result<GraphVertexId> {
        let (s, e) = self
            .graph
            .edge_ends(edge)
            .ok_or(TopologyError::EdgeNotConnected)?;
        match (s == vertex, e == vertex) {
            (true, false) => Ok(e),
            (false, true) => Ok(s),
            _ => Err(TopologyError::DegenerateEdge.into()),
        }
    }

    fn advance(&mut self, vertex: GraphVertexId, edge: EdgeId) -> Result<WalkStep> {
        let next = self.far_end(vertex, edge)?;
        if self.graph.degree(next) != 2 {
            self.state = WalkState::Done;
            return Ok(self.step(next, None));
        }

        let mut candidates = self.graph.incident(next).iter().filter(|&&e| e != edge);
        let (Some(&continuation), None) = (candidates.next(), candidates.next()) else {
            let count = self.graph.incident(next).iter().filter(|&&e| e != edge).count();
            return Err(TopologyError::InconsistentTopology { candidates: count }.into());
        };
        if !self.visited.insert(continuation) {
            return Err(TopologyError::CycleDetected.into());
        }

        tracing::trace!(vertex = next.index(), "walk passes through vertex");
        self.state = WalkState::Continue {
            vertex: next,
            edge: continuation,
        };
        Ok(self.step(next, Some(continuation)))
    }
}

impl Iterator for WireWalker<'_> {
    type Item = Result<WalkStep>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            WalkState::Done => None,
            WalkState::Start { vertex, edge } => {
                self.visited.insert(edge);
                self.state = WalkState::Continue { vertex, edge };
                Some(Ok(self.step(vertex, Some(edge))))
            }
            WalkState::Continue { vertex, edge } => {
                let result = self.advance(vertex, edge);
                if result.is_err() {
                    self.state = WalkState::Done;
                }
                Some(result)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::error::ToolpathError;
    use crate::geometry::curve::Arc;
    use crate::math::POINT_TOLERANCE;
    use crate::operations::creation::MakeEdge;
    use crate::operations::toolpath::BuildEdgeGraph;
    use crate::topology::TopologyStore;

    fn line(store: &mut TopologyStore, a: (f64, f64), b: (f64, f64)) -> EdgeId {
        MakeEdge::line(Point3::new(a.0, a.1, 0.0), Point3::new(b.0, b.1, 0.0))
            .execute(store)
            .unwrap()
    }

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    #[test]
    fn walks_open_chain_to_leaf() {
        let mut store = TopologyStore::new();
        let e0 = line(&mut store, (0.0, 0.0), (1.0, 0.0));
        let e1 = line(&mut store, (1.0, 0.0), (1.0, 1.0));
        let e2 = line(&mut store, (0.0, 1.0), (1.0, 1.0));
        let graph = BuildEdgeGraph::new(vec![e0, e1, e2], POINT_TOLERANCE)
            .execute(&store)
            .unwrap();

        let steps: Vec<WalkStep> = WireWalker::new(&graph, &p(0.0, 0.0), e0)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        let edges: Vec<Option<EdgeId>> = steps.iter().map(|s| s.edge).collect();
        assert_eq!(edges, vec![Some(e0), Some(e1), Some(e2), None]);
        assert!((steps[3].point - p(0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn stops_at_branch() {
        let mut store = TopologyStore::new();
        let e0 = line(&mut store, (0.0, 0.0), (1.0, 0.0));
        let e1 = line(&mut store, (1.0, 0.0), (2.0, 0.0));
        let e2 = line(&mut store, (2.0, 0.0), (3.0, 0.0));
        let e3 = line(&mut store, (2.0, 0.0), (2.0, 1.0));
        let graph = BuildEdgeGraph::new(vec![e0, e1, e2, e3], POINT_TOLERANCE)
            .execute(&store)
            .unwrap();

        let edges = WireWalker::new(&graph, &p(0.0, 0.0), e0)
            .unwrap()
            .collect_edges()
            .unwrap();
        assert_eq!(edges, vec![e0, e1]);
    }

    #[test]
    fn edge_not_at_vertex_is_rejected() {
        let mut store = TopologyStore::new();
        let e0 = line(&mut store, (0.0, 0.0), (1.0, 0.0));
        let e1 = line(&mut store, (1.0, 0.0), (2.0, 0.0));
        let graph = BuildEdgeGraph::new(vec![e0, e1], POINT_TOLERANCE)
            .execute(&store)
            .unwrap();

        let result = WireWalker::new(&graph, &p(0.0, 0.0), e1);
        assert!(matches!(
            result,
            Err(ToolpathError::Topology(TopologyError::EdgeNotConnected))
        ));
        let result = WireWalker::new(&graph, &p(5.0, 0.0), e0);
        assert!(matches!(
            result,
            Err(ToolpathError::Topology(TopologyError::VertexNotFound))
        ));
    }

    #[test]
    fn pure_cycle_terminates_with_error() {
        let mut store = TopologyStore::new();
        let edges = vec![
            line(&mut store, (0.0, 0.0), (1.0, 0.0)),
            line(&mut store, (1.0, 0.0), (1.0, 1.0)),
            line(&mut store, (1.0, 1.0), (0.0, 1.0)),
            line(&mut store, (0.0, 1.0), (0.0, 0.0)),
        ];
        let graph = BuildEdgeGraph::new(edges.clone(), POINT_TOLERANCE)
            .execute(&store)
            .unwrap();

        let steps: Vec<Result<WalkStep>> = WireWalker::new(&graph, &p(0.0, 0.0), edges[0])
            .unwrap()
            .collect();
        // Start plus three pass-through vertices, then the error.
        assert_eq!(steps.len(), 5);
        assert!(steps[..4].iter().all(Result::is_ok));
        assert!(matches!(
            steps[4],
            Err(ToolpathError::Topology(TopologyError::CycleDetected))
        ));
    }

    #[test]
    fn self_loop_is_degenerate() {
        let mut store = TopologyStore::new();
        let lead = line(&mut store, (-1.0, 0.0), (0.0, 0.0));
        // A full circle starts and ends on the hub.
        let arc = Arc::in_xy(p(0.5, 0.0), 0.5).unwrap();
        let full = MakeEdge::arc(arc, PI, 3.0 * PI)
            .execute(&mut store)
            .unwrap();
        let graph = BuildEdgeGraph::new(vec![lead, full], POINT_TOLERANCE)
            .execute(&store)
            .unwrap();

        let hub = graph.find_vertex(&p(0.0, 0.0)).unwrap();
        assert_eq!(graph.degree(hub), 2);
        let steps: Vec<Result<WalkStep>> = WireWalker::from_vertex(&graph, hub, full)
            .unwrap()
            .collect();
        assert!(matches!(
            steps.last().unwrap(),
            Err(ToolpathError::Topology(TopologyError::DegenerateEdge))
        ));
    }
}
