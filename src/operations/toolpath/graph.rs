use std::collections::HashMap;

use crate::error::{OperationError, Result};
use crate::math::{distance_3d, Point3};
use crate::topology::{EdgeId, TopologyStore};

/// Index of a vertex in an [`EdgeGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphVertexId(usize);

impl GraphVertexId {
    /// Position of the vertex in the graph arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Classification of a vertex by its degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Degree 1: an open end.
    DeadEnd,
    /// Degree 2: the path passes through.
    Interior,
    /// Degree 3 or more.
    Junction,
}

/// A vertex of the edge graph and the edges incident to it.
#[derive(Debug, Clone)]
pub struct GraphVertex {
    /// Representative position (the first endpoint that created the vertex).
    pub point: Point3,
    /// Incident edges in insertion order.
    pub edges: Vec<EdgeId>,
}

impl GraphVertex {
    /// Number of incident edges.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    /// Classifies the vertex by degree.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self.degree() {
            2 => NodeKind::Interior,
            0 | 1 => NodeKind::DeadEnd,
            _ => NodeKind::Junction,
        }
    }
}

/// Grid-based spatial hash over graph vertices.
///
/// Cells are `2 * tolerance` wide, so any point within tolerance of a
/// vertex lies in the vertex's cell or one of its 26 neighbours.
#[derive(Debug, Clone)]
struct SpatialHash {
    cells: HashMap<(i64, i64, i64), Vec<GraphVertexId>>,
    cell_size: f64,
}

impl SpatialHash {
    fn new(tolerance: f64) -> Self {
        Self {
            cells: HashMap::new(),
            cell_size: tolerance * 2.0,
        }
    }

    #[inline]
    fn cell_coords(&self, p: &Point3) -> (i64, i64, i64) {
        #[allow(clippy::cast_possible_truncation)]
        let discretize = |v: f64| (v / self.cell_size).floor() as i64;
        (discretize(p.x), discretize(p.y), discretize(p.z))
    }

    fn insert(&mut self, p: &Point3, id: GraphVertexId) {
        self.cells.entry(self.cell_coords(p)).or_default().push(id);
    }

    /// Candidate ids in the 3x3x3 block of cells around `p`.
    fn neighbourhood(&self, p: &Point3) -> impl Iterator<Item = GraphVertexId> + '_ {
        let (cx, cy, cz) = self.cell_coords(p);
        (-1..=1)
            .flat_map(move |dx| (-1..=1).flat_map(move |dy| (-1..=1).map(move |dz| (dx, dy, dz))))
            .filter_map(move |(dx, dy, dz)| {
                self.cells.get(&(
                    cx.saturating_add(dx),
                    cy.saturating_add(dy),
                    cz.saturating_add(dz),
                ))
            })
            .flatten()
            .copied()
    }
}

/// Vertex → incident-edges adjacency built from a set of edges.
///
/// Vertices live in an arena indexed by [`GraphVertexId`]; endpoints are
/// merged into a vertex when they are within the graph tolerance.
#[derive(Debug, Clone)]
pub struct EdgeGraph {
    vertices: Vec<GraphVertex>,
    edge_ends: HashMap<EdgeId, (GraphVertexId, GraphVertexId)>,
    edge_order: Vec<EdgeId>,
    index: SpatialHash,
    tolerance: f64,
}

impl EdgeGraph {
    fn new(tolerance: f64) -> Self {
        Self {
            vertices: Vec::new(),
            edge_ends: HashMap::new(),
            edge_order: Vec::new(),
            index: SpatialHash::new(tolerance),
            tolerance,
        }
    }

    /// Tolerance used for vertex identity.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_order.len()
    }

    /// Iterates over vertices in creation order.
    pub fn vertices(&self) -> impl Iterator<Item = (GraphVertexId, &GraphVertex)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (GraphVertexId(i), v))
    }

    /// Iterates over edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edge_order.iter().copied()
    }

    /// Returns the vertex with the given id.
    #[must_use]
    pub fn vertex(&self, id: GraphVertexId) -> Option<&GraphVertex> {
        self.vertices.get(id.0)
    }

    /// Degree of a vertex (zero for an unknown id).
    #[must_use]
    pub fn degree(&self, id: GraphVertexId) -> usize {
        self.vertex(id).map_or(0, GraphVertex::degree)
    }

    /// Edges incident to a vertex.
    #[must_use]
    pub fn incident(&self, id: GraphVertexId) -> &[EdgeId] {
        match self.vertex(id) {
            Some(v) => &v.edges,
            None => &[],
        }
    }

    /// The vertices an edge was indexed at, in (start, end) order.
    #[must_use]
    pub fn edge_ends(&self, edge: EdgeId) -> Option<(GraphVertexId, GraphVertexId)> {
        self.edge_ends.get(&edge).copied()
    }

    /// Finds the vertex matching `point`.
    ///
    /// An exact coordinate match wins; otherwise the nearest vertex within
    /// tolerance, with ties going to the earliest created.
    #[must_use]
    pub fn find_vertex(&self, point: &Point3) -> Option<GraphVertexId> {
        let mut best: Option<(GraphVertexId, f64)> = None;
        for id in self.index.neighbourhood(point) {
            let candidate = &self.vertices[id.0].point;
            if candidate == point {
                return Some(id);
            }
            let d = distance_3d(candidate, point);
            if d >= self.tolerance {
                continue;
            }
            let better = match best {
                None => true,
                Some((best_id, best_d)) => d < best_d || (d == best_d && id < best_id),
            };
            if better {
                best = Some((id, d));
            }
        }
        best.map(|(id, _)| id)
    }

    fn resolve_or_insert(&mut self, point: Point3) -> GraphVertexId {
        if let Some(id) = self.find_vertex(&point) {
            return id;
        }
        let id = GraphVertexId(self.vertices.len());
        self.vertices.push(GraphVertex {
            point,
            edges: Vec::new(),
        });
        self.index.insert(&point, id);
        id
    }

    fn insert_edge(&mut self, edge: EdgeId, start: Point3, end: Point3) {
        if self.edge_ends.contains_key(&edge) {
            return;
        }
        let s = self.resolve_or_insert(start);
        let e = self.resolve_or_insert(end);
        self.vertices[s.0].edges.push(edge);
        if e != s {
            self.vertices[e.0].edges.push(edge);
        }
        self.edge_ends.insert(edge, (s, e));
        self.edge_order.push(edge);
    }
}

/// Builds an [`EdgeGraph`] from a set of edges.
pub struct BuildEdgeGraph {
    edges: Vec<EdgeId>,
    tolerance: f64,
}

impl BuildEdgeGraph {
    /// Creates a new `BuildEdgeGraph` operation.
    #[must_use]
    pub fn new(edges: Vec<EdgeId>, tolerance: f64) -> Self {
        Self { edges, tolerance }
    }

    /// Executes the operation.
    ///
    /// Every edge is indexed at both of its endpoints, or once if both
    /// endpoints resolve to the same vertex. Repeated edge ids are indexed
    /// once.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for a non-positive tolerance
    /// and a topology error if an edge is not in the store.
    pub fn execute(&self, store: &TopologyStore) -> Result<EdgeGraph> {
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(OperationError::InvalidInput(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            ))
            .into());
        }

        let mut graph = EdgeGraph::new(self.tolerance);
        for &edge in &self.edges {
            let (start, end) = store.edge_endpoints(edge)?;
            graph.insert_edge(edge, start, end);
        }

        tracing::debug!(
            edges = graph.edge_count(),
            vertices = graph.vertex_count(),
            "built edge graph"
        );
        Ok(graph)
    }
}
