use std::collections::HashSet;

use crate::error::{Result, TopologyError, ToolpathError};
use crate::operations::creation::RenderWire;
use crate::topology::{EdgeId, TopologyStore, WireId};

use super::graph::{EdgeGraph, GraphVertexId};
use super::walk::WireWalker;

/// An edge chain and whether it ends on the vertex it started from.
struct Chain {
    edges: Vec<EdgeId>,
    closed: bool,
}

/// Partitions the edges of an [`EdgeGraph`] into maximal simple chains.
///
/// Chains start and end at vertices whose degree is not 2 (leaves and
/// branches). Components that are closed loops with only degree-2 vertices
/// have no such vertex; they are skipped unless
/// [`with_closed_loops`](Self::with_closed_loops) is set, in which case
/// each is emitted as one closed chain starting at its first edge.
pub struct SplitGraph<'g> {
    graph: &'g EdgeGraph,
    closed_loops: bool,
}

impl<'g> SplitGraph<'g> {
    /// Creates a new `SplitGraph` operation.
    #[must_use]
    pub fn new(graph: &'g EdgeGraph) -> Self {
        Self {
            graph,
            closed_loops: false,
        }
    }

    /// Emit pure closed loops instead of skipping them.
    #[must_use]
    pub fn with_closed_loops(mut self, emit: bool) -> Self {
        self.closed_loops = emit;
        self
    }

    /// Executes the split, returning edge chains in traversal order.
    ///
    /// # Errors
    ///
    /// Propagates walker errors for malformed graphs (self-loops at a
    /// pass-through vertex, inconsistent incidence).
    pub fn execute(&self) -> Result<Vec<Vec<EdgeId>>> {
        Ok(self.chains()?.into_iter().map(|c| c.edges).collect())
    }

    /// Executes the split and renders every chain as a wire in `store`.
    ///
    /// A chain is closed when it starts and ends on the same graph vertex.
    ///
    /// # Errors
    ///
    /// Propagates split errors and wire rendering failures.
    pub fn execute_into(&self, store: &mut TopologyStore) -> Result<Vec<WireId>> {
        // Two endpoints merged into one vertex lie within twice the
        // tolerance of each other.
        let joint_tolerance = 2.0 * self.graph.tolerance();
        self.chains()?
            .into_iter()
            .map(|chain| {
                RenderWire::new(chain.edges, joint_tolerance)
                    .with_closed(chain.closed)
                    .execute(store)
            })
            .collect()
    }

    fn chains(&self) -> Result<Vec<Chain>> {
        let mut visited: HashSet<EdgeId> = HashSet::with_capacity(self.graph.edge_count());
        let mut chains = Vec::new();

        for (vertex, data) in self.graph.vertices() {
            if data.degree() == 2 {
                continue;
            }
            for &edge in &data.edges {
                if visited.contains(&edge) {
                    continue;
                }
                let chain = self.walk_open(vertex, edge)?;
                visited.extend(chain.edges.iter().copied());
                chains.push(chain);
            }
        }

        let open_chains = chains.len();
        let remaining = self.graph.edge_count() - visited.len();
        if remaining > 0 {
            if self.closed_loops {
                self.collect_loops(&mut visited, &mut chains)?;
            } else {
                tracing::warn!(
                    edges = remaining,
                    "skipping closed loops without a branch or leaf vertex"
                );
            }
        }

        tracing::debug!(
            open = open_chains,
            loops = chains.len() - open_chains,
            "split edge graph into chains"
        );
        Ok(chains)
    }

    /// Walks from a leaf or branch vertex to the next one.
    fn walk_open(&self, start: GraphVertexId, edge: EdgeId) -> Result<Chain> {
        let mut edges = Vec::new();
        let mut end = start;
        for step in WireWalker::from_vertex(self.graph, start, edge)? {
            let step = step?;
            end = step.vertex;
            edges.extend(step.edge);
        }
        Ok(Chain {
            edges,
            closed: end == start,
        })
    }

    fn collect_loops(&self, visited: &mut HashSet<EdgeId>, chains: &mut Vec<Chain>) -> Result<()> {
        for edge in self.graph.edges() {
            if visited.contains(&edge) {
                continue;
            }
            let Some((start, _)) = self.graph.edge_ends(edge) else {
                continue;
            };
            let mut edges = Vec::new();
            for step in WireWalker::from_vertex(self.graph, start, edge)? {
                match step {
                    Ok(step) => edges.extend(step.edge),
                    Err(ToolpathError::Topology(TopologyError::CycleDetected)) => break,
                    Err(err) => return Err(err),
                }
            }
            visited.extend(edges.iter().copied());
            chains.push(Chain {
                edges,
                closed: true,
            });
        }
        Ok(())
    }
}
