use crate::error::Result;
use crate::topology::{EdgeId, TopologyStore, WireId};

use super::config::ToolpathConfig;
use super::graph::BuildEdgeGraph;
use super::group::GroupConnected;
use super::optimize::{OptimizePath, PathPlan};
use super::ramp::RampWire;
use super::split::SplitGraph;

/// Turns a loose set of edges into ordered cut plans for CNC toolpaths.
///
/// The edges are joined into a tolerance-aware
/// [`EdgeGraph`](super::EdgeGraph), split into maximal simple chains at
/// leaves and branches, rendered as wires, grouped by geometric
/// connectivity and ordered per group by a time-bounded nearest-neighbour
/// heuristic. Each group is ordered from where the previous group ended, the
/// first from [`ToolpathConfig::start_point`].
pub struct ExtractToolpath {
    edges: Vec<EdgeId>,
    config: ToolpathConfig,
}

impl ExtractToolpath {
    /// Creates a new `ExtractToolpath` operation.
    #[must_use]
    pub fn new(edges: Vec<EdgeId>, config: ToolpathConfig) -> Self {
        Self { edges, config }
    }

    /// Executes the pipeline, returning one plan per connected group.
    ///
    /// # Errors
    ///
    /// Propagates errors from graph construction, splitting, grouping and
    /// ordering.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<Vec<PathPlan>> {
        let config = &self.config;
        let graph = BuildEdgeGraph::new(self.edges.clone(), config.tolerance).execute(store)?;
        let wires = SplitGraph::new(&graph)
            .with_closed_loops(config.emit_closed_loops)
            .execute_into(store)?;
        let groups = GroupConnected::new(wires, config.tolerance)
            .with_params(config.tessellation)
            .execute(store)?;

        let mut position = config.start_point;
        let mut plans = Vec::with_capacity(groups.len());
        for group in groups {
            let plan = OptimizePath::new(
                group,
                position,
                config.reverse,
                config.time_limit_seconds,
            )
            .with_bidirectional(config.bidirectional)
            .execute(store)?;
            if let Some(end) = plan.end_point() {
                position = end;
            }
            plans.push(plan);
        }

        tracing::debug!(
            edges = self.edges.len(),
            groups = plans.len(),
            truncated = plans.iter().filter(|p| p.truncated).count(),
            "extracted toolpath"
        );
        Ok(plans)
    }

    /// A ramp over `wire` using the configured scale and tessellation.
    #[must_use]
    pub fn ramp(&self, wire: WireId, start_z: f64, end_z: f64) -> RampWire {
        RampWire::new(wire, start_z, end_z)
            .with_scale(self.config.ramp_scale)
            .with_params(self.config.tessellation)
    }
}
