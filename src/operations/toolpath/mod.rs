mod config;
mod extract;
mod graph;
mod group;
mod optimize;
mod ramp;
mod split;
mod walk;

pub use config::ToolpathConfig;
pub use extract::ExtractToolpath;
pub use graph::{BuildEdgeGraph, EdgeGraph, GraphVertex, GraphVertexId, NodeKind};
pub use group::GroupConnected;
pub use optimize::{OptimizePath, PathPlan, PlannedWire};
pub use ramp::{InterpolateZ, RampWire, DEFAULT_RAMP_SCALE};
pub use split::SplitGraph;
pub use walk::{WalkStep, WireWalker};
