use thiserror::Error;

/// Top-level error type for the wire extraction core.
#[derive(Debug, Error)]
pub enum ToolpathError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    /// The chain starts with a zero-length segment (e.g. a vertical plunge).
    #[error("point chain starts with a zero-length segment")]
    DegenerateChain,

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to topological operations.
///
/// `DegenerateEdge`, `InconsistentTopology` and `CycleDetected` are invariant
/// violations of the input edge set; callers are expected to reject the shape.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("no graph vertex within tolerance of the given point")]
    VertexNotFound,

    #[error("edge is not incident to the given vertex")]
    EdgeNotConnected,

    #[error("edge does not have exactly one endpoint distinct from the current vertex")]
    DegenerateEdge,

    #[error("pass-through vertex has {candidates} continuation edges, expected 1")]
    InconsistentTopology { candidates: usize },

    #[error("walk revisited an edge (closed loop without branch or leaf vertex)")]
    CycleDetected,

    #[error("edges do not form a connected chain")]
    WireDisconnected,
}

/// Errors related to operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`ToolpathError`].
pub type Result<T> = std::result::Result<T, ToolpathError>;
