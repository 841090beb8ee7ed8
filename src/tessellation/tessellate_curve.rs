use crate::error::Result;
use crate::math::TOLERANCE;
use crate::topology::{EdgeCurve, EdgeId, TopologyStore};

use super::{Polyline, TessellationParams};

/// Tessellates a curve (edge) into a polyline.
///
/// The polyline runs from the edge's start vertex to its end vertex; the
/// first and last points are the vertex positions themselves so that
/// polylines of adjacent edges join exactly.
pub struct TessellateCurve {
    edge: EdgeId,
    params: TessellationParams,
}

impl TessellateCurve {
    /// Creates a new `TessellateCurve` operation.
    #[must_use]
    pub fn new(edge: EdgeId, params: TessellationParams) -> Self {
        Self { edge, params }
    }

    /// Executes the tessellation, returning a polyline.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge or its vertices are missing, or curve
    /// evaluation fails.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self, store: &TopologyStore) -> Result<Polyline> {
        let edge = store.edge(self.edge)?;
        let (start, end) = store.edge_endpoints(self.edge)?;

        let segments = match &edge.curve {
            EdgeCurve::Line(_) => 1,
            EdgeCurve::Arc(arc) => {
                arc_segment_count(arc.radius(), edge.t_end - edge.t_start, &self.params)
            }
        };

        let curve = edge.curve.as_curve();
        let mut points = Vec::with_capacity(segments + 1);
        points.push(start);
        for i in 1..segments {
            let t = edge.t_start + (edge.t_end - edge.t_start) * (i as f64 / segments as f64);
            points.push(curve.evaluate(t)?);
        }
        points.push(end);

        Ok(Polyline { points })
    }
}

/// Number of chords needed to keep the sagitta below `params.tolerance`.
fn arc_segment_count(radius: f64, sweep: f64, params: &TessellationParams) -> usize {
    let sweep = sweep.abs();
    let ratio = (1.0 - params.tolerance / radius).clamp(-1.0, 1.0);
    let max_step = 2.0 * ratio.acos();
    let n = if max_step < TOLERANCE {
        params.max_segments
    } else {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let n = (sweep / max_step).ceil() as usize;
        n
    };
    n.clamp(params.min_segments.max(1), params.max_segments.max(1))
}
