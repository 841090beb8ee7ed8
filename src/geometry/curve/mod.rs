mod arc;
mod line;

pub use arc::Arc;
pub use line::Line;

use crate::error::Result;
use crate::math::Point3;

/// A parametric curve that edges can be cut along.
///
/// Edges bound a curve with a `t_start..t_end` parameter range; the curve
/// itself is unbounded (or periodic, for arcs).
pub trait Curve {
    /// Evaluates the curve at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    fn evaluate(&self, t: f64) -> Result<Point3>;

    /// Length of the curve between parameters `t0` and `t1`.
    fn length_between(&self, t0: f64, t1: f64) -> f64;
}
