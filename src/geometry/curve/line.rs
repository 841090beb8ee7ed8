use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::Curve;

/// A straight line parameterized by arc length: `P(t) = origin + t * dir`.
#[derive(Debug, Clone)]
pub struct Line {
    origin: Point3,
    dir: Vector3,
}

impl Line {
    /// Creates a line; `direction` is normalized.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` for a zero-length direction.
    pub fn new(origin: Point3, direction: Vector3) -> Result<Self> {
        let dir = direction
            .try_normalize(TOLERANCE)
            .ok_or(GeometryError::ZeroVector)?;
        Ok(Self { origin, dir })
    }

    /// The line through `a` and `b`, with `a` at `t = 0`, together with the
    /// parameter of `b`.
    ///
    /// # Errors
    ///
    /// Returns an error if `a` and `b` coincide.
    pub fn through(a: Point3, b: Point3) -> Result<(Self, f64)> {
        let span = b - a;
        Ok((Self::new(a, span)?, span.norm()))
    }
}

impl Curve for Line {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        Ok(self.origin + self.dir * t)
    }

    fn length_between(&self, t0: f64, t1: f64) -> f64 {
        (t1 - t0).abs()
    }
}
