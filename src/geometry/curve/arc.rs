use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::Curve;

/// A circle in 3D space parameterized by angle in radians.
///
/// Angle zero lies along `u`; angles grow towards `v = normal × u`. Edges
/// carrying an arc store their start and end angles as the edge parameter
/// range, so one circle may bound several edges and a range of `TAU` is a
/// full circle.
#[derive(Debug, Clone)]
pub struct Arc {
    center: Point3,
    radius: f64,
    u: Vector3,
    v: Vector3,
}

impl Arc {
    /// Creates a circle in the plane through `center` with the given normal.
    ///
    /// `ref_dir` fixes angle zero and must be perpendicular to `normal`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for a non-positive radius or a
    /// reference direction that is not perpendicular to the normal, and
    /// `GeometryError::ZeroVector` for zero-length vectors.
    pub fn new(center: Point3, radius: f64, normal: Vector3, ref_dir: Vector3) -> Result<Self> {
        if radius.is_nan() || radius < TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "arc radius must be positive, got {radius}"
            ))
            .into());
        }
        let normal = normal
            .try_normalize(TOLERANCE)
            .ok_or(GeometryError::ZeroVector)?;
        let u = ref_dir
            .try_normalize(TOLERANCE)
            .ok_or(GeometryError::ZeroVector)?;
        if normal.dot(&u).abs() > TOLERANCE {
            return Err(GeometryError::Degenerate(
                "arc reference direction is not perpendicular to its normal".into(),
            )
            .into());
        }
        Ok(Self {
            center,
            radius,
            u,
            v: normal.cross(&u),
        })
    }

    /// A counter-clockwise circle in a plane parallel to XY, angle zero
    /// along +X.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive.
    pub fn in_xy(center: Point3, radius: f64) -> Result<Self> {
        Self::new(center, radius, Vector3::z(), Vector3::x())
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Curve for Arc {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        let (sin, cos) = t.sin_cos();
        Ok(self.center + (self.u * cos + self.v * sin) * self.radius)
    }

    fn length_between(&self, t0: f64, t1: f64) -> f64 {
        self.radius * (t1 - t0).abs()
    }
}
