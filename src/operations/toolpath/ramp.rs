use crate::error::{GeometryError, OperationError, Result};
use crate::math::{distance_2d, Point3, POINT_TOLERANCE};
use crate::operations::creation::MakeWire;
use crate::operations::query::WirePoints;
use crate::tessellation::TessellationParams;
use crate::topology::{TopologyStore, WireId};

/// Default ramp multiplier: positive depths cut downwards.
pub const DEFAULT_RAMP_SCALE: f64 = -1.0;

/// Assigns ramped heights along a planar point chain.
///
/// X and Y are kept and any incoming Z is ignored. The height at each
/// point is `start_z * scale + (end_z - start_z) * scale * t`, where `t` is
/// the fraction of planar arc length travelled so far.
pub struct InterpolateZ {
    points: Vec<Point3>,
    start_z: f64,
    end_z: f64,
    scale: f64,
}

impl InterpolateZ {
    /// Creates a new `InterpolateZ` operation with the default scale.
    #[must_use]
    pub fn new(points: Vec<Point3>, start_z: f64, end_z: f64) -> Self {
        Self {
            points,
            start_z,
            end_z,
            scale: DEFAULT_RAMP_SCALE,
        }
    }

    /// Sets the height multiplier.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Executes the interpolation.
    ///
    /// # Errors
    ///
    /// - `OperationError::InvalidInput` for fewer than two points.
    /// - `GeometryError::DegenerateChain` if the first two points coincide
    ///   in XY (a vertical plunge has no planar length to ramp over).
    /// - `GeometryError::ParameterOutOfRange` if a length fraction falls
    ///   outside `[0, 1]`, which only non-finite coordinates can cause.
    pub fn execute(&self) -> Result<Vec<Point3>> {
        let [first, second, ..] = self.points.as_slice() else {
            return Err(OperationError::InvalidInput(
                "at least 2 points required for a ramp".to_owned(),
            )
            .into());
        };
        if distance_2d(first, second) < POINT_TOLERANCE {
            return Err(GeometryError::DegenerateChain.into());
        }

        let base = self.start_z * self.scale;
        let rise = (self.end_z - self.start_z) * self.scale;

        if self.points.len() == 2 {
            return Ok(vec![
                Point3::new(first.x, first.y, base),
                Point3::new(second.x, second.y, self.end_z * self.scale),
            ]);
        }

        let total: f64 = self
            .points
            .windows(2)
            .map(|w| distance_2d(&w[0], &w[1]))
            .sum();

        let mut travelled = 0.0;
        let mut out = Vec::with_capacity(self.points.len());
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                travelled += distance_2d(&self.points[i - 1], p);
            }
            let t = travelled / total;
            if !(0.0..=1.0).contains(&t) {
                return Err(GeometryError::ParameterOutOfRange {
                    parameter: "t",
                    value: t,
                    min: 0.0,
                    max: 1.0,
                }
                .into());
            }
            out.push(Point3::new(p.x, p.y, base + rise * t));
        }
        Ok(out)
    }
}

/// Builds a ramped copy of a wire as a new polyline wire.
///
/// The wire is tessellated in traversal order and every point gets its
/// height from [`InterpolateZ`].
pub struct RampWire {
    wire: WireId,
    start_z: f64,
    end_z: f64,
    scale: f64,
    params: TessellationParams,
}

impl RampWire {
    /// Creates a new `RampWire` operation with the default scale.
    #[must_use]
    pub fn new(wire: WireId, start_z: f64, end_z: f64) -> Self {
        Self {
            wire,
            start_z,
            end_z,
            scale: DEFAULT_RAMP_SCALE,
            params: TessellationParams::default(),
        }
    }

    /// Sets the height multiplier.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Overrides the tessellation used for curved edges.
    #[must_use]
    pub fn with_params(mut self, params: TessellationParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the operation, creating the ramped wire in the store.
    ///
    /// # Errors
    ///
    /// Propagates [`InterpolateZ`] errors and missing-wire errors.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<WireId> {
        let points = WirePoints::new(self.wire, self.params).execute(store)?;
        let ramped = InterpolateZ::new(points, self.start_z, self.end_z)
            .with_scale(self.scale)
            .execute()?;
        MakeWire::new(ramped, false).execute(store)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::error::ToolpathError;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn equal_spacing_gives_half_way_midpoint() {
        let points = vec![p(0.0, 0.0, 7.0), p(1.0, 0.0, 7.0), p(2.0, 0.0, 7.0)];
        let out = InterpolateZ::new(points, 2.0, 6.0).execute().unwrap();
        let z: Vec<f64> = out.iter().map(|q| q.z).collect();
        assert_eq!(z, vec![-2.0, -4.0, -6.0]);
        assert_eq!(out[1].x, 1.0);
    }

    #[test]
    fn two_points_set_endpoints_only() {
        let points = vec![p(0.0, 0.0, 0.0), p(3.0, 4.0, 0.0)];
        let out = InterpolateZ::new(points, 1.0, 5.0)
            .with_scale(2.0)
            .execute()
            .unwrap();
        assert_eq!(out, vec![p(0.0, 0.0, 2.0), p(3.0, 4.0, 10.0)]);
    }

    #[test]
    fn uneven_spacing_follows_arc_length() {
        let points = vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 3.0, 0.0),
        ];
        let out = InterpolateZ::new(points, 0.0, 8.0).execute().unwrap();
        assert_abs_diff_eq!(out[1].z, -2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out[2].z, -8.0, epsilon = 1e-12);
    }

    #[test]
    fn vertical_start_is_rejected() {
        let points = vec![p(1.0, 1.0, 0.0), p(1.0, 1.0, 5.0), p(2.0, 1.0, 0.0)];
        let result = InterpolateZ::new(points, 0.0, 1.0).execute();
        assert!(matches!(
            result,
            Err(ToolpathError::Geometry(GeometryError::DegenerateChain))
        ));
    }

    #[test]
    fn non_finite_point_is_out_of_range() {
        let points = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(f64::NAN, 0.0, 0.0)];
        let result = InterpolateZ::new(points, 0.0, 1.0).execute();
        assert!(matches!(
            result,
            Err(ToolpathError::Geometry(GeometryError::ParameterOutOfRange { .. }))
        ));
    }

    #[test]
    fn too_few_points_rejected() {
        assert!(InterpolateZ::new(vec![p(0.0, 0.0, 0.0)], 0.0, 1.0)
            .execute()
            .is_err());
    }

    #[test]
    fn ramp_wire_descends_along_square() {
        let mut store = TopologyStore::new();
        let wire = MakeWire::new(
            vec![
                p(0.0, 0.0, 0.0),
                p(1.0, 0.0, 0.0),
                p(1.0, 1.0, 0.0),
                p(0.0, 1.0, 0.0),
            ],
            true,
        )
        .execute(&mut store)
        .unwrap();

        let ramped = RampWire::new(wire, 0.0, 4.0).execute(&mut store).unwrap();
        let points = WirePoints::new(ramped, TessellationParams::default())
            .execute(&store)
            .unwrap();
        let z: Vec<f64> = points.iter().map(|q| q.z).collect();
        assert_eq!(z.len(), 5);
        for (i, z) in z.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let expected = -(i as f64);
            assert_abs_diff_eq!(*z, expected, epsilon = 1e-12);
        }
    }
}
