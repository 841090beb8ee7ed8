pub mod distance_2d;
pub mod intersect_2d;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Tolerance for numeric degeneracy checks (zero vectors, parallel lines).
pub const TOLERANCE: f64 = 1e-10;

/// Default tolerance for point identity.
///
/// Endpoints of independently constructed edges are considered the same
/// vertex when they are closer than this.
pub const POINT_TOLERANCE: f64 = 1e-6;

/// Returns `true` if the two points are closer than `tol`.
///
/// Points never compare by exact equality.
#[must_use]
pub fn point_equals(a: &Point3, b: &Point3, tol: f64) -> bool {
    distance_3d(a, b) < tol
}

/// Planar (XY) distance between two points, ignoring Z.
#[must_use]
pub fn distance_2d(a: &Point3, b: &Point3) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance_3d(a: &Point3, b: &Point3) -> f64 {
    nalgebra::distance(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_within_tolerance_are_equal() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(1.0 + 1e-7, 2.0, 3.0);
        assert!(point_equals(&a, &b, POINT_TOLERANCE));
        assert!(!point_equals(&a, &Point3::new(1.1, 2.0, 3.0), POINT_TOLERANCE));
    }

    #[test]
    fn planar_distance_ignores_z() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(3.0, 4.0, 100.0);
        assert!((distance_2d(&a, &b) - 5.0).abs() < TOLERANCE);
        assert!(distance_3d(&a, &b) > 100.0);
    }
}
