use super::{Point3, TOLERANCE};

/// Twice the signed area of the XY triangle `a`, `b`, `c`.
///
/// Positive when `c` lies to the left of `a`→`b`.
#[inline]
fn orient(a: &Point3, b: &Point3, c: &Point3) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Returns `true` if the XY projections of two segments properly cross.
///
/// Each segment must have its endpoints strictly on opposite sides of the
/// other's supporting line. Touching and collinear overlap are not
/// reported here; they have zero distance, see
/// [`segment_to_segment_dist`](super::distance_2d::segment_to_segment_dist).
#[must_use]
pub fn segments_cross_2d(a0: &Point3, a1: &Point3, b0: &Point3, b1: &Point3) -> bool {
    let opposite = |s: f64, t: f64| {
        (s > TOLERANCE && t < -TOLERANCE) || (s < -TOLERANCE && t > TOLERANCE)
    };
    opposite(orient(a0, a1, b0), orient(a0, a1, b1))
        && opposite(orient(b0, b1, a0), orient(b0, b1, a1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    #[test]
    fn diagonals_cross() {
        assert!(segments_cross_2d(
            &p(0.0, 0.0),
            &p(2.0, 2.0),
            &p(0.0, 2.0),
            &p(2.0, 0.0)
        ));
    }

    #[test]
    fn parallel_segments_do_not_cross() {
        assert!(!segments_cross_2d(
            &p(0.0, 0.0),
            &p(1.0, 0.0),
            &p(0.0, 1.0),
            &p(1.0, 1.0)
        ));
    }

    #[test]
    fn shared_endpoint_is_not_a_crossing() {
        assert!(!segments_cross_2d(
            &p(0.0, 0.0),
            &p(1.0, 0.0),
            &p(1.0, 0.0),
            &p(1.0, 1.0)
        ));
    }

    #[test]
    fn z_is_ignored() {
        let a0 = Point3::new(0.0, 0.0, 5.0);
        let a1 = Point3::new(2.0, 2.0, -5.0);
        assert!(segments_cross_2d(&a0, &a1, &p(0.0, 2.0), &p(2.0, 0.0)));
    }
}
