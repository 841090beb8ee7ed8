use super::Point3;

/// Returns the minimum planar distance from `p` to the segment `a`→`b`.
///
/// Z coordinates are ignored.
#[must_use]
pub fn point_to_segment_dist(p: &Point3, a: &Point3, b: &Point3) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return (p.x - a.x).hypot(p.y - a.y);
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq;
    let t = t.clamp(0.0, 1.0);

    let closest_x = a.x + t * dx;
    let closest_y = a.y + t * dy;

    (p.x - closest_x).hypot(p.y - closest_y)
}

/// Returns the minimum planar distance between segments `a0`→`a1` and `b0`→`b1`,
/// or zero if they cross.
#[must_use]
pub fn segment_to_segment_dist(a0: &Point3, a1: &Point3, b0: &Point3, b1: &Point3) -> f64 {
    if super::intersect_2d::segments_cross_2d(a0, a1, b0, b1) {
        return 0.0;
    }
    point_to_segment_dist(a0, b0, b1)
        .min(point_to_segment_dist(a1, b0, b1))
        .min(point_to_segment_dist(b0, a0, a1))
        .min(point_to_segment_dist(b1, a0, a1))
}
