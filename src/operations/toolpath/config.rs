#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::math::{Point3, POINT_TOLERANCE};
use crate::tessellation::TessellationParams;

use super::ramp::DEFAULT_RAMP_SCALE;

/// Configuration for wire extraction and cut ordering, consumed by
/// [`ExtractToolpath`](super::ExtractToolpath).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ToolpathConfig {
    /// Distance below which two points are the same vertex.
    pub tolerance: f64,

    /// Tool position before the first rapid move.
    pub start_point: Point3,

    /// Cut every wire from its last point to its first.
    pub reverse: bool,

    /// Let the optimizer enter a wire from whichever end is nearer.
    pub bidirectional: bool,

    /// Soft wall-clock budget for ordering one group, in seconds.
    /// Checked once per placed wire; the rest is appended unordered.
    pub time_limit_seconds: f64,

    /// Emit components that are closed loops without any branch or
    /// leaf vertex as closed wires. When `false` they are skipped.
    pub emit_closed_loops: bool,

    /// Multiplier applied to ramp heights (negative cuts downwards).
    pub ramp_scale: f64,

    /// Tessellation used for intersection tests on curved edges.
    pub tessellation: TessellationParams,
}

impl Default for ToolpathConfig {
    fn default() -> Self {
        Self {
            tolerance: POINT_TOLERANCE,
            start_point: Point3::origin(),
            reverse: false,
            bidirectional: false,
            time_limit_seconds: 5.0,
            emit_closed_loops: false,
            ramp_scale: DEFAULT_RAMP_SCALE,
            tessellation: TessellationParams::default(),
        }
    }
}

impl ToolpathConfig {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the point identity tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the starting tool position.
    #[must_use]
    pub fn with_start_point(mut self, point: Point3) -> Self {
        self.start_point = point;
        self
    }

    /// Sets whether wires are cut in reverse.
    #[must_use]
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Sets whether wires may be entered from either end.
    #[must_use]
    pub fn with_bidirectional(mut self, bidirectional: bool) -> Self {
        self.bidirectional = bidirectional;
        self
    }

    /// Sets the ordering time budget; negative values are clamped to zero.
    #[must_use]
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit_seconds = seconds.max(0.0);
        self
    }

    /// Sets whether pure closed loops are emitted.
    #[must_use]
    pub fn with_closed_loops(mut self, emit: bool) -> Self {
        self.emit_closed_loops = emit;
        self
    }

    /// Sets the ramp height multiplier.
    #[must_use]
    pub fn with_ramp_scale(mut self, scale: f64) -> Self {
        self.ramp_scale = scale;
        self
    }

    /// Sets the tessellation parameters.
    #[must_use]
    pub fn with_tessellation(mut self, params: TessellationParams) -> Self {
        self.tessellation = params;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ToolpathConfig::default();
        assert!((config.tolerance - 1e-6).abs() < f64::EPSILON);
        assert!((config.ramp_scale + 1.0).abs() < f64::EPSILON);
        assert!(!config.reverse);
        assert!(!config.emit_closed_loops);
        assert_eq!(config.start_point, Point3::origin());
    }

    #[test]
    fn builder_sets_fields() {
        let config = ToolpathConfig::new()
            .with_tolerance(1e-3)
            .with_reverse(true)
            .with_start_point(Point3::new(10.0, 10.0, 0.0))
            .with_closed_loops(true);

        assert!((config.tolerance - 1e-3).abs() < f64::EPSILON);
        assert!(config.reverse);
        assert!(config.emit_closed_loops);
        assert_eq!(config.start_point, Point3::new(10.0, 10.0, 0.0));
    }

    #[test]
    fn time_limit_not_negative() {
        let config = ToolpathConfig::new().with_time_limit(-3.0);
        assert!(config.time_limit_seconds.abs() < f64::EPSILON);
    }
}
