/// Tolerance used when a proximity test is asked for a zero or non-finite
/// epsilon.
pub const DEFAULT_EPSILON: f32 = 0.001;

/// Slope-intercept form of the segment between two pixel endpoints.
///
/// The axes are rotated 90 degrees relative to the usual reading: the
/// primary axis is y, so the slope is run over rise and the intercept is
/// an x value.
#[derive(Debug, Clone, Copy)]
pub struct LinearMap {
    pub m: f32,
    pub b: f32,
    y1: f32,
}

impl LinearMap {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        let m = (x2 - x1) / (y2 - y1);
        let b = if x1.is_nan() { 0.0 } else { x1 };
        Self { m, b, y1 }
    }

    /// X coordinate of the line at `y`, relative to the canvas origin.
    /// Non-finite for degenerate slopes.
    pub fn x_for_y(&self, y: f32) -> f32 {
        self.m * (y - self.y1) + self.b
    }

    /// Y coordinate of the line at `x`. Non-finite for degenerate slopes.
    pub fn y_for_x(&self, x: f32) -> f32 {
        (x - self.b) / self.m + self.y1
    }

    /// Whether `(x, y)` lies within `epsilon` of the infinite extension of
    /// the line. A derived coordinate that comes out non-finite places no
    /// constraint on that axis.
    pub fn intersects(&self, x: f32, y: f32, epsilon: f32) -> bool {
        let epsilon = if epsilon > 0.0 { epsilon } else { DEFAULT_EPSILON };
        let dy = self.y_for_x(x);
        let dx = self.x_for_y(y);
        (!dy.is_finite() || (y - dy).abs() < epsilon)
            && (!dx.is_finite() || (x - dx).abs() < epsilon)
    }
}
