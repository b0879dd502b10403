use crate::align_zero;

/// A range of ray distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Distances a surface may report for a ray: `(0, max_distance]`.
    pub fn ray(max_distance: f64) -> Self {
        Self::new(0.0, max_distance)
    }

    /// Returns true if x lies in (min, max], comparing with the shared tolerance.
    ///
    /// A value within epsilon of `min` is rejected, a value within epsilon of
    /// `max` is accepted.
    pub fn admits(&self, x: f64) -> bool {
        align_zero(x - self.min) > 0.0 && (self.max == f64::INFINITY || align_zero(x - self.max) <= 0.0)
    }
}
