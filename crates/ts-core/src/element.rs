//! Element types a table can hold

use std::fmt::Debug;
use std::ops::{Add, Sub};

use glam::{DVec3, Vec3};

/// A value stored in a table cell.
///
/// Interpolation only needs vector-space arithmetic: addition, subtraction
/// and scaling by a real factor.
pub trait Element:
    Copy + PartialEq + Debug + Send + Sync + 'static + Add<Output = Self> + Sub<Output = Self>
{
    /// Multiply by a scalar factor
    fn scale(self, factor: f64) -> Self;

    /// Point on the line from `prev` to `next` at `fraction`
    fn lerp(prev: Self, next: Self, fraction: f64) -> Self {
        prev + (next - prev).scale(fraction)
    }
}

impl Element for f64 {
    fn scale(self, factor: f64) -> Self {
        self * factor
    }
}

impl Element for f32 {
    fn scale(self, factor: f64) -> Self {
        (self as f64 * factor) as f32
    }
}

impl Element for DVec3 {
    fn scale(self, factor: f64) -> Self {
        self * factor
    }
}

impl Element for Vec3 {
    fn scale(self, factor: f64) -> Self {
        self * factor as f32
    }
}
