/*

    Responsible for creating a struct that represents
    ranges from a to b and functionality to check if
    x is in range [a,b] or (a,b).

    NaN is never inside any interval, both checks compare
    with < or <= only.

    @author: Bartu
    @date: Sept 2025

*/

use crate::numeric::Float;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: Float,
    pub max: Float,
}

impl Interval {

    pub fn validate(&self) -> bool {
        self.max >= self.min
    }

    pub fn new(min: Float, max: Float) -> Self {
        Self {
            min,
            max,
        }
    }

    /// Interval spanning both values regardless of their order
    pub fn spanning(a: Float, b: Float) -> Self {
        Self::new(a.min(b), a.max(b))
    }

    pub fn size(&self) -> Float {
        self.max - self.min
    }

    /// Closed membership, x in [min, max]
    pub fn contains(&self, x: Float) -> bool {
        self.min <= x && x <= self.max
    }

    /// Open membership, x in (min, max)
    pub fn surrounds(&self, x: Float) -> bool {
        self.min < x && x < self.max
    }

    /// Point at fraction t of the interval, t=0 gives min
    pub fn lerp(&self, t: Float) -> Float {
        self.min + t * self.size()
    }

    /// Inverse of lerp
    pub fn offset(&self, x: Float) -> Float {
        (x - self.min) / self.size()
    }

    pub fn surrounding(a: &Interval, b: &Interval) -> Interval {
        Interval::new(a.min.min(b.min), a.max.max(b.max))
    }
}


pub trait FloatConst: Copy {
    const PI: Self;
    const INV_PI: Self;
    const INF: Self;
    const NEG_INF: Self;
}

impl FloatConst for f32 {
    const PI: Self = std::f32::consts::PI;
    const INV_PI: Self = std::f32::consts::FRAC_1_PI;
    const INF: Self = f32::INFINITY;
    const NEG_INF: Self = f32::NEG_INFINITY;
}

impl FloatConst for f64 {
    const PI: Self = std::f64::consts::PI;
    const INV_PI: Self = std::f64::consts::FRAC_1_PI;
    const INF: Self = f64::INFINITY;
    const NEG_INF: Self = f64::NEG_INFINITY;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_contains_is_closed() {
        let interval = Interval::new(0.0, 10.0);
        assert!(interval.contains(0.0));
        assert!(interval.contains(10.0));
        assert!(interval.contains(5.0));
        assert!(!interval.contains(-0.1));
        assert!(!interval.contains(10.1));
    }

    #[test]
    fn test_interval_surrounds_is_open() {
        let interval = Interval::new(0.0, 10.0);
        assert!(!interval.surrounds(0.0));
        assert!(!interval.surrounds(10.0));
        assert!(interval.surrounds(0.1));
        assert!(interval.surrounds(9.9));
    }

    #[test]
    fn test_nan_and_infinities_are_rejected() {
        let interval = Interval::new(0.0, Float::INFINITY);
        assert!(!interval.contains(Float::NAN));
        assert!(!interval.surrounds(Float::NAN));
        assert!(!interval.surrounds(Float::INFINITY));
        assert!(!interval.surrounds(Float::NEG_INFINITY));
    }

    #[test]
    fn test_lerp_and_offset() {
        let interval = Interval::new(-1.0, 3.0);
        assert_eq!(interval.lerp(0.0), -1.0);
        assert_eq!(interval.lerp(0.5), 1.0);
        assert_eq!(interval.offset(1.0), 0.5);
        assert_eq!(interval.offset(3.0), 1.0);
    }

    #[test]
    fn test_spanning_and_surrounding() {
        assert!(!Interval::new(2.0, -1.0).validate());
        assert_eq!(Interval::spanning(4.0, 1.0), Interval::new(1.0, 4.0));
        let merged = Interval::surrounding(&Interval::new(-1.0, 0.5), &Interval::new(0.0, 2.0));
        assert_eq!(merged, Interval::new(-1.0, 2.0));
    }
}
