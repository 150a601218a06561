/*

    Ray with an advisory maximum parameter. Shapes report hits
    in (0, t_max) only; callers tighten t_max with the closest
    hit found so far.

    Directions are NOT required to be normalized: rays moved to
    object space keep whatever length the transform gives them.

    @date: Oct, 2025
    @author: bartu
*/

use crate::interval::{FloatConst, Interval};
use crate::prelude::*;


#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vector3,
    pub direction: Vector3,
    pub t_max: Float,
    pub time: Float, // set nonzero for motion blur
}

impl Ray {

    pub fn new(origin: Vector3, direction: Vector3, t_max: Float, time: Float) -> Self {
        Self {
            origin,
            direction,
            t_max,
            time,
        }
    }

    /// Unbounded ray at time zero
    pub fn new_from(origin: Vector3, direction: Vector3) -> Self {
        Self::new(origin, direction, FloatConst::INF, 0.0)
    }

    #[inline]
    pub fn at(&self, t: Float) -> Vector3 {
        self.origin + self.direction * t // r(t) = o + dt
    }

    /// Valid hit parameters, exclusive on both ends
    #[inline]
    pub fn t_range(&self) -> Interval {
        Interval::new(0.0, self.t_max)
    }
}
