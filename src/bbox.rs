/*

    Axis Aligned Bounding Box.

    Boxes may be degenerate (zero extent along an axis), which
    is exactly what a flat rectangle bounds to. Nothing here
    pads them.

    @author: bartu
    @date: 9 Nov, 2025
*/

use crate::interval::Interval;
use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub xmin: Float,
    pub xmax: Float,
    pub ymin: Float,
    pub ymax: Float,
    pub zmin: Float,
    pub zmax: Float,

    pub width: Float,
    pub height: Float,
    pub depth: Float,
}

impl BBox {
    pub fn new_from(xint: &Interval, yint: &Interval, zint: &Interval) -> Self {
        debug_assert!(xint.validate() && yint.validate() && zint.validate(), "Invalid interval, found max < min");
        Self {
            xmin: xint.min,
            xmax: xint.max,
            ymin: yint.min,
            ymax: yint.max,
            zmin: zint.min,
            zmax: zint.max,
            width: xint.max - xint.min,
            height: yint.max - yint.min,
            depth: zint.max - zint.min,
        }
    }

    /// Box spanned by two arbitrary opposite corners
    pub fn from_corners(p0: Vector3, p1: Vector3) -> Self {
        Self::new_from(
            &Interval::spanning(p0.x, p1.x),
            &Interval::spanning(p0.y, p1.y),
            &Interval::spanning(p0.z, p1.z),
        )
    }

    pub fn p_min(&self) -> Vector3 {
        Vector3::new(self.xmin, self.ymin, self.zmin)
    }

    pub fn p_max(&self) -> Vector3 {
        Vector3::new(self.xmax, self.ymax, self.zmax)
    }

    pub fn x_interval(&self) -> Interval {
        Interval::new(self.xmin, self.xmax)
    }

    pub fn y_interval(&self) -> Interval {
        Interval::new(self.ymin, self.ymax)
    }

    pub fn z_interval(&self) -> Interval {
        Interval::new(self.zmin, self.zmax)
    }

    /// Corner i, bit 0 selects x max, bit 1 y max, bit 2 z max
    pub fn corner(&self, i: usize) -> Vector3 {
        Vector3::new(
            if i & 1 == 0 { self.xmin } else { self.xmax },
            if i & 2 == 0 { self.ymin } else { self.ymax },
            if i & 4 == 0 { self.zmin } else { self.zmax },
        )
    }

    pub fn union(&self, other: &BBox) -> BBox {
        BBox::new_from(
            &Interval::surrounding(&self.x_interval(), &other.x_interval()),
            &Interval::surrounding(&self.y_interval(), &other.y_interval()),
            &Interval::surrounding(&self.z_interval(), &other.z_interval()),
        )
    }
}
