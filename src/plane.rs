/*

    Axis-aligned rectangle ("Plane") primitive.

    A rectangle a0 < a < a1, b0 < b < b1 lying at a fixed depth c
    in object space. Which object-space axes play the roles of
    (a, b, c) is chosen by PlaneAxis, every query goes through
    PlaneAxis::remap / PlaneAxis::unmap so the three orientations
    share one code path:

        XY: (a, b, c) = (x, y, z)
        XZ: (a, b, c) = (x, z, y)
        YZ: (a, b, c) = (y, z, x)

    Boundary policy: intersect() treats the rectangle as open
    (hits exactly on an edge are misses) while intersect_p()
    treats it as closed. Shadow rays grazing a shared edge
    between two faces are therefore blocked, camera rays are not
    counted twice.

    DISCLAIMER: The intersection is based on the xy_rect approach
    in Ray Tracing: The Next Week, ch. 7 (rectangles and lights).

    @date: Nov, 2025
    @author: bartu
*/

use crate::bbox::BBox;
use crate::interaction::{Interaction, SurfaceInteraction};
use crate::interval::Interval;
use crate::prelude::*;
use crate::ray::Ray;
use crate::shapes::{Shape, ShapeBase};
use crate::transform::Transform;

/// Sampled points are lifted this far along the depth axis so that
/// a ray traced back to them does not hit the rectangle itself.
pub const SAMPLE_DEPTH_OFFSET: Float = 0.0001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum PlaneAxis {
    #[default]
    #[serde(alias = "xy")]
    XY,
    #[serde(alias = "xz")]
    XZ,
    #[serde(alias = "yz")]
    YZ,
}

impl PlaneAxis {

    /// Components of `v` as (a, b, c)
    #[inline]
    pub fn remap(self, v: Vector3) -> (Float, Float, Float) {
        match self {
            PlaneAxis::XY => (v.x, v.y, v.z),
            PlaneAxis::XZ => (v.x, v.z, v.y),
            PlaneAxis::YZ => (v.y, v.z, v.x),
        }
    }

    /// Inverse of remap
    #[inline]
    pub fn unmap(self, a: Float, b: Float, c: Float) -> Vector3 {
        match self {
            PlaneAxis::XY => Vector3::new(a, b, c),
            PlaneAxis::XZ => Vector3::new(a, c, b),
            PlaneAxis::YZ => Vector3::new(c, a, b),
        }
    }

    pub fn a_axis(self) -> Vector3 {
        self.unmap(1.0, 0.0, 0.0)
    }

    pub fn b_axis(self) -> Vector3 {
        self.unmap(0.0, 1.0, 0.0)
    }

    /// a_axis x b_axis: +z for XY, -y for XZ, +x for YZ
    pub fn normal(self) -> Vector3 {
        self.a_axis().cross(self.b_axis())
    }
}

/// Where uniform samples are placed within the rectangle's plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum PlaneSampling {
    /// (a1 - a0) * u0, (b1 - b0) * u1, measured from the axis origin.
    /// Only lands on the rectangle when a0 = b0 = 0.
    #[default]
    #[serde(rename = "extent", alias = "Extent")]
    ExtentFromOrigin,
    /// a0 + (a1 - a0) * u0, b0 + (b1 - b0) * u1
    #[serde(rename = "anchored", alias = "Anchored")]
    Anchored,
}

#[derive(Debug, Clone)]
pub struct Plane {
    base: ShapeBase,
    a: Interval,
    b: Interval,
    c: Float,
    axis: PlaneAxis,
    sampling: PlaneSampling,
}

impl Plane {

    /// Requires a0 < a1 and b0 < b1, only checked in debug builds.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        object_to_world: Arc<Transform>,
        world_to_object: Arc<Transform>,
        reverse_orientation: bool,
        a0: Float, a1: Float, b0: Float, b1: Float, c: Float,
        axis: PlaneAxis,
    ) -> Self {
        debug_assert!(a0 < a1, "Plane needs a0 < a1, got a0={a0} a1={a1}");
        debug_assert!(b0 < b1, "Plane needs b0 < b1, got b0={b0} b1={b1}");
        Self {
            base: ShapeBase::new(object_to_world, world_to_object, reverse_orientation),
            a: Interval::new(a0, a1),
            b: Interval::new(b0, b1),
            c,
            axis,
            sampling: PlaneSampling::default(),
        }
    }

    pub fn with_sampling(mut self, sampling: PlaneSampling) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn axis(&self) -> PlaneAxis {
        self.axis
    }

    pub fn depth(&self) -> Float {
        self.c
    }

    /// Moves `r` to object space and solves for the depth crossing.
    /// Returns the object-space ray, t and the in-plane (a, b) at t,
    /// or None when t is outside (0, t_max). A ray parallel to the
    /// plane gives t = +-inf or NaN here, both fail the range check.
    fn solve_depth(&self, r: &Ray) -> Option<(Ray, Float, Float, Float)> {
        let (ray, _o_err, _d_err) = self.base.world_to_object.apply_ray(r);

        let (ro_a, ro_b, ro_c) = self.axis.remap(ray.origin);
        let (rd_a, rd_b, rd_c) = self.axis.remap(ray.direction);

        let t_shape_hit = (self.c - ro_c) / rd_c;
        if !ray.t_range().surrounds(t_shape_hit) {
            return None;
        }

        let a = ro_a + t_shape_hit * rd_a;
        let b = ro_b + t_shape_hit * rd_b;
        Some((ray, t_shape_hit, a, b))
    }
}

impl Shape for Plane {

    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn object_bound(&self) -> BBox {
        BBox::from_corners(
            self.axis.unmap(self.a.min, self.b.min, self.c),
            self.axis.unmap(self.a.max, self.b.max, self.c),
        )
    }

    /// The stored hit point is the exact (a, b, c) point carried to world
    /// space with the record. It agrees with `r.at(t)` up to rounding.
    fn intersect(&self, r: &Ray, _test_alpha_texture: bool) -> Option<(Float, SurfaceInteraction<'_>)> {
        let (ray, t_shape_hit, a, b) = self.solve_depth(r)?;
        if !self.a.surrounds(a) || !self.b.surrounds(b) {
            return None;
        }

        // Exactly on the plane, so no local position error
        let p_hit = self.axis.unmap(a, b, self.c);
        let uv = Vector2::new(self.a.offset(a), self.b.offset(b));

        let local = SurfaceInteraction::new(
            p_hit,
            Vector3::ZERO,
            uv,
            -ray.direction,
            self.axis.a_axis(),
            self.axis.b_axis(),
            Vector3::ZERO, // flat, normal does not vary
            Vector3::ZERO,
            r.time,
            Some(self as &dyn Shape),
        );
        Some((t_shape_hit, local.transform(&self.base.object_to_world)))
    }

    fn intersect_p(&self, r: &Ray, _test_alpha_texture: bool) -> bool {
        match self.solve_depth(r) {
            Some((_, _, a, b)) => self.a.contains(a) && self.b.contains(b),
            None => false,
        }
    }

    fn area(&self) -> Float {
        self.a.size() * self.b.size()
    }

    fn sample(&self, u: Vector2) -> (Interaction, Float) {
        let (a, b) = match self.sampling {
            PlaneSampling::ExtentFromOrigin => (self.a.size() * u.x, self.b.size() * u.y),
            PlaneSampling::Anchored => (self.a.lerp(u.x), self.b.lerp(u.y)),
        };
        let p_obj = self.axis.unmap(a, b, self.c + SAMPLE_DEPTH_OFFSET);

        let o2w = &self.base.object_to_world;
        let mut n = o2w.apply_normal(self.axis.normal()).normalize();
        if self.base.reverse_orientation ^ self.base.transform_swaps_handedness {
            n = -n;
        }
        let (p, p_error) = o2w.apply_point_with_abs_error(p_obj, Vector3::ZERO);

        (Interaction::new(p, p_error, n, Vector3::ZERO, 0.0), 1.0 / self.area())
    }
}

#[allow(clippy::too_many_arguments)]
pub fn create_plane_shape(
    object_to_world: &Arc<Transform>,
    world_to_object: &Arc<Transform>,
    reverse_orientation: bool,
    a0: Float, a1: Float, b0: Float, b1: Float, c: Float,
    axis: PlaneAxis,
) -> Arc<Plane> {
    Arc::new(Plane::new(
        Arc::clone(object_to_world),
        Arc::clone(world_to_object),
        reverse_orientation,
        a0, a1, b0, b1, c,
        axis,
    ))
}

/// Six faces of the box spanned by `p_min` and `p_max`, one per
/// orientation at each end of its depth axis, all sharing the
/// transform pair. Corners are reordered component-wise first.
pub fn create_aabb_shape(
    object_to_world: &Arc<Transform>,
    world_to_object: &Arc<Transform>,
    reverse_orientation: bool,
    p_min: Vector3,
    p_max: Vector3,
) -> Vec<Arc<Plane>> {
    let (lo, hi) = (p_min.min(p_max), p_min.max(p_max));
    let face = |a0, a1, b0, b1, c, axis| {
        create_plane_shape(object_to_world, world_to_object, reverse_orientation, a0, a1, b0, b1, c, axis)
    };

    vec![
        // XY Plane
        face(lo.x, hi.x, lo.y, hi.y, lo.z, PlaneAxis::XY),
        face(lo.x, hi.x, lo.y, hi.y, hi.z, PlaneAxis::XY),
        // XZ Plane
        face(lo.x, hi.x, lo.z, hi.z, lo.y, PlaneAxis::XZ),
        face(lo.x, hi.x, lo.z, hi.z, hi.y, PlaneAxis::XZ),
        // YZ Plane
        face(lo.y, hi.y, lo.z, hi.z, lo.x, PlaneAxis::YZ),
        face(lo.y, hi.y, lo.z, hi.z, hi.x, PlaneAxis::YZ),
    ]
}
