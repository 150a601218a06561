/*

    Interaction records.

    - Interaction: a point on a surface with its normal and error
      bound, returned by shape sampling and used as the reference
      point for solid angle conversions.
    - SurfaceInteraction: a full hit record (parametrization and
      tangent frame) produced by Shape::intersect.

    DISCLAIMER: Field layout and the ray spawning logic follow
    the approach presented in Physically Based Rendering (3rd ed.),
    ch. 2.10 and 3.9.

    @date: Nov, 2025
    @author: bartu
*/

use std::fmt::{self, Debug};

use crate::prelude::*;
use crate::ray::Ray;
use crate::shapes::Shape;
use crate::transform::Transform;

/// Shadow rays stop this fraction short of their target
pub const SHADOW_EPSILON: Float = 0.0001;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Interaction {
    pub p: Vector3,
    pub p_error: Vector3,
    pub n: Vector3, // zero for reference points off any surface
    pub wo: Vector3,
    pub time: Float,
}

impl Interaction {
    pub fn new(p: Vector3, p_error: Vector3, n: Vector3, wo: Vector3, time: Float) -> Self {
        Self { p, p_error, n, wo, time }
    }

    /// A bare point, exact and without a normal
    pub fn from_point(p: Vector3, time: Float) -> Self {
        Self { p, time, ..Default::default() }
    }

    pub fn spawn_ray(&self, d: Vector3) -> Ray {
        let o = offset_ray_origin(self.p, self.p_error, self.n, d);
        Ray::new(o, d, FloatConst::INF, self.time)
    }

    /// Ray towards a point, reaching just short of it (t in (0, 1 - SHADOW_EPSILON))
    pub fn spawn_ray_to(&self, p: Vector3) -> Ray {
        let o = offset_ray_origin(self.p, self.p_error, self.n, p - self.p);
        Ray::new(o, p - o, 1.0 - SHADOW_EPSILON, self.time)
    }

    /// Ray towards another interaction, offsetting both endpoints off their surfaces
    pub fn spawn_ray_to_interaction(&self, it: &Interaction) -> Ray {
        let origin = offset_ray_origin(self.p, self.p_error, self.n, it.p - self.p);
        let target = offset_ray_origin(it.p, it.p_error, it.n, origin - it.p);
        Ray::new(origin, target - origin, 1.0 - SHADOW_EPSILON, self.time)
    }
}

/// Move `p` along `n` past its error box, to the side `w` points to.
/// Each component is then rounded away from `p` so the offset survives rounding.
pub fn offset_ray_origin(p: Vector3, p_error: Vector3, n: Vector3, w: Vector3) -> Vector3 {
    let d = n.abs().dot(p_error);
    let mut offset = n * d;
    if w.dot(n) < 0.0 {
        offset = -offset;
    }
    let mut po = p + offset;
    for i in 0..3 {
        if offset[i] > 0.0 {
            po[i] = next_float_up(po[i]);
        } else if offset[i] < 0.0 {
            po[i] = next_float_down(po[i]);
        }
    }
    po
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Shading {
    pub n: Vector3,
    pub dpdu: Vector3,
    pub dpdv: Vector3,
    pub dndu: Vector3,
    pub dndv: Vector3,
}

#[derive(Clone, Copy)]
pub struct SurfaceInteraction<'a> {
    pub p: Vector3,
    pub p_error: Vector3,
    pub n: Vector3,
    pub wo: Vector3,
    pub time: Float,

    pub uv: Vector2,
    pub dpdu: Vector3,
    pub dpdv: Vector3,
    pub dndu: Vector3,
    pub dndv: Vector3,
    pub shading: Shading,

    pub shape: Option<&'a dyn Shape>,
}

impl<'a> SurfaceInteraction<'a> {

    /// Geometric normal is normalize(dpdu x dpdv), flipped when the
    /// shape reverses orientation xor its transform swaps handedness.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        p: Vector3,
        p_error: Vector3,
        uv: Vector2,
        wo: Vector3,
        dpdu: Vector3,
        dpdv: Vector3,
        dndu: Vector3,
        dndv: Vector3,
        time: Float,
        shape: Option<&'a dyn Shape>,
    ) -> Self {
        let mut n = dpdu.cross(dpdv).normalize();
        let flip = shape.is_some_and(|s| s.base().reverse_orientation ^ s.base().transform_swaps_handedness);
        if flip {
            n = -n;
        }

        Self {
            p,
            p_error,
            n,
            wo,
            time,
            uv,
            dpdu,
            dpdv,
            dndu,
            dndv,
            shading: Shading { n, dpdu, dpdv, dndu, dndv },
            shape,
        }
    }

    /// Carry the whole record through `t`, propagating the position error.
    pub fn transform(&self, t: &Transform) -> Self {
        let (p, p_error) = t.apply_point_with_abs_error(self.p, self.p_error);
        let n = t.apply_normal(self.n).normalize();
        let shading_n = face_forward(t.apply_normal(self.shading.n).normalize(), n);

        Self {
            p,
            p_error,
            n,
            wo: t.apply_vector(self.wo).normalize_or_zero(),
            time: self.time,
            uv: self.uv,
            dpdu: t.apply_vector(self.dpdu),
            dpdv: t.apply_vector(self.dpdv),
            dndu: t.apply_normal(self.dndu),
            dndv: t.apply_normal(self.dndv),
            shading: Shading {
                n: shading_n,
                dpdu: t.apply_vector(self.shading.dpdu),
                dpdv: t.apply_vector(self.shading.dpdv),
                dndu: t.apply_normal(self.shading.dndu),
                dndv: t.apply_normal(self.shading.dndv),
            },
            shape: self.shape,
        }
    }

    pub fn as_interaction(&self) -> Interaction {
        Interaction::new(self.p, self.p_error, self.n, self.wo, self.time)
    }

    pub fn spawn_ray(&self, d: Vector3) -> Ray {
        self.as_interaction().spawn_ray(d)
    }

    pub fn spawn_ray_to(&self, it: &Interaction) -> Ray {
        self.as_interaction().spawn_ray_to_interaction(it)
    }
}

// Shapes are not compared or printed in full, just whether one is attached
impl Debug for SurfaceInteraction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceInteraction")
            .field("p", &self.p)
            .field("p_error", &self.p_error)
            .field("n", &self.n)
            .field("wo", &self.wo)
            .field("time", &self.time)
            .field("uv", &self.uv)
            .field("dpdu", &self.dpdu)
            .field("dpdv", &self.dpdv)
            .field("shading", &self.shading)
            .field("has_shape", &self.shape.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Vector3, b: Vector3) -> bool {
        (a - b).length() < 1e-9
    }

    fn flat_record() -> SurfaceInteraction<'static> {
        SurfaceInteraction::new(
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::ZERO,
            Vector2::new(0.25, 0.75),
            -Vector3::Z,
            Vector3::X,
            Vector3::Y,
            Vector3::ZERO,
            Vector3::ZERO,
            0.5,
            None,
        )
    }

    #[test]
    fn test_normal_from_tangents() {
        let si = flat_record();
        assert_eq!(si.n, Vector3::Z);
        assert_eq!(si.shading.n, Vector3::Z);
        assert_eq!(si.uv, Vector2::new(0.25, 0.75));
    }

    #[test]
    fn test_transform_moves_point_and_keeps_frame_consistent() {
        let t = Transform::translate(Vector3::new(1.0, 2.0, 3.0)).compose(&Transform::rotate(90.0, Vector3::X));
        let world = flat_record().transform(&t);

        // (0,0,1) rotated about x by 90 degrees is (0,-1,0), then translated
        assert!(approx_eq(world.p, Vector3::new(1.0, 1.0, 3.0)));
        assert!(approx_eq(world.n, Vector3::new(0.0, -1.0, 0.0)));
        assert!(approx_eq(world.dpdv, Vector3::Z));
        assert!((world.n.length() - 1.0).abs() < 1e-12);
        assert!((world.wo.length() - 1.0).abs() < 1e-12);
        assert!(world.shading.n.dot(world.n) > 0.0);
        assert!(world.p_error.max_element() > 0.0);
        assert_eq!(world.time, 0.5);
    }

    #[test]
    fn test_offset_ray_origin_sides() {
        let p = Vector3::new(0.0, 0.0, 1.0);
        let err = Vector3::splat(1e-6);
        let above = offset_ray_origin(p, err, Vector3::Z, Vector3::Z);
        let below = offset_ray_origin(p, err, Vector3::Z, -Vector3::Z);
        assert!(above.z > 1.0 + 1e-7);
        assert!(below.z < 1.0 - 1e-7);
        assert_eq!(above.x, 0.0);
    }

    #[test]
    fn test_spawn_ray_to_stops_short() {
        let from = Interaction::from_point(Vector3::ZERO, 0.0);
        let ray = from.spawn_ray_to(Vector3::new(0.0, 0.0, 2.0));
        assert_eq!(ray.direction, Vector3::new(0.0, 0.0, 2.0));
        assert!(ray.t_max < 1.0);
        assert!(ray.at(ray.t_max).z < 2.0);
    }

    #[test]
    fn test_spawn_ray_between_surfaces() {
        let floor = Interaction::new(Vector3::ZERO, Vector3::splat(1e-9), Vector3::Z, Vector3::Z, 0.0);
        let light = Interaction::new(Vector3::new(0.0, 0.0, 3.0), Vector3::splat(1e-9), -Vector3::Z, -Vector3::Z, 0.0);
        let ray = floor.spawn_ray_to_interaction(&light);
        assert!(ray.origin.z > 0.0);
        assert!(ray.at(1.0).z < 3.0);
    }
}
