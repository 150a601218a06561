/*

    Affine transform with its cached inverse.

    Shapes hold an object-to-world / world-to-object pair of
    these behind Arc so that many shapes (e.g. the six faces of
    a box) can share one pair owned by the scene.

    Point and ray application also return conservative bounds on
    the rounding error introduced, which hit records carry along
    so that spawned rays can step off the surface safely.

    @date: Nov, 2025
    @author: bartu
*/

use crate::bbox::BBox;
use crate::prelude::*;
use crate::ray::Ray;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    m: Matrix4,
    m_inv: Matrix4,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {

    pub const IDENTITY: Self = Self {
        m: Matrix4::IDENTITY,
        m_inv: Matrix4::IDENTITY,
    };

    pub fn from_pair(m: Matrix4, m_inv: Matrix4) -> Self {
        Self { m, m_inv }
    }

    pub fn translate(delta: Vector3) -> Self {
        Self::from_pair(Matrix4::from_translation(delta), Matrix4::from_translation(-delta))
    }

    pub fn scale(s: Vector3) -> Self {
        Self::from_pair(Matrix4::from_scale(s), Matrix4::from_scale(s.recip()))
    }

    /// Rotation of `degrees` around `axis` (normalized here)
    pub fn rotate(degrees: Float, axis: Vector3) -> Self {
        let m = Matrix4::from_axis_angle(axis.normalize(), degrees.to_radians());
        Self::from_pair(m, m.transpose())
    }

    pub fn matrix(&self) -> &Matrix4 {
        &self.m
    }

    pub fn inverse_matrix(&self) -> &Matrix4 {
        &self.m_inv
    }

    pub fn inverse(&self) -> Self {
        Self::from_pair(self.m_inv, self.m)
    }

    /// Apply `self` after `first`
    pub fn compose(&self, first: &Transform) -> Self {
        Self::from_pair(self.m * first.m, first.m_inv * self.m_inv)
    }

    pub fn is_identity(&self) -> bool {
        self.m == Matrix4::IDENTITY
    }

    pub fn swaps_handedness(&self) -> bool {
        Matrix3::from_mat4(self.m).determinant() < 0.0
    }

    #[inline]
    pub fn apply_point(&self, p: Vector3) -> Vector3 {
        self.m.project_point3(p)
    }

    #[inline]
    pub fn apply_vector(&self, v: Vector3) -> Vector3 {
        self.m.transform_vector3(v)
    }

    /// Normals go through the inverse transpose, left unnormalized
    #[inline]
    pub fn apply_normal(&self, n: Vector3) -> Vector3 {
        self.m_inv.transpose().transform_vector3(n)
    }

    /// Transformed point together with an absolute error bound
    pub fn apply_point_with_error(&self, p: Vector3) -> (Vector3, Vector3) {
        let p_err = Vector3::new(
            self.row_abs_sum(0, p, 1.0),
            self.row_abs_sum(1, p, 1.0),
            self.row_abs_sum(2, p, 1.0),
        ) * gamma(3);
        (self.apply_point(p), p_err)
    }

    /// Like apply_point_with_error, but `p` already carries error `p_in_err`
    pub fn apply_point_with_abs_error(&self, p: Vector3, p_in_err: Vector3) -> (Vector3, Vector3) {
        let carried = Vector3::new(
            self.row_abs_sum(0, p_in_err, 0.0),
            self.row_abs_sum(1, p_in_err, 0.0),
            self.row_abs_sum(2, p_in_err, 0.0),
        );
        let fresh = Vector3::new(
            self.row_abs_sum(0, p, 1.0),
            self.row_abs_sum(1, p, 1.0),
            self.row_abs_sum(2, p, 1.0),
        );
        let p_err = carried * (gamma(3) + 1.0) + fresh * gamma(3);
        (self.apply_point(p), p_err)
    }

    pub fn apply_vector_with_error(&self, v: Vector3) -> (Vector3, Vector3) {
        let v_err = Vector3::new(
            self.row_abs_sum(0, v, 0.0),
            self.row_abs_sum(1, v, 0.0),
            self.row_abs_sum(2, v, 0.0),
        ) * gamma(3);
        (self.apply_vector(v), v_err)
    }

    /// Transform a ray, returning it with the origin and direction error bounds.
    ///
    /// The origin is pushed forward along the direction by the error
    /// bound so that it cannot land behind a surface it started on,
    /// and t_max shrinks by the same amount.
    pub fn apply_ray(&self, r: &Ray) -> (Ray, Vector3, Vector3) {
        let (mut origin, o_err) = self.apply_point_with_error(r.origin);
        let (direction, d_err) = self.apply_vector_with_error(r.direction);

        let length_squared = direction.length_squared();
        let mut t_max = r.t_max;
        if length_squared > 0.0 {
            let dt = direction.abs().dot(o_err) / length_squared;
            origin += direction * dt;
            t_max -= dt;
        }
        (Ray::new(origin, direction, t_max, r.time), o_err, d_err)
    }

    /// Bound of the eight transformed corners
    pub fn apply_bbox(&self, b: &BBox) -> BBox {
        let first = self.apply_point(b.corner(0));
        let mut out = BBox::from_corners(first, first);
        for i in 1..8 {
            let p = self.apply_point(b.corner(i));
            out = out.union(&BBox::from_corners(p, p));
        }
        out
    }

    // sum_j |m[row][j] * v[j]| plus |m[row][3] * w|
    #[inline]
    fn row_abs_sum(&self, row: usize, v: Vector3, w: Float) -> Float {
        let r = self.m.row(row);
        (r.x * v.x).abs() + (r.y * v.y).abs() + (r.z * v.z).abs() + (r.w * w).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Vector3, b: Vector3) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_translate_point_and_vector() {
        let t = Transform::translate(Vector3::new(10.0, 20.0, 30.0));
        assert_eq!(t.apply_point(Vector3::new(1.0, 2.0, 3.0)), Vector3::new(11.0, 22.0, 33.0));
        // Translation does not affect vectors or normals
        assert_eq!(t.apply_vector(Vector3::X), Vector3::X);
        assert_eq!(t.apply_normal(Vector3::Y), Vector3::Y);
    }

    #[test]
    fn test_inverse_round_trip() {
        let t = Transform::translate(Vector3::new(1.0, -2.0, 0.5))
            .compose(&Transform::rotate(30.0, Vector3::new(1.0, 1.0, 0.0)))
            .compose(&Transform::scale(Vector3::new(2.0, 3.0, 4.0)));
        let p = Vector3::new(0.3, -0.7, 5.0);
        let back = t.inverse().apply_point(t.apply_point(p));
        assert!(approx_eq(back, p));

        let rebuilt = Transform::from_pair(*t.matrix(), t.matrix().inverse());
        assert!(approx_eq(rebuilt.inverse().apply_point(t.apply_point(p)), p));
    }

    #[test]
    fn test_normal_uses_inverse_transpose() {
        // Squash y: the plane x + y = 0 keeps its normal perpendicular
        let t = Transform::scale(Vector3::new(1.0, 0.5, 1.0));
        let n = t.apply_normal(Vector3::new(1.0, 1.0, 0.0));
        let tangent = t.apply_vector(Vector3::new(1.0, -1.0, 0.0));
        assert!(n.dot(tangent).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_maps_axes() {
        let t = Transform::rotate(90.0, Vector3::Z);
        assert!(approx_eq(t.apply_vector(Vector3::X), Vector3::Y));
        assert!(!t.swaps_handedness());
    }

    #[test]
    fn test_mirror_swaps_handedness() {
        let t = Transform::scale(Vector3::new(-1.0, 1.0, 1.0));
        assert!(t.swaps_handedness());
        assert!(!Transform::IDENTITY.swaps_handedness());
    }

    #[test]
    fn test_identity_ray_has_no_error() {
        let ray = Ray::new(Vector3::ZERO, Vector3::Z, 7.0, 0.25);
        let (local, o_err, d_err) = Transform::IDENTITY.apply_ray(&ray);
        assert_eq!(local, ray);
        assert_eq!(o_err, Vector3::ZERO);
        assert!(d_err.max_element() <= gamma(3));
    }

    #[test]
    fn test_ray_error_advances_origin() {
        let t = Transform::translate(Vector3::new(3.0, 0.0, 0.0));
        let ray = Ray::new(Vector3::new(1.0, 0.0, 0.0), Vector3::X, 10.0, 0.0);
        let (local, o_err, _) = t.apply_ray(&ray);
        assert!(o_err.x > 0.0);
        assert!(local.origin.x > 4.0);
        assert!(local.t_max < 10.0);
        assert!((local.origin.x - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_apply_bbox() {
        let t = Transform::translate(Vector3::splat(5.0));
        let b = t.apply_bbox(&BBox::from_corners(Vector3::ZERO, Vector3::ONE));
        assert!(approx_eq(b.p_min(), Vector3::splat(5.0)));
        assert!(approx_eq(b.p_max(), Vector3::splat(6.0)));

        let r = Transform::rotate(90.0, Vector3::Z);
        let b = r.apply_bbox(&BBox::from_corners(Vector3::ZERO, Vector3::new(2.0, 1.0, 1.0)));
        assert!(approx_eq(b.p_min(), Vector3::new(-1.0, 0.0, 0.0)));
        assert!(approx_eq(b.p_max(), Vector3::new(0.0, 2.0, 1.0)));
    }
}
