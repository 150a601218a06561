/*

    Declare numeric types used throughout this repo.

    WARNING: If you like to use f32 instead of f64
    during computations, you need to change all of these:
    pub type Float = f32;
    pub type Vector3 = Vec3; (and the other aliases)

    The error bound helpers below assume IEEE-754 doubles.

    @date: 2 Oct, 2025
    @author: Bartu
*/

use bevy_math::{DMat3, DMat4, DVec2, DVec3};

pub type Float = f64; // WARNING: If you want to change it to f32, don't forget to update vector and matrix types
pub type Vector2 = DVec2;
pub type Vector3 = DVec3;
pub type Matrix3 = DMat3;
pub type Matrix4 = DMat4;

/// Half of the distance between 1.0 and the next representable Float.
pub const MACHINE_EPSILON: Float = Float::EPSILON * 0.5;

pub fn approx_zero(x: Float) -> bool {
    x.abs() < 1e-8
}

/// Conservative bound on the relative error of `n` successive
/// floating-point operations, i.e. n*eps / (1 - n*eps).
#[inline]
pub fn gamma(n: i32) -> Float {
    let n = n as Float;
    (n * MACHINE_EPSILON) / (1.0 - n * MACHINE_EPSILON)
}

/// Smallest Float strictly greater than `v` (infinity stays put).
pub fn next_float_up(v: Float) -> Float {
    if v.is_infinite() && v > 0.0 {
        return v;
    }
    // -0.0 and 0.0 both step to the smallest positive subnormal
    let v = if v == -0.0 { 0.0 } else { v };
    let bits = v.to_bits();
    let bits = if v >= 0.0 { bits + 1 } else { bits - 1 };
    Float::from_bits(bits)
}

/// Largest Float strictly smaller than `v` (negative infinity stays put).
pub fn next_float_down(v: Float) -> Float {
    if v.is_infinite() && v < 0.0 {
        return v;
    }
    let v = if v == 0.0 { -0.0 } else { v };
    let bits = v.to_bits();
    let bits = if v > 0.0 { bits - 1 } else { bits + 1 };
    Float::from_bits(bits)
}

/// Flip `n` so that it lies in the same hemisphere as `v`.
#[inline]
pub fn face_forward(n: Vector3, v: Vector3) -> Vector3 {
    if n.dot(v) < 0.0 { -n } else { n }
}
