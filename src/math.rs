//! Rotation helpers on top of glam's 2x2 matrices.

use crate::{Fp, Mat2, Vec2};

#[inline]
pub fn rotation(angle: Fp) -> Mat2 {
    //! Orthonormal rotation matrix. Columns are the body's local x and y axes in world space.
    Mat2::from_angle(angle)
}

#[inline]
pub fn mat_abs(m: Mat2) -> Mat2 {
    //! Componentwise absolute value.
    Mat2::from_cols(m.x_axis.abs(), m.y_axis.abs())
}

#[inline]
pub fn to_local(rot: Mat2, v: Vec2) -> Vec2 {
    //! Expresses the world vector `v` in the frame spanned by `rot`.
    rot.transpose() * v
}

#[inline]
pub fn to_world(pos: Vec2, rot: Mat2, v: Vec2) -> Vec2 {
    pos + rot * v
}

#[inline]
pub fn sign_nonneg(x: Fp) -> bool {
    //! Zero counts as positive.
    x >= 0.0
}
