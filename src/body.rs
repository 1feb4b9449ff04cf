use crate::{error::CollideError, math, Fp, Mat2, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Box,
    Circle,
    /// Carried for bodies owned by the wider engine. No contact routine handles it.
    Triangle,
}

/// The narrow phase's view of a rigid body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Posistion of the centre
    pub pos: Vec2,
    /// Orientation in radians
    pub rot: Fp,
    /// Full extents for boxes. Circles keep their diameter in `width.x`.
    pub width: Vec2,
    pub shape: ShapeKind,
}

impl Body {
    pub fn new(shape: ShapeKind, pos: Vec2, rot: Fp, width: Vec2) -> Result<Body, CollideError> {
        //! Rejects non-finite placement and extents that are not strictly positive.
        if !pos.is_finite() || !rot.is_finite() {
            return Err(CollideError::InvalidBody("non-finite position or angle"));
        }
        if !width.is_finite() || width.x <= 0.0 || width.y <= 0.0 {
            return Err(CollideError::InvalidBody("extents must be positive and finite"));
        }
        Ok(Body { pos, rot, width, shape })
    }

    pub fn cuboid(pos: Vec2, rot: Fp, width: Vec2) -> Result<Body, CollideError> {
        Body::new(ShapeKind::Box, pos, rot, width)
    }
    pub fn circle(pos: Vec2, radius: Fp) -> Result<Body, CollideError> {
        Body::new(ShapeKind::Circle, pos, 0.0, Vec2::splat(radius * 2.0))
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.width * 0.5
    }
    #[inline]
    pub fn radius(&self) -> Fp {
        //! Circle radius. Only meaningful for `ShapeKind::Circle`.
        self.width.x * 0.5
    }
    #[inline]
    pub fn rotation(&self) -> Mat2 {
        math::rotation(self.rot)
    }
}
