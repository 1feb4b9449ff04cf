//! Narrow-phase contact generation for 2D oriented boxes and circles.
//!
//! Given two bodies, [`collide`] decides whether they overlap and fills up to
//! [`MAX_CONTACTS`] contacts, each tagged with a [`FeaturePair`] that stays equal
//! across steps while the same edges keep generating the point.

pub mod body;
pub mod cache;
pub mod error;
pub mod feature;
pub mod math;
pub mod narrow;

#[cfg(not(feature = "f64"))]
pub type Fp = f32;
#[cfg(not(feature = "f64"))]
pub type Vec2 = glam::Vec2;
#[cfg(not(feature = "f64"))]
pub type Mat2 = glam::Mat2;

#[cfg(feature = "f64")]
pub type Fp = f64;
#[cfg(feature = "f64")]
pub type Vec2 = glam::DVec2;
#[cfg(feature = "f64")]
pub type Mat2 = glam::DMat2;

pub use body::{Body, ShapeKind};
pub use cache::{point_states, ContactCache, Manifold, PointState};
pub use error::CollideError;
pub use feature::{Edge, FeaturePair};
pub use narrow::{
    collide, collide_with, Collision, Contact, NarrowConfig, Side, Touch, ABSOLUTE_TOL,
    CORNER_THRESHOLD, MAX_CONTACTS, RELATIVE_TOL,
};
