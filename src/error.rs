use crate::body::ShapeKind;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CollideError {
    /// No contact routine exists for this pair of shapes.
    #[error("no contact routine for {a:?} against {b:?}")]
    UnsupportedPair { a: ShapeKind, b: ShapeKind },
    #[error("invalid body: {0}")]
    InvalidBody(&'static str),
}
