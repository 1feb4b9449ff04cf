//! Narrowphase data and logic module.

pub mod boxes;
pub mod round;

use crate::{
    body::{Body, ShapeKind},
    error::CollideError,
    feature::{Edge, FeaturePair},
    math, Fp, Mat2, Vec2,
};
use tracing::debug;

/// Upper bound on contacts produced by one pair.
pub const MAX_CONTACTS: usize = 2;
/// An axis must beat the current best by this factor to replace it.
pub const RELATIVE_TOL: Fp = 0.95;
/// Scaled by the candidate face's half extent.
pub const ABSOLUTE_TOL: Fp = 0.01;
/// Squared centre distance at which box-circle contacts switch to the rounded-corner approximation.
pub const CORNER_THRESHOLD: Fp = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NarrowConfig {
    pub relative_tol: Fp,
    pub absolute_tol: Fp,
    pub corner_threshold: Fp,
}
impl Default for NarrowConfig {
    fn default() -> Self {
        NarrowConfig {
            relative_tol: RELATIVE_TOL,
            absolute_tol: ABSOLUTE_TOL,
            corner_threshold: CORNER_THRESHOLD,
        }
    }
}
impl NarrowConfig {
    #[inline]
    fn prefers(&self, candidate: Fp, current: Fp, half_extent: Fp) -> bool {
        //! Whether the face separation `candidate` should replace `current`. Earlier axes win near-ties.
        candidate > self.relative_tol * current + self.absolute_tol * half_extent
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Contact {
    /// World-space point, lying on the reference face.
    pub position: Vec2,
    /// Unit normal pointing from body A toward body B.
    pub normal: Vec2,
    /// Never positive. Its magnitude is the penetration depth.
    pub separation: Fp,
    pub feature: FeaturePair,
}
impl Contact {
    #[inline]
    pub fn flipped(self) -> Contact {
        //! The same contact seen with A and B swapped.
        Contact {
            normal: -self.normal,
            feature: self.feature.flip(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}
impl Side {
    #[inline]
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// How a pair touched, reported alongside the contacts instead of being written into the bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Touch {
    Apart,
    /// Box-box, clipped against a reference face.
    Face,
    /// Circle-circle.
    Round,
    /// Box-circle, with the box approximated by its circumscribed circle.
    Corner,
    /// A circle resting against a box face. `circle` names which body is the circle.
    Rest { circle: Side },
}
impl Touch {
    #[inline]
    pub fn mirrored(self) -> Touch {
        match self {
            Touch::Rest { circle } => Touch::Rest { circle: circle.other() },
            t => t,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    /// Number of contacts written, at most `MAX_CONTACTS`.
    pub count: usize,
    pub touch: Touch,
}
impl Collision {
    pub const APART: Collision = Collision { count: 0, touch: Touch::Apart };

    #[inline]
    pub fn is_touching(&self) -> bool {
        self.count > 0
    }
}

// ---------- Clipping ---------- //

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClipVertex {
    pub v: Vec2,
    pub fp: FeaturePair,
}

pub fn clip_segment_to_line(v_in: &[ClipVertex; 2], normal: Vec2, offset: Fp, clip_edge: Edge) -> ([ClipVertex; 2], usize) {
    //! Keeps the part of segment `v_in` behind the line `normal . p = offset`. Returns the points and their count.
    //! A point created by the cut takes `clip_edge` as its incoming edge when `v_in[0]` was cut away, else as its outgoing edge.
    let mut v_out = [ClipVertex::default(); 2];
    let mut num_out = 0;

    let distance0 = normal.dot(v_in[0].v) - offset;
    let distance1 = normal.dot(v_in[1].v) - offset;

    if distance0 <= 0.0 {
        v_out[num_out] = v_in[0];
        num_out += 1;
    }
    if distance1 <= 0.0 {
        v_out[num_out] = v_in[1];
        num_out += 1;
    }

    // opposite sides: exactly one point was kept above
    if distance0 * distance1 < 0.0 {
        let interp = distance0 / (distance0 - distance1);
        let v = v_in[0].v + (v_in[1].v - v_in[0].v) * interp;
        let fp = if distance0 > 0.0 {
            FeaturePair { in_a: clip_edge, in_b: Edge::None, ..v_in[0].fp }
        } else {
            FeaturePair { out_a: clip_edge, out_b: Edge::None, ..v_in[1].fp }
        };
        v_out[num_out] = ClipVertex { v, fp };
        num_out += 1;
    }

    (v_out, num_out)
}

// ---------- Incident edge ---------- //

/// Local corners (in half-extent units) and their bounding edges, indexed by the face opposing the reference normal: +x, -x, +y, -y.
const INCIDENT_EDGES: [[([Fp; 2], Edge, Edge); 2]; 4] = [
    [([1.0, -1.0], Edge::E3, Edge::E4), ([1.0, 1.0], Edge::E4, Edge::E1)],
    [([-1.0, 1.0], Edge::E1, Edge::E2), ([-1.0, -1.0], Edge::E2, Edge::E3)],
    [([1.0, 1.0], Edge::E4, Edge::E1), ([-1.0, 1.0], Edge::E1, Edge::E2)],
    [([-1.0, -1.0], Edge::E2, Edge::E3), ([1.0, -1.0], Edge::E3, Edge::E4)],
];

pub fn incident_edge(h: Vec2, pos: Vec2, rot: Mat2, normal: Vec2) -> [ClipVertex; 2] {
    //! Returns the world-space endpoints of the box edge most anti-parallel to the reference `normal`,
    //! tagged with the box's own edges in the B slots of the feature pair.
    let n = -math::to_local(rot, normal);
    let n_abs = n.abs();

    let face = if n_abs.x > n_abs.y {
        if math::sign_nonneg(n.x) { 0 } else { 1 }
    } else if math::sign_nonneg(n.y) {
        2
    } else {
        3
    };

    let mut c = [ClipVertex::default(); 2];
    for (cv, &(corner, in_edge, out_edge)) in c.iter_mut().zip(INCIDENT_EDGES[face].iter()) {
        cv.v = math::to_world(pos, rot, Vec2::new(corner[0], corner[1]) * h);
        cv.fp.in_b = in_edge;
        cv.fp.out_b = out_edge;
    }
    c
}

// ---------- Axis selection ---------- //

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    FaceAX,
    FaceAY,
    FaceBX,
    FaceBY,
}
impl Axis {
    #[inline]
    pub(crate) fn is_y(self) -> bool {
        matches!(self, Axis::FaceAY | Axis::FaceBY)
    }
    #[inline]
    pub(crate) fn on_b(self) -> bool {
        matches!(self, Axis::FaceBX | Axis::FaceBY)
    }
}

/// Outward face normal of a box along one of its axes, facing the relative position `d` (box-local).
#[inline]
pub(crate) fn face_normal(rot: Mat2, d: Vec2, y: bool) -> Vec2 {
    let (axis, along) = if y { (rot.y_axis, d.y) } else { (rot.x_axis, d.x) };
    if along > 0.0 { axis } else { -axis }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate {
    pub axis: Axis,
    pub separation: Fp,
    /// Points from A toward B.
    pub normal: Vec2,
}
impl Candidate {
    #[inline]
    pub(crate) fn consider(&mut self, cfg: &NarrowConfig, axis: Axis, separation: Fp, half_extent: Fp, normal: Vec2) {
        if cfg.prefers(separation, self.separation, half_extent) {
            *self = Candidate { axis, separation, normal };
        }
    }
}

/// Clipping planes derived from the chosen reference face.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RefFace {
    /// Outward normal of the reference face.
    pub normal: Vec2,
    pub front: Fp,
    side_normal: Vec2,
    neg_side: Fp,
    pos_side: Fp,
    neg_edge: Edge,
    pos_edge: Edge,
}
impl RefFace {
    pub(crate) fn new(pos: Vec2, rot: Mat2, h: Vec2, normal: Vec2, y_face: bool) -> RefFace {
        let (front_extent, side_normal, side_extent, neg_edge, pos_edge) = if y_face {
            (h.y, rot.x_axis, h.x, Edge::E2, Edge::E4)
        } else {
            (h.x, rot.y_axis, h.y, Edge::E3, Edge::E1)
        };
        let side = pos.dot(side_normal);
        RefFace {
            normal,
            front: pos.dot(normal) + front_extent,
            side_normal,
            neg_side: -side + side_extent,
            pos_side: side + side_extent,
            neg_edge,
            pos_edge,
        }
    }

    pub(crate) fn clip(&self, incident: &[ClipVertex; 2]) -> Option<[ClipVertex; 2]> {
        //! Clips the incident edge to both side planes. `None` when a tangential touch leaves fewer than two points.
        let (clipped, np) = clip_segment_to_line(incident, -self.side_normal, self.neg_side, self.neg_edge);
        if np < 2 {
            return None;
        }
        let (clipped, np) = clip_segment_to_line(&clipped, self.side_normal, self.pos_side, self.pos_edge);
        if np < 2 {
            return None;
        }
        Some(clipped)
    }

    #[inline]
    pub(crate) fn separation(&self, v: Vec2) -> Fp {
        self.normal.dot(v) - self.front
    }
    #[inline]
    pub(crate) fn project(&self, v: Vec2, separation: Fp) -> Vec2 {
        //! Slides a point onto the reference face.
        v - self.normal * separation
    }
}

/// Unit vector along `d`, or `+x` when `d` is degenerate.
#[inline]
pub(crate) fn unit_or_x(d: Vec2) -> Vec2 {
    d.try_normalize().unwrap_or(Vec2::X)
}

// ---------- Dispatch ---------- //

pub fn collide(contacts: &mut [Contact; MAX_CONTACTS], a: &Body, b: &Body) -> Result<Collision, CollideError> {
    //! Writes up to two contacts for bodies `a` and `b` with the default tolerances. Normals point from `a` to `b`.
    collide_with(&NarrowConfig::default(), contacts, a, b)
}

pub fn collide_with(cfg: &NarrowConfig, contacts: &mut [Contact; MAX_CONTACTS], a: &Body, b: &Body) -> Result<Collision, CollideError> {
    match (a.shape, b.shape) {
        (ShapeKind::Box, ShapeKind::Box) => Ok(boxes::box_box(cfg, contacts, a, b)),
        (ShapeKind::Circle, ShapeKind::Circle) => Ok(round::circle_circle(contacts, a, b)),
        (ShapeKind::Box, ShapeKind::Circle) => Ok(round::box_circle(cfg, contacts, a, b)),
        (ShapeKind::Circle, ShapeKind::Box) => Ok(round::circle_box(cfg, contacts, a, b)),
        (ShapeKind::Triangle, _) | (_, ShapeKind::Triangle) => {
            debug!(a = ?a.shape, b = ?b.shape, "unsupported shape pair");
            Err(CollideError::UnsupportedPair { a: a.shape, b: b.shape })
        }
    }
}
