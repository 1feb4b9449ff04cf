//! Contacts involving circles.

use super::{face_normal, incident_edge, unit_or_x, Axis, Candidate, Collision, Contact, NarrowConfig, RefFace, Side, Touch, MAX_CONTACTS};
use crate::{body::Body, feature::FeaturePair, math, Fp, Vec2};

#[inline]
fn sphere_contact(pos_a: Vec2, r_a: Fp, pos_b: Vec2, r_b: Fp) -> Option<Contact> {
    //! Single contact between two discs, midway between their surface points.
    let dp = pos_b - pos_a;
    let radius = r_a + r_b;
    if dp.length_squared() > radius * radius {
        return None;
    }

    let normal = unit_or_x(dp);
    let c_a = pos_a + normal * r_a;
    let c_b = pos_b - normal * r_b;
    Some(Contact {
        position: (c_a + c_b) * 0.5,
        normal,
        separation: (c_b - c_a).dot(normal),
        feature: FeaturePair::default(),
    })
}

pub fn circle_circle(contacts: &mut [Contact; MAX_CONTACTS], a: &Body, b: &Body) -> Collision {
    match sphere_contact(a.pos, a.radius(), b.pos, b.radius()) {
        Some(contact) => {
            contacts[0] = contact;
            Collision { count: 1, touch: Touch::Round }
        }
        None => Collision::APART,
    }
}

pub fn box_circle(cfg: &NarrowConfig, contacts: &mut [Contact; MAX_CONTACTS], bx: &Body, circle: &Body) -> Collision {
    //! Box as A, circle as B. Emits at most one contact.
    //!
    //! Centres further apart than `corner_threshold` (squared) use the box's circumscribed circle,
    //! closer ones clip the circle's bounding square against the nearest box face.
    let h = bx.half_extents();
    let r = circle.radius();
    let rot = bx.rotation();

    let dp = circle.pos - bx.pos;
    let d = math::to_local(rot, dp);

    // the circle is treated as a square of half extent r aligned with the box
    let face = d.abs() - h - Vec2::splat(r);
    if face.x > 0.0 || face.y > 0.0 {
        return Collision::APART;
    }

    if dp.length_squared() >= cfg.corner_threshold {
        return match sphere_contact(bx.pos, h.length(), circle.pos, r) {
            Some(contact) => {
                contacts[0] = contact;
                Collision { count: 1, touch: Touch::Corner }
            }
            None => Collision::APART,
        };
    }

    let mut best = Candidate { axis: Axis::FaceAX, separation: face.x, normal: face_normal(rot, d, false) };
    best.consider(cfg, Axis::FaceAY, face.y, h.y, face_normal(rot, d, true));

    let y_face = best.axis.is_y();
    let reference = RefFace::new(bx.pos, rot, h, best.normal, y_face);
    let incident = incident_edge(Vec2::splat(r), circle.pos, rot, reference.normal);
    let clipped = match reference.clip(&incident) {
        Some(clipped) => clipped,
        None => return Collision::APART,
    };

    let extent = if y_face { h.y } else { h.x };
    let c_box = bx.pos + reference.normal * extent;
    let c_circle = circle.pos - reference.normal * r;
    let separation = (c_circle - c_box).dot(reference.normal);

    contacts[0] = Contact {
        position: (reference.project(clipped[0].v, separation) + reference.project(clipped[1].v, separation)) * 0.5,
        normal: reference.normal,
        separation,
        feature: clipped[0].fp,
    };
    Collision { count: 1, touch: Touch::Rest { circle: Side::B } }
}

pub fn circle_box(cfg: &NarrowConfig, contacts: &mut [Contact; MAX_CONTACTS], circle: &Body, bx: &Body) -> Collision {
    //! Circle as A, box as B. Same geometry as `box_circle`, seen from the circle.
    let col = box_circle(cfg, contacts, bx, circle);
    for c in contacts[..col.count].iter_mut() {
        *c = c.flipped();
    }
    Collision { count: col.count, touch: col.touch.mirrored() }
}
