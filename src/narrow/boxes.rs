//! Oriented box against oriented box.

use super::{face_normal, incident_edge, Axis, Candidate, Collision, Contact, NarrowConfig, RefFace, Touch, MAX_CONTACTS};
use crate::{body::Body, math};

pub fn box_box(cfg: &NarrowConfig, contacts: &mut [Contact; MAX_CONTACTS], a: &Body, b: &Body) -> Collision {
    //! Separating axis test over both boxes' face normals, then clips the incident edge to the reference face.
    let h_a = a.half_extents();
    let h_b = b.half_extents();

    let rot_a = a.rotation();
    let rot_b = b.rotation();
    let rot_at = rot_a.transpose();
    let rot_bt = rot_b.transpose();

    let dp = b.pos - a.pos;
    let d_a = rot_at * dp;
    let d_b = rot_bt * dp;

    let abs_c = math::mat_abs(rot_at * rot_b);
    let abs_ct = abs_c.transpose();

    let face_a = d_a.abs() - h_a - abs_c * h_b;
    if face_a.x > 0.0 || face_a.y > 0.0 {
        return Collision::APART;
    }
    let face_b = d_b.abs() - abs_ct * h_a - h_b;
    if face_b.x > 0.0 || face_b.y > 0.0 {
        return Collision::APART;
    }

    // axis order matters: A's faces are preferred on near-ties
    let mut best = Candidate { axis: Axis::FaceAX, separation: face_a.x, normal: face_normal(rot_a, d_a, false) };
    best.consider(cfg, Axis::FaceAY, face_a.y, h_a.y, face_normal(rot_a, d_a, true));
    best.consider(cfg, Axis::FaceBX, face_b.x, h_b.x, face_normal(rot_b, d_b, false));
    best.consider(cfg, Axis::FaceBY, face_b.y, h_b.y, face_normal(rot_b, d_b, true));

    let flip = best.axis.on_b();
    let (reference, incident) = if flip {
        let reference = RefFace::new(b.pos, rot_b, h_b, -best.normal, best.axis.is_y());
        (reference, incident_edge(h_a, a.pos, rot_a, reference.normal))
    } else {
        let reference = RefFace::new(a.pos, rot_a, h_a, best.normal, best.axis.is_y());
        (reference, incident_edge(h_b, b.pos, rot_b, reference.normal))
    };

    let clipped = match reference.clip(&incident) {
        Some(clipped) => clipped,
        None => return Collision::APART,
    };

    // roundoff may still leave clipped points in front of the reference face
    let mut count = 0;
    for cv in clipped.iter() {
        let separation = reference.separation(cv.v);
        if separation <= 0.0 {
            contacts[count] = Contact {
                position: reference.project(cv.v, separation),
                normal: best.normal,
                separation,
                feature: if flip { cv.fp.flip() } else { cv.fp },
            };
            count += 1;
        }
    }

    if count == 0 {
        Collision::APART
    } else {
        Collision { count, touch: Touch::Face }
    }
}
