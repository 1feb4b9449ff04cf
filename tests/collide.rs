use approx::assert_abs_diff_eq;
use narrow2d::{collide, collide_with, Body, Collision, Contact, Fp, NarrowConfig, Side, Touch, Vec2, MAX_CONTACTS};

fn pair(a: &Body, b: &Body) -> (Collision, Vec<Contact>) {
    let mut contacts = [Contact::default(); MAX_CONTACTS];
    let col = collide(&mut contacts, a, b).unwrap();
    (col, contacts[..col.count].to_vec())
}

#[test]
fn two_unit_circles() {
    let a = Body::circle(Vec2::ZERO, 1.0).unwrap();
    let b = Body::circle(Vec2::new(1.0, 0.0), 1.0).unwrap();
    let (col, c) = pair(&a, &b);

    assert_eq!(col.touch, Touch::Round);
    assert_eq!(c.len(), 1);
    assert_abs_diff_eq!(c[0].normal, Vec2::X);
    assert_abs_diff_eq!(c[0].separation, -1.0);
    assert_abs_diff_eq!(c[0].position, Vec2::new(0.5, 0.0));
}

#[test]
fn aligned_boxes() {
    let a = Body::cuboid(Vec2::ZERO, 0.0, Vec2::splat(2.0)).unwrap();
    let b = Body::cuboid(Vec2::new(1.5, 0.0), 0.0, Vec2::splat(2.0)).unwrap();
    let (col, c) = pair(&a, &b);

    assert_eq!(col, Collision { count: 2, touch: Touch::Face });
    for contact in c.iter() {
        assert_abs_diff_eq!(contact.normal, Vec2::X);
        assert_abs_diff_eq!(contact.separation, -0.5);
    }

    let far = Body::cuboid(Vec2::new(10.0, 0.0), 0.0, Vec2::splat(2.0)).unwrap();
    assert_eq!(pair(&a, &far).0, Collision::APART);
}

#[test]
fn box_pairs_hold_contact_invariants() {
    // a ring of rotated boxes around a fixed one, some touching, some not
    let a = Body::cuboid(Vec2::new(0.2, -0.1), 0.3, Vec2::new(2.0, 1.2)).unwrap();
    let mut touching = 0;

    for i in 0..24 {
        let t = i as Fp * 0.2618;
        let dist = if i % 3 == 0 { 3.0 } else { 1.1 };
        let b = Body::cuboid(a.pos + Vec2::new(t.cos(), t.sin()) * dist, t * 0.7, Vec2::new(1.0, 0.8)).unwrap();
        let (col, contacts) = pair(&a, &b);
        if i % 3 == 0 {
            assert_eq!(col, Collision::APART);
            continue;
        }

        assert!(col.count <= MAX_CONTACTS);
        for c in contacts.iter() {
            assert!(c.separation <= 0.0);
            assert_abs_diff_eq!(c.normal.length(), 1.0, epsilon = 1e-4);
            assert!(c.normal.dot(b.pos - a.pos) >= 0.0);
        }

        touching += col.is_touching() as usize;
    }
    assert!(touching > 0);
}

#[test]
fn repeat_runs_give_same_features() {
    let a = Body::cuboid(Vec2::ZERO, 0.0, Vec2::new(6.0, 1.0)).unwrap();
    let b = Body::cuboid(Vec2::new(0.4, 0.9), 0.05, Vec2::new(1.0, 1.0)).unwrap();
    let (_, first) = pair(&a, &b);
    let (_, second) = pair(&a, &b);

    assert!(!first.is_empty());
    let keys = |cs: &[Contact]| cs.iter().map(|c| c.feature.key()).collect::<Vec<_>>();
    assert_eq!(keys(&first), keys(&second));
}

#[test]
fn box_and_circle_in_either_order() {
    let bx = Body::cuboid(Vec2::ZERO, 0.0, Vec2::ONE).unwrap();
    let ball = Body::circle(Vec2::new(0.0, 0.7), 0.25).unwrap();

    let (bc, bc_contacts) = pair(&bx, &ball);
    let (cb, cb_contacts) = pair(&ball, &bx);
    assert_eq!(bc.touch, Touch::Rest { circle: Side::B });
    assert_eq!(cb.touch, Touch::Rest { circle: Side::A });
    assert_abs_diff_eq!(bc_contacts[0].normal, Vec2::Y);
    assert_abs_diff_eq!(cb_contacts[0].normal, -Vec2::Y);
    assert_abs_diff_eq!(bc_contacts[0].position, cb_contacts[0].position);
    assert_abs_diff_eq!(bc_contacts[0].separation, cb_contacts[0].separation);
}

#[test]
fn custom_tolerances() {
    let a = Body::cuboid(Vec2::ZERO, 0.0, Vec2::splat(2.0)).unwrap();
    let b = Body::cuboid(Vec2::new(1.5, 0.0), 0.0, Vec2::splat(2.0)).unwrap();
    let mut contacts = [Contact::default(); MAX_CONTACTS];

    // with no bias at all B's x face, tied with A's, still never strictly wins
    let cfg = NarrowConfig { relative_tol: 1.0, absolute_tol: 0.0, ..NarrowConfig::default() };
    let col = collide_with(&cfg, &mut contacts, &a, &b).unwrap();
    assert_eq!(col.count, 2);
    assert_abs_diff_eq!(contacts[0].position.x, 1.0);
}
