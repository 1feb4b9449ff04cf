//! Per-pair contact persistence across steps.
//!
//! Contacts are matched by [`FeaturePair`](crate::FeaturePair) equality only. A solver reads
//! [`PointState::Persist`] as "warm-start this point with last step's impulse".

use crate::{
    body::Body,
    error::CollideError,
    narrow::{collide_with, Contact, NarrowConfig, Touch, MAX_CONTACTS},
};
use fnv::FnvBuildHasher;
use indexmap::{map::Entry, IndexMap};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointState {
    /// Slot unused.
    Null,
    /// New this step.
    Add,
    /// Present last step and this step.
    Persist,
    /// Present last step, gone now.
    Remove,
}
impl Default for PointState {
    fn default() -> Self {
        PointState::Null
    }
}

pub fn point_states(old: &[Contact], new: &[Contact]) -> ([PointState; MAX_CONTACTS], [PointState; MAX_CONTACTS]) {
    //! Classifies the points of two consecutive manifolds. Returns the states of `old`'s points, then `new`'s.
    let mut old_states = [PointState::Null; MAX_CONTACTS];
    let mut new_states = [PointState::Null; MAX_CONTACTS];

    for (state, c) in old_states.iter_mut().zip(old.iter()) {
        *state = if new.iter().any(|n| n.feature == c.feature) { PointState::Persist } else { PointState::Remove };
    }
    for (state, c) in new_states.iter_mut().zip(new.iter()) {
        *state = if old.iter().any(|o| o.feature == c.feature) { PointState::Persist } else { PointState::Add };
    }
    (old_states, new_states)
}

/// The contacts of one body pair, as of the last step it was updated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Manifold {
    contacts: [Contact; MAX_CONTACTS],
    states: [PointState; MAX_CONTACTS],
    count: usize,
    removed: usize,
    touch: Touch,
    step: u64,
}
impl Manifold {
    #[inline]
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts[..self.count]
    }
    #[inline]
    pub fn states(&self) -> &[PointState] {
        //! Parallel to `contacts()`.
        &self.states[..self.count]
    }
    #[inline]
    pub fn removed(&self) -> usize {
        //! Points of the previous manifold with no match in this one.
        self.removed
    }
    #[inline]
    pub fn touch(&self) -> Touch {
        self.touch
    }
}

/// Pair key, lower body handle first.
pub type PairKey = (usize, usize);

#[inline]
fn pair_key(id_a: usize, id_b: usize) -> PairKey {
    if id_a <= id_b { (id_a, id_b) } else { (id_b, id_a) }
}

/// Remembers the last manifold of every touching pair, in insertion order.
#[derive(Debug, Clone)]
pub struct ContactCache {
    config: NarrowConfig,
    pairs: IndexMap<PairKey, Manifold, FnvBuildHasher>,
    step: u64,
}
impl Default for ContactCache {
    fn default() -> Self {
        ContactCache::new()
    }
}
impl ContactCache {
    pub fn new() -> ContactCache {
        ContactCache::with_config(NarrowConfig::default())
    }
    pub fn with_config(config: NarrowConfig) -> ContactCache {
        ContactCache {
            config,
            pairs: IndexMap::with_hasher(FnvBuildHasher::default()),
            step: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &NarrowConfig {
        &self.config
    }

    pub fn update(&mut self, id_a: usize, a: &Body, id_b: usize, b: &Body) -> Result<Option<&Manifold>, CollideError> {
        //! Collides the pair and classifies its points against the previous step. <br>
        //! The pair is oriented so the body with the lower handle is A: normals point from it to the other.
        //! Returns `None` and forgets the pair once it stops touching.
        let key = pair_key(id_a, id_b);
        let (a, b) = if key.0 == id_a { (a, b) } else { (b, a) };

        let mut contacts = [Contact::default(); MAX_CONTACTS];
        let collision = collide_with(&self.config, &mut contacts, a, b)?;

        if !collision.is_touching() {
            if self.pairs.shift_remove(&key).is_some() {
                trace!(?key, "pair separated");
            }
            return Ok(None);
        }

        let fresh = &contacts[..collision.count];
        let (old_states, states) = match self.pairs.get(&key) {
            Some(prev) => point_states(prev.contacts(), fresh),
            None => point_states(&[], fresh),
        };
        let manifold = Manifold {
            contacts,
            states,
            count: collision.count,
            removed: old_states.iter().filter(|s| **s == PointState::Remove).count(),
            touch: collision.touch,
            step: self.step,
        };

        let slot = match self.pairs.entry(key) {
            Entry::Occupied(o) => {
                trace!(?key, count = manifold.count, removed = manifold.removed, "pair persisted");
                let slot = o.into_mut();
                *slot = manifold;
                slot
            }
            Entry::Vacant(v) => {
                trace!(?key, count = manifold.count, "pair added");
                v.insert(manifold)
            }
        };
        Ok(Some(&*slot))
    }

    pub fn end_step(&mut self) -> usize {
        //! Forgets pairs not updated since the previous call, then starts a new step. Returns how many were dropped.
        let step = self.step;
        let before = self.pairs.len();
        self.pairs.retain(|_, m| m.step == step);
        self.step += 1;

        let dropped = before - self.pairs.len();
        if dropped > 0 {
            trace!(dropped, "stale pairs dropped");
        }
        dropped
    }

    #[inline]
    pub fn get(&self, id_a: usize, id_b: usize) -> Option<&Manifold> {
        self.pairs.get(&pair_key(id_a, id_b))
    }
    pub fn remove(&mut self, id_a: usize, id_b: usize) -> Option<Manifold> {
        self.pairs.shift_remove(&pair_key(id_a, id_b))
    }
    pub fn iter(&self) -> impl Iterator<Item = (PairKey, &Manifold)> {
        self.pairs.iter().map(|(k, m)| (*k, m))
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
    pub fn clear(&mut self) {
        self.pairs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        body::ShapeKind,
        feature::{Edge, FeaturePair},
        Vec2,
    };

    fn contact(in_b: Edge) -> Contact {
        Contact { feature: FeaturePair { in_b, ..Default::default() }, ..Default::default() }
    }

    #[test]
    fn classify_points() {
        let old = [contact(Edge::E1), contact(Edge::E2)];
        let new = [contact(Edge::E2), contact(Edge::E3)];
        let (o, n) = point_states(&old, &new);
        assert_eq!(o, [PointState::Remove, PointState::Persist]);
        assert_eq!(n, [PointState::Persist, PointState::Add]);

        let (o, n) = point_states(&[], &new[..1]);
        assert_eq!(o, [PointState::Null, PointState::Null]);
        assert_eq!(n, [PointState::Add, PointState::Null]);
    }

    #[test]
    fn stacked_boxes_persist() {
        let ground = Body::cuboid(Vec2::ZERO, 0.0, Vec2::new(10.0, 1.0)).unwrap();
        let crate_ = Body::cuboid(Vec2::new(0.0, 0.95), 0.0, Vec2::ONE).unwrap();
        let mut cache = ContactCache::new();

        let m = cache.update(0, &ground, 1, &crate_).unwrap().unwrap();
        assert_eq!(m.contacts().len(), 2);
        assert_eq!(m.states(), &[PointState::Add, PointState::Add]);
        assert_eq!(m.touch(), Touch::Face);
        assert_eq!(cache.end_step(), 0);

        // a small slide keeps the same edges in contact
        let crate_ = Body::cuboid(Vec2::new(0.05, 0.96), 0.0, Vec2::ONE).unwrap();
        let m = cache.update(0, &ground, 1, &crate_).unwrap().unwrap();
        assert_eq!(m.states(), &[PointState::Persist, PointState::Persist]);
        assert_eq!(m.removed(), 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn pair_orientation_is_canonical() {
        let ground = Body::cuboid(Vec2::ZERO, 0.0, Vec2::new(10.0, 1.0)).unwrap();
        let crate_ = Body::cuboid(Vec2::new(0.0, 0.95), 0.0, Vec2::ONE).unwrap();
        let mut cache = ContactCache::new();

        // ground has the lower handle, so it is A whichever order the pair arrives in
        let m = cache.update(7, &crate_, 3, &ground).unwrap().unwrap();
        assert!(m.contacts().iter().all(|c| c.normal.y > 0.0));
        assert!(cache.get(3, 7).is_some());
        assert!(cache.get(7, 3).is_some());
        assert_eq!(cache.iter().next().map(|(k, _)| k), Some((3, 7)));
    }

    #[test]
    fn separation_and_stale_pairs() {
        let a = Body::circle(Vec2::ZERO, 1.0).unwrap();
        let b = Body::circle(Vec2::new(1.5, 0.0), 1.0).unwrap();
        let c = Body::circle(Vec2::new(-1.5, 0.0), 1.0).unwrap();
        let mut cache = ContactCache::new();

        assert!(cache.update(0, &a, 1, &b).unwrap().is_some());
        assert!(cache.update(0, &a, 2, &c).unwrap().is_some());
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.end_step(), 0);

        // pair (0, 1) drifts apart, pair (0, 2) is no longer reported
        let b = Body::circle(Vec2::new(5.0, 0.0), 1.0).unwrap();
        assert!(cache.update(0, &a, 1, &b).unwrap().is_none());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.end_step(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn unsupported_pairs_propagate() {
        let tri = Body::new(ShapeKind::Triangle, Vec2::ZERO, 0.0, Vec2::ONE).unwrap();
        let mut cache = ContactCache::new();
        assert!(cache.update(0, &tri, 1, &tri).is_err());
        assert!(cache.is_empty());

        let a = Body::circle(Vec2::ZERO, 1.0).unwrap();
        cache.update(0, &a, 1, &a).unwrap();
        assert!(cache.remove(1, 0).is_some());
        cache.update(0, &a, 1, &a).unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }
}
