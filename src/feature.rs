//! Edge numbering and feature pairs used to identify contacts across steps.
//!
//! Box edges, in the box's local frame:
//!
//! ```text
//!        ^ y
//!        |
//!        e1
//!   v2 ------ v1
//!    |        |
//! e2 |        | e4  --> x
//!    |        |
//!   v3 ------ v4
//!        e3
//! ```

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Edge {
    None = 0,
    E1 = 1,
    E2 = 2,
    E3 = 3,
    E4 = 4,
}
impl Default for Edge {
    fn default() -> Self {
        Edge::None
    }
}

/// Which edges of each shape bound a contact point.
///
/// Two contacts from different steps are the same contact iff their feature pairs are equal.
/// Circle-circle and box-circle corner contacts keep the default value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FeaturePair {
    pub in_a: Edge,
    pub out_a: Edge,
    pub in_b: Edge,
    pub out_b: Edge,
}
impl FeaturePair {
    #[inline]
    pub fn key(self) -> u32 {
        //! Packs the four edges into one comparable value, one byte each.
        u32::from_le_bytes([self.in_a as u8, self.out_a as u8, self.in_b as u8, self.out_b as u8])
    }

    #[inline]
    pub fn flip(self) -> FeaturePair {
        //! Swaps the roles of shape A and shape B.
        FeaturePair {
            in_a: self.in_b,
            out_a: self.out_b,
            in_b: self.in_a,
            out_b: self.out_a,
        }
    }
}
