//! Neighbour displacement tables for table-restricted LZ variants.
//!
//! Some image codecs do not allow arbitrary back-reference distances. Instead,
//! the offset field of a match selects one of a small set of neighbouring
//! positions (the pixel to the left, the pixel above, ...). The tables here
//! are immutable constants; the decoder resolves an entry against the row
//! stride of the image being decoded.

/// One legal neighbour displacement.
///
/// The source of a match is `dx` bytes horizontally and `dy` rows above the
/// write position: a negative `dx` points left, a positive `dx` points right
/// (only meaningful together with `dy > 0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Neighbor {
    /// Horizontal displacement in bytes.
    pub dx: i32,
    /// Rows above the current one.
    pub dy: u32,
}

impl Neighbor {
    /// Create a displacement.
    pub const fn new(dx: i32, dy: u32) -> Self {
        Self { dx, dy }
    }

    /// Backward distance for a row stride of `stride` bytes.
    ///
    /// Returns `None` when the displacement does not point strictly backwards.
    pub fn distance(&self, stride: usize) -> Option<usize> {
        let distance = (self.dy as i64)
            .checked_mul(stride as i64)?
            .checked_sub(self.dx as i64)?;
        (distance > 0).then(|| distance as usize)
    }
}

/// A 16-entry neighbourhood addressed by a 4-bit offset field.
///
/// - 0-3: one to four bytes to the left
/// - 4-8: the row above, two left to two right
/// - 9-13: two rows above, two left to two right
/// - 14-15: directly above, three and four rows up
pub const NEIGHBORS_16: [Neighbor; 16] = [
    Neighbor::new(-1, 0),
    Neighbor::new(-2, 0),
    Neighbor::new(-3, 0),
    Neighbor::new(-4, 0),
    Neighbor::new(-2, 1),
    Neighbor::new(-1, 1),
    Neighbor::new(0, 1),
    Neighbor::new(1, 1),
    Neighbor::new(2, 1),
    Neighbor::new(-2, 2),
    Neighbor::new(-1, 2),
    Neighbor::new(0, 2),
    Neighbor::new(1, 2),
    Neighbor::new(2, 2),
    Neighbor::new(0, 3),
    Neighbor::new(0, 4),
];
