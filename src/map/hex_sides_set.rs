//! A frozen set of hex sides
//!
//! Used for the sides of a hex that carry track, are impassable or lead off
//! the board. Built once through [`HexSidesSetBuilder`] and never mutated.

use std::fmt;

use super::hex_side::HexSide;

/// A set over the six hex sides, stored as a 6-bit mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HexSidesSet {
    bits: u8,
}

/// Accumulates sides before freezing them into a [`HexSidesSet`]
#[derive(Debug, Clone, Default)]
pub struct HexSidesSetBuilder {
    bits: u8,
}

impl HexSidesSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, side: HexSide) -> Self {
        self.bits |= 1 << side.number();
        self
    }

    /// Adds `side` after turning it by `rotation`
    pub fn set_rotated(self, side: HexSide, rotation: HexSide) -> Self {
        self.set(side.rotate(rotation))
    }

    pub fn build(self) -> HexSidesSet {
        HexSidesSet { bits: self.bits }
    }
}

impl HexSidesSet {
    pub fn builder() -> HexSidesSetBuilder {
        HexSidesSetBuilder::new()
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        HexSide::ALL.into_iter().collect()
    }

    /// Moves every member from `side` to `side - rotation`
    pub fn rotated(base: HexSidesSet, rotation: HexSide) -> HexSidesSet {
        let back = rotation.negative();
        base.iter()
            .fold(HexSidesSet::builder(), |builder, side| {
                builder.set(HexSide::get(side.number() + back.number()))
            })
            .build()
    }

    pub fn contains(&self, side: HexSide) -> bool {
        self.bits & (1 << side.number()) != 0
    }

    pub fn intersection(&self, other: &HexSidesSet) -> HexSidesSet {
        HexSidesSet {
            bits: self.bits & other.bits,
        }
    }

    pub fn intersects(&self, other: &HexSidesSet) -> bool {
        self.bits & other.bits != 0
    }

    pub fn union(&self, other: &HexSidesSet) -> HexSidesSet {
        HexSidesSet {
            bits: self.bits | other.bits,
        }
    }

    pub fn with(&self, side: HexSide) -> HexSidesSet {
        HexSidesSet {
            bits: self.bits | (1 << side.number()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// True iff exactly one side is a member
    pub fn only_single(&self) -> bool {
        self.bits.count_ones() == 1
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Members in ascending side number
    pub fn iter(&self) -> impl Iterator<Item = HexSide> {
        let set = *self;
        HexSide::ALL
            .into_iter()
            .filter(move |side| set.contains(*side))
    }
}

impl FromIterator<HexSide> for HexSidesSet {
    fn from_iter<I: IntoIterator<Item = HexSide>>(iter: I) -> Self {
        iter.into_iter()
            .fold(HexSidesSet::builder(), |builder, side| builder.set(side))
            .build()
    }
}

impl fmt::Display for HexSidesSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sides: Vec<String> = self.iter().map(|side| side.number().to_string()).collect();
        write!(f, "{{{}}}", sides.join(","))
    }
}
