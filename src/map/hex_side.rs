//! The six sides of a hex
//!
//! Sides are numbered 0..6 and all arithmetic on them wraps modulo 6, so any
//! integer names a valid side.

use std::fmt;

/// Number of sides of a hex
pub const SIDE_COUNT: i32 = 6;

/// One of the six fixed directions around a hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HexSide(u8);

impl HexSide {
    /// All sides in ascending order
    pub const ALL: [HexSide; 6] = [
        HexSide(0),
        HexSide(1),
        HexSide(2),
        HexSide(3),
        HexSide(4),
        HexSide(5),
    ];

    /// Side 0, the neutral rotation
    pub const DEFAULT_ROTATION: HexSide = HexSide(0);

    /// Normalizes any integer into 0..6 and returns that side
    pub fn get(number: i32) -> HexSide {
        HexSide(number.rem_euclid(SIDE_COUNT) as u8)
    }

    pub fn number(self) -> i32 {
        self.0 as i32
    }

    pub fn opposite(self) -> HexSide {
        HexSide::get(self.number() + 3)
    }

    /// The rotation that undoes this one
    pub fn negative(self) -> HexSide {
        HexSide::get(-self.number())
    }

    pub fn next(self) -> HexSide {
        HexSide::get(self.number() + 1)
    }

    /// This side turned by `rotation` steps
    pub fn rotate(self, rotation: HexSide) -> HexSide {
        HexSide::get(self.number() + rotation.number())
    }

    /// All six sides, starting at `rotation` and continuing in ascending order
    pub fn all_rotated(rotation: HexSide) -> [HexSide; 6] {
        HexSide::ALL.map(|side| side.rotate(rotation))
    }
}

impl Default for HexSide {
    fn default() -> Self {
        HexSide::DEFAULT_ROTATION
    }
}

impl fmt::Display for HexSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "side{}", self.0)
    }
}
