//! Distance Profile
//!
//! The result of one sweep of the scan arc: seven distances ordered left to
//! right, index 3 straight ahead. A profile is built once per sweep and never
//! patched afterwards.

use core::ops::Index;

/// Number of stops in the scan arc
pub const SCAN_POINTS: usize = 7;

/// Index of the straight-ahead reading
pub const CENTER: usize = SCAN_POINTS / 2;

/// Seven distance readings across the scan arc
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DistanceProfile([f32; SCAN_POINTS]);

impl DistanceProfile {
    pub const fn new(readings: [f32; SCAN_POINTS]) -> Self {
        Self(readings)
    }

    pub fn readings(&self) -> &[f32; SCAN_POINTS] {
        &self.0
    }

    /// Smallest of the three readings around straight ahead
    pub fn forward(&self) -> f32 {
        self.min_of(CENTER - 1..=CENTER + 1)
    }

    /// Smallest of the three leftmost readings
    pub fn left(&self) -> f32 {
        self.min_of(0..=2)
    }

    /// Smallest of the three rightmost readings
    pub fn right(&self) -> f32 {
        self.min_of(SCAN_POINTS - 3..=SCAN_POINTS - 1)
    }

    fn min_of(&self, range: core::ops::RangeInclusive<usize>) -> f32 {
        self.0[range].iter().copied().fold(f32::INFINITY, f32::min)
    }
}

impl Index<usize> for DistanceProfile {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.0[index]
    }
}

impl From<[f32; SCAN_POINTS]> for DistanceProfile {
    fn from(readings: [f32; SCAN_POINTS]) -> Self {
        Self(readings)
    }
}
