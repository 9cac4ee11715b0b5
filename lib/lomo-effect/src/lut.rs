//! Logistic color curve
//!
//! Builds the 256-entry table that maps an input intensity to its value on an
//! S-shaped curve centred on mid-gray. Smaller steepness values give a harder
//! contrast boost.

use derivative::Derivative;
use derive_setters::Setters;
use std::ops::Index;

pub const STEEPNESS_MIN: i32 = 8;
pub const STEEPNESS_MAX: i32 = 20;
pub const STEEPNESS_DEFAULT: i32 = 10;

/// Steepness values below the effective range are floored to its minimum.
pub fn effective_steepness(steepness: i32) -> i32 {
    steepness.max(STEEPNESS_MIN)
}

/// Maps each 8-bit intensity (the index) to an output intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTable([u8; 256]);

impl LookupTable {
    pub fn identity() -> Self {
        let mut table = [0u8; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = i as u8;
        }
        Self(table)
    }

    #[inline]
    pub fn get(&self, value: u8) -> u8 {
        self.0[value as usize]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl Default for LookupTable {
    fn default() -> Self {
        Self::identity()
    }
}

impl Index<u8> for LookupTable {
    type Output = u8;

    fn index(&self, value: u8) -> &u8 {
        &self.0[value as usize]
    }
}

fn logistic(t: f64) -> f64 {
    1.0 / (1.0 + (-t).exp())
}

/// Entry `i` is `round(256 * logistic((i/256 - 0.5) / (s/100)))`, clamped to
/// the 8-bit range. Halves round to even.
pub fn build_lookup_table(steepness: i32) -> LookupTable {
    let s = effective_steepness(steepness);
    let scale = s as f64 / 100.0;

    let mut table = [0u8; 256];
    for (i, entry) in table.iter_mut().enumerate() {
        let x = i as f64 / 256.0;
        let value = (256.0 * logistic((x - 0.5) / scale)).round_ties_even();
        *entry = value.clamp(0.0, 255.0) as u8;
    }

    log::debug!("built lookup table for steepness {s}");
    LookupTable(table)
}

/// Color curve configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct CurveConfig {
    #[derivative(Default(value = "STEEPNESS_DEFAULT"))]
    pub steepness: i32,
}

impl CurveConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn effective_steepness(&self) -> i32 {
        effective_steepness(self.steepness)
    }

    pub fn lookup_table(&self) -> LookupTable {
        build_lookup_table(self.steepness)
    }
}
