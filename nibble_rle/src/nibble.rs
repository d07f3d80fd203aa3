//! Splitting bytes into nibbles and back. High nibble always comes first.

use crate::{Result, RleError};

/// Largest value a nibble can hold.
pub const NIBBLE_MAX: u8 = 0x0F;

#[inline(always)]
pub fn high(byte: u8) -> u8 {
    byte >> 4
}

#[inline(always)]
pub fn low(byte: u8) -> u8 {
    byte & NIBBLE_MAX
}

#[inline(always)]
pub fn join(high: u8, low: u8) -> u8 {
    (high << 4) | (low & NIBBLE_MAX)
}

#[inline]
pub fn check(n: u8) -> Result<u8> {
    if n > NIBBLE_MAX {
        Err(RleError::InvalidNibble(n))
    } else {
        Ok(n)
    }
}
