//! 32-bit DDS tuning words.
//!
//! A tuning word is a direct linear encoding of output frequency:
//! `word = round(hz * 2^32 / clock_hz)`. All arithmetic is 64-bit
//! integer with half-up rounding; no floating point anywhere.
//!
//! The wire transfer is byte-serial, most-significant byte first, with
//! each byte split across two physical ports: the low 6 bits on the data
//! bus, the high 2 bits on reserved pins of a second port. Extraction is
//! explicit shifting, never memory-layout aliasing.

use crate::error::ConfigError;

/// Bytes per tuning-word transfer.
pub const WORD_BYTES: usize = 4;

/// An AD9850 frequency tuning word.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TuningWord(u32);

impl TuningWord {
    pub const ZERO: Self = Self(0);

    /// Wrap a raw register value.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw register value.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Word for an output frequency against a reference clock.
    ///
    /// `round(hz * 2^32 / clock_hz)`, half-up. Fails if the clock is
    /// zero or the quotient does not fit in 32 bits.
    pub fn for_frequency(hz: u32, clock_hz: u32) -> Result<Self, ConfigError> {
        if clock_hz == 0 {
            return Err(ConfigError::ZeroClock);
        }
        let scaled = (hz as u64) << 32;
        let word = (scaled + clock_hz as u64 / 2) / clock_hz as u64;
        if word > u32::MAX as u64 {
            return Err(ConfigError::CarrierOutOfRange);
        }
        Ok(Self(word as u32))
    }

    /// Byte `j` of the word, most-significant first (`j` in 0..4).
    #[inline]
    pub const fn byte(self, j: usize) -> u8 {
        debug_assert!(j < WORD_BYTES);
        ((self.0 >> (8 * (3 - (j & 3)))) & 0xFF) as u8
    }

    /// Low 6 bits of byte `j`, as driven on the 6-bit data bus.
    #[inline]
    pub const fn low6(self, j: usize) -> u8 {
        self.byte(j) & 0x3F
    }

    /// High 2 bits of byte `j`, as driven on the second port. Returned
    /// in place (bits 6-7), matching the physical pin positions.
    #[inline]
    pub const fn high2(self, j: usize) -> u8 {
        self.byte(j) & 0xC0
    }

    /// Apply a signed deviation offset; `None` on 32-bit overflow or
    /// underflow. Used by the table builder so a too-large deviation is
    /// rejected instead of silently wrapping.
    #[inline]
    pub fn checked_offset(self, offset: i64) -> Option<Self> {
        let value = self.0 as i64 + offset;
        if (0..=u32::MAX as i64).contains(&value) {
            Some(Self(value as u32))
        } else {
            None
        }
    }
}
