//! FM modulation table: one full waveform cycle of tuning words.
//!
//! 32 half-cycle reference samples approximate a sine lobe calibrated to
//! 1 kHz deviation. The 64-entry table is built once at startup: the
//! first half adds the scaled deviation to the carrier word, the second
//! half subtracts it (mirrored, not recomputed), so
//! `table[i] + table[i+32] == 2 * base` holds for every i and the
//! waveform carries no DC offset in tuning-word space.
//!
//! The table is read-only after construction and needs no
//! synchronization: only the interrupt-context streamer walks it.

use crate::config::BeaconConfig;
use crate::error::ConfigError;
use crate::dds::tuning::TuningWord;

/// Table entries, one full modulation cycle.
pub const TABLE_LEN: usize = 64;

/// Half-cycle deviation samples: sine lobe scaled to 1 kHz deviation,
/// one sample per 1/64th turn over the first half period. The second
/// half of the cycle mirrors these with negative sign.
pub const SINE_1KHZ_HALF: [u32; 32] = [
    0, 3368, 6703, 9974, 13149, 16197, 19089, 21798,
    24296, 26560, 28569, 30303, 31744, 32880, 33700, 34194,
    34360, 34194, 33700, 32880, 31744, 30303, 28569, 26560,
    24296, 21798, 19089, 16197, 13149, 9974, 6703, 3368,
];

/// Scale a reference sample to the configured deviation.
///
/// Samples are calibrated for 1000 Hz, so the tuning-word offset is
/// `round(sample * deviation_hz / 1000)` in u64 fixed-point.
#[inline]
fn scaled_deviation(sample: u32, deviation_hz: u32) -> i64 {
    ((sample as u64 * deviation_hz as u64 + 500) / 1000) as i64
}

/// Circular index into the modulation table, range [0, 63].
///
/// Owned exclusively by the interrupt-context streamer. Nothing else may
/// read or write it while the timer runs; a future progress readout from
/// the main thread would need an atomic, absent here on purpose.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor(u8);

impl Cursor {
    /// Cursor at the start of the cycle.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Cursor at an arbitrary position, wrapped into range.
    pub const fn at(index: usize) -> Self {
        Self((index & (TABLE_LEN - 1)) as u8)
    }

    /// Position as a table index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Advance one entry, wrapping at the end of the cycle.
    #[inline]
    pub fn advance(&mut self) {
        self.0 = (self.0 + 1) & (TABLE_LEN as u8 - 1);
    }
}

/// The 64-entry modulation table. Built once, immutable afterwards.
pub struct ModulationTable {
    base: TuningWord,
    words: [TuningWord; TABLE_LEN],
}

impl ModulationTable {
    /// Build the table for a configuration.
    ///
    /// Checked construction: an entry that would leave the 32-bit range
    /// is reported as [`ConfigError::TuningWordOverflow`] with the
    /// offending index, before the timer is ever armed. No silent
    /// wraparound.
    pub fn build(config: &BeaconConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let base = TuningWord::for_frequency(config.carrier_hz, config.clock_hz)?;

        let half = TABLE_LEN / 2;
        let mut words = [TuningWord::ZERO; TABLE_LEN];
        for (i, &sample) in SINE_1KHZ_HALF.iter().enumerate() {
            let offset = scaled_deviation(sample, config.deviation_hz);
            words[i] = base
                .checked_offset(offset)
                .ok_or(ConfigError::TuningWordOverflow { index: i })?;
            words[i + half] = base
                .checked_offset(-offset)
                .ok_or(ConfigError::TuningWordOverflow { index: i + half })?;
        }

        Ok(Self { base, words })
    }

    /// Carrier tuning word the table is centered on.
    pub const fn base(&self) -> TuningWord {
        self.base
    }

    /// Word at a cursor position.
    #[inline]
    pub fn word(&self, cursor: Cursor) -> TuningWord {
        self.words[cursor.index()]
    }

    /// All entries, for diagnostics and tests.
    pub fn words(&self) -> &[TuningWord; TABLE_LEN] {
        &self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_wraps_at_table_end() {
        let mut cursor = Cursor::at(TABLE_LEN - 1);
        cursor.advance();
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn test_cursor_at_wraps_input() {
        assert_eq!(Cursor::at(TABLE_LEN + 5).index(), 5);
    }

    #[test]
    fn test_scaled_deviation_rounds() {
        // 24296 * 2.5 = 60740 exactly.
        assert_eq!(scaled_deviation(24296, 2500), 60740);
        // 3368 * 1.111 = 3741.848 -> 3742
        assert_eq!(scaled_deviation(3368, 1111), 3742);
        // Unit scale passes samples through.
        assert_eq!(scaled_deviation(34360, 1000), 34360);
    }

    #[test]
    fn test_reference_table_half_lengths() {
        assert_eq!(SINE_1KHZ_HALF.len() * 2, TABLE_LEN);
        assert_eq!(SINE_1KHZ_HALF[0], 0);
        assert_eq!(SINE_1KHZ_HALF[16], 34360); // peak at quarter turn
    }

    #[test]
    fn test_build_centers_on_base() {
        let table = ModulationTable::build(&BeaconConfig::DEFAULT).unwrap();
        assert_eq!(table.word(Cursor::new()), table.base());
    }
}
