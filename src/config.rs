//! Beacon configuration.
//!
//! All parameters are fixed at startup. Validation runs once before the
//! modulation table is built; nothing touches the hardware until it
//! passes. There is no runtime reconfiguration: the beacon runs with one
//! carrier, one deviation and one tone until power-off.

use crate::dds::table::TABLE_LEN;
use crate::error::ConfigError;

/// Highest usable modulation tone in Hz.
///
/// Past this the per-tick load protocol no longer fits between compare
/// matches on the reference hardware; the parallel-load path tops out
/// near 1.6 kHz.
pub const MAX_TONE_HZ: u32 = 1_600;

/// Tone/deviation pairs (Hz) that put the carrier component at a Bessel
/// null. Useful for calibrating deviation with a spectrum display: at
/// each pair the carrier vanishes exactly when the deviation is correct.
pub const BESSEL_NULLS: [(u32, u32); 5] = [
    (416, 1_000),
    (624, 1_500),
    (832, 2_000),
    (1_040, 2_500),
    (1_247, 3_000),
];

/// Fixed beacon parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BeaconConfig {
    /// Carrier frequency in Hz.
    pub carrier_hz: u32,

    /// DDS reference clock in Hz.
    pub clock_hz: u32,

    /// Peak FM deviation in Hz. The half-cycle reference table is
    /// calibrated for 1000 Hz, so 2500 here reproduces the classic
    /// 2.5 kHz deviation setting.
    pub deviation_hz: u32,

    /// Modulation tone in Hz. The timer fires at 64x this rate, one
    /// table entry per firing.
    pub tone_hz: u32,
}

impl BeaconConfig {
    /// Reference design: 20 MHz carrier on a 125 MHz clock, 2.5 kHz
    /// deviation, 1 kHz tone. The second image of the 20 MHz carrier
    /// lands at 145 MHz, inside the 2 m amateur band.
    pub const DEFAULT: Self = Self {
        carrier_hz: 20_000_000,
        clock_hz: 125_000_000,
        deviation_hz: 2_500,
        tone_hz: 1_000,
    };

    /// Range-check everything before the table build.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clock_hz == 0 {
            return Err(ConfigError::ZeroClock);
        }
        if self.carrier_hz == 0 || self.carrier_hz >= self.clock_hz / 2 {
            return Err(ConfigError::CarrierOutOfRange);
        }
        if self.tone_hz == 0 || self.tone_hz > MAX_TONE_HZ {
            return Err(ConfigError::ToneOutOfRange);
        }
        Ok(())
    }

    /// Timer interrupt rate: one table entry per firing.
    pub const fn tick_rate_hz(&self) -> u32 {
        self.tone_hz * TABLE_LEN as u32
    }

    /// Periodic timer period in microseconds, rounded down. The actual
    /// tone is correspondingly slightly high, same as the integer
    /// compare-register values on the reference hardware.
    pub const fn tick_period_us(&self) -> u64 {
        1_000_000 / self.tick_rate_hz() as u64
    }
}

impl Default for BeaconConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
