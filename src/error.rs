//! Configuration errors.
//!
//! Construction is the only fallible phase: once the table is built and
//! the timer armed, the load protocol is open-loop and infallible by
//! design. Every variant here is fatal and surfaces before the first
//! interrupt fires.

/// Reasons the beacon refuses to start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// DDS reference clock configured as zero.
    ZeroClock,

    /// Carrier is zero or at/above the Nyquist limit (clock / 2).
    CarrierOutOfRange,

    /// Modulation tone outside (0, MAX_TONE_HZ].
    ToneOutOfRange,

    /// A computed table entry left the 32-bit tuning-word range.
    /// The deviation setting is too large for the carrier/clock pair.
    TuningWordOverflow {
        /// Table index of the first offending entry.
        index: usize,
    },
}

impl ConfigError {
    /// Short description for log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigError::ZeroClock => "reference clock is zero",
            ConfigError::CarrierOutOfRange => "carrier outside (0, clock/2)",
            ConfigError::ToneOutOfRange => "tone outside supported range",
            ConfigError::TuningWordOverflow { .. } => "deviation overflows tuning word",
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::TuningWordOverflow { index } => {
                write!(f, "{} (table entry {})", self.as_str(), index)
            }
            _ => f.write_str(self.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_index() {
        let err = ConfigError::TuningWordOverflow { index: 17 };
        let text = format!("{}", err);
        assert!(text.contains("17"));
    }

    #[test]
    fn test_as_str_nonempty() {
        for err in [
            ConfigError::ZeroClock,
            ConfigError::CarrierOutOfRange,
            ConfigError::ToneOutOfRange,
            ConfigError::TuningWordOverflow { index: 0 },
        ] {
            assert!(!err.as_str().is_empty());
        }
    }
}
