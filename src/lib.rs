//! # RustFmBeacon
//!
//! FM beacon generator: drives an AD9850 DDS chip to produce a
//! continuous-phase frequency-modulated carrier from a single periodic
//! timer interrupt. No OS scheduling, no allocation in the hot path.
//!
//! ## Architecture
//!
//! - [`ModulationTable`] is built once at startup: 64 tuning words, one
//!   full cycle of the modulation waveform around the carrier.
//! - [`Streamer`] runs in the timer interrupt. Each firing commits the
//!   word staged on the previous tick, stages the next one through the
//!   chip's parallel-load pulse protocol, and advances the table cursor.
//! - The `dds` core is platform independent and host-testable; the
//!   ESP-IDF pin layer lives behind the `esp32` feature.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod dds;
pub mod error;
pub mod logging;

#[cfg(feature = "esp32")]
pub mod hal;

pub use config::{BeaconConfig, BESSEL_NULLS, MAX_TONE_HZ};
pub use dds::bus::DdsBus;
pub use dds::streamer::{enter_parallel_load, Streamer};
pub use dds::table::{Cursor, ModulationTable, SINE_1KHZ_HALF, TABLE_LEN};
pub use dds::tuning::TuningWord;
pub use error::ConfigError;
pub use logging::LogRing;
