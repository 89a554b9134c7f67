//! Hardware layer for RustFmBeacon (ESP-IDF).
//!
//! Thin wrappers around ESP-IDF GPIO. Protocol logic stays in the `dds`
//! core; the HAL is just pin I/O.

pub mod gpio;

pub use gpio::{DdsPins, EspDdsBus};
