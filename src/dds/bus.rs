//! Physical line abstraction for the AD9850 parallel-load wiring.
//!
//! The streamer talks to the chip through this trait so the pulse
//! protocol can be exercised against a recording bus on the host. Every
//! method maps to a single port write on the target; none may block and
//! none may fail (the protocol is open-loop, there is no readback).

/// Control and data lines of the parallel-load interface.
///
/// Level writes (`set_*`) drive a line to a level. Toggle writes flip a
/// line once; a pulse is two successive toggles, the narrowest edge the
/// port can produce.
pub trait DdsBus {
    /// Drive the RESET line.
    fn set_reset(&mut self, high: bool);

    /// Drive the FQ_UD (frequency update) line to a level.
    fn set_update(&mut self, high: bool);

    /// Drive the scope trigger / marker line.
    fn set_trigger(&mut self, high: bool);

    /// Flip the FQ_UD line once.
    fn toggle_update(&mut self);

    /// Flip the W_CLK (word clock) line once.
    fn toggle_clock(&mut self);

    /// Drive the 6-bit data bus with the low 6 bits of a byte.
    fn write_low6(&mut self, bits: u8);

    /// Drive the 2-bit field on the second port with bits 6-7 of the
    /// same byte, passed in place (pre-masked with 0xC0).
    fn write_high2(&mut self, bits: u8);
}
