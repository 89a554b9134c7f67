//! Tick-driven streamer: one tuning word per timer firing.
//!
//! The chip double-buffers: bytes clocked in with W_CLK land in an
//! internal pending buffer and only become the active frequency on an
//! FQ_UD pulse. Each tick therefore FIRST pulses FQ_UD, committing the
//! word staged on the previous tick, THEN stages the next word. That
//! ordering is load-bearing: reversed, every word applies one tick early
//! and phase continuity breaks once per table traversal.
//!
//! The tick path is a fixed sequence of port writes with a single
//! fixed-length loop (the 4-byte transfer). No blocking, no allocation,
//! no fallible calls; it must finish before the next compare match or
//! the tone glitches. That deadline is a platform property, not a
//! recoverable error.

use crate::dds::bus::DdsBus;
use crate::dds::table::{Cursor, ModulationTable};
use crate::dds::tuning::WORD_BYTES;

/// One-time init: reset the chip into parallel-load mode.
///
/// Clears FQ_UD, then pulses RESET (clear, assert, clear). Run before
/// the periodic timer is armed; the first tick afterwards stages the
/// first word, the second tick makes it active.
pub fn enter_parallel_load<B: DdsBus>(bus: &mut B) {
    bus.set_update(false);
    bus.set_reset(false);
    bus.set_reset(true);
    bus.set_reset(false);
}

/// Streaming state owned by the timer interrupt context.
///
/// The cursor lives here and nowhere else. `main` hands the streamer to
/// the timer callback before arming it and never reads it back.
pub struct Streamer<'a> {
    table: &'a ModulationTable,
    cursor: Cursor,
}

impl<'a> Streamer<'a> {
    pub fn new(table: &'a ModulationTable) -> Self {
        Self {
            table,
            cursor: Cursor::new(),
        }
    }

    /// Current cursor. Diagnostics and tests only; the interrupt context
    /// is the sole runtime reader.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// One pass of the per-tick load protocol.
    ///
    /// 1. trigger-assert (scope marker)
    /// 2. FQ_UD pulse: commit the word staged last tick
    /// 3. read `table[cursor]`
    /// 4. control/phase byte 0x00 on both lanes, one W_CLK pulse
    /// 5. four tuning-word bytes MSB first, one W_CLK pulse each
    /// 6. advance cursor
    /// 7. trigger-deassert
    #[inline]
    pub fn tick<B: DdsBus>(&mut self, bus: &mut B) {
        bus.set_trigger(true);

        // Commit the previously staged word.
        bus.toggle_update();
        bus.toggle_update();

        let word = self.table.word(self.cursor);

        // Control/phase byte: no phase offset, no power-down.
        bus.write_low6(0);
        bus.write_high2(0);
        bus.toggle_clock();
        bus.toggle_clock();

        // Stage the 32-bit word into the chip's pending buffer.
        for j in 0..WORD_BYTES {
            bus.write_low6(word.low6(j));
            bus.write_high2(word.high2(j));
            bus.toggle_clock();
            bus.toggle_clock();
        }

        self.cursor.advance();

        bus.set_trigger(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BeaconConfig;
    use crate::dds::table::TABLE_LEN;

    /// Bus that ignores every write. For cursor-only assertions.
    struct NullBus;

    impl DdsBus for NullBus {
        fn set_reset(&mut self, _high: bool) {}
        fn set_update(&mut self, _high: bool) {}
        fn set_trigger(&mut self, _high: bool) {}
        fn toggle_update(&mut self) {}
        fn toggle_clock(&mut self) {}
        fn write_low6(&mut self, _bits: u8) {}
        fn write_high2(&mut self, _bits: u8) {}
    }

    #[test]
    fn test_cursor_advances_once_per_tick() {
        let table = ModulationTable::build(&BeaconConfig::DEFAULT).unwrap();
        let mut streamer = Streamer::new(&table);
        let mut bus = NullBus;

        assert_eq!(streamer.cursor().index(), 0);
        streamer.tick(&mut bus);
        assert_eq!(streamer.cursor().index(), 1);
        streamer.tick(&mut bus);
        assert_eq!(streamer.cursor().index(), 2);
    }

    #[test]
    fn test_cursor_full_cycle_returns_to_start() {
        let table = ModulationTable::build(&BeaconConfig::DEFAULT).unwrap();
        let mut streamer = Streamer::new(&table);
        let mut bus = NullBus;

        let mut seen = [false; TABLE_LEN];
        for _ in 0..TABLE_LEN {
            let idx = streamer.cursor().index();
            assert!(!seen[idx], "cursor revisited {} within one cycle", idx);
            seen[idx] = true;
            streamer.tick(&mut bus);
        }
        assert_eq!(streamer.cursor().index(), 0);
        assert!(seen.iter().all(|&v| v));
    }
}
