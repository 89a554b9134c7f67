//! AD9850 frequency-word streaming engine.
//!
//! Platform-independent core: tuning-word arithmetic, the precomputed
//! modulation table, the bus-line abstraction and the per-tick streamer
//! that runs inside the timer interrupt.

pub mod bus;
pub mod streamer;
pub mod table;
pub mod tuning;

pub use bus::DdsBus;
pub use streamer::{enter_parallel_load, Streamer};
pub use table::{Cursor, ModulationTable, SINE_1KHZ_HALF, TABLE_LEN};
pub use tuning::{TuningWord, WORD_BYTES};
