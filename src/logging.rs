//! Interrupt-safe logging.
//!
//! The tick path may never block or print: log lines go into a
//! lock-free ring and the idle main loop drains them to the console.
//! Push is O(1) and drops the message when the ring is full; losing a
//! log line is acceptable, stretching a tick is not.
//!
//! One producer at a time, one consumer. The startup thread owns the
//! producer side until the periodic timer is armed; from then on only
//! the tick callback may push. The idle loop is the sole consumer.
//! Coordination is two atomic indices.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

/// Maximum message length in bytes.
pub const MAX_MSG_LEN: usize = 96;

/// Default ring capacity (entries). Must be a power of two.
pub const LOG_RING_SIZE: usize = 64;

/// Log level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// A single log entry.
#[derive(Clone, Copy)]
#[repr(C)]
pub struct LogEntry {
    /// Timestamp in microseconds.
    pub timestamp_us: i64,
    /// Log level.
    pub level: LogLevel,
    /// Message length.
    pub len: u8,
    /// Message bytes (not null-terminated).
    pub msg: [u8; MAX_MSG_LEN],
}

impl Default for LogEntry {
    fn default() -> Self {
        Self {
            timestamp_us: 0,
            level: LogLevel::Info,
            len: 0,
            msg: [0; MAX_MSG_LEN],
        }
    }
}

/// Lock-free SPSC log ring.
pub struct LogRing<const N: usize = LOG_RING_SIZE> {
    entries: UnsafeCell<[LogEntry; N]>,
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: single producer, single consumer. The producer only writes the
// slot at write_idx before publishing it with a Release store; the
// consumer only reads slots below write_idx.
unsafe impl<const N: usize> Sync for LogRing<N> {}
unsafe impl<const N: usize> Send for LogRing<N> {}

impl<const N: usize> LogRing<N> {
    const MASK: u32 = N as u32 - 1;

    /// Create an empty ring.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "log ring size must be a power of 2");

        Self {
            entries: UnsafeCell::new(
                [LogEntry {
                    timestamp_us: 0,
                    level: LogLevel::Info,
                    len: 0,
                    msg: [0; MAX_MSG_LEN],
                }; N],
            ),
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Push an entry. Never blocks; returns `false` and counts a drop
    /// when the ring is full.
    #[inline]
    pub fn push(&self, timestamp_us: i64, level: LogLevel, msg: &[u8]) -> bool {
        let write = self.write_idx.load(Ordering::Relaxed);
        let read = self.read_idx.load(Ordering::Acquire);

        if write.wrapping_sub(read) >= N as u32 {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        let idx = (write & Self::MASK) as usize;

        // SAFETY: single producer; this slot is not visible to the
        // consumer until the Release store below.
        unsafe {
            let entry = &mut (*self.entries.get())[idx];
            entry.timestamp_us = timestamp_us;
            entry.level = level;
            entry.len = msg.len().min(MAX_MSG_LEN) as u8;
            entry.msg[..entry.len as usize].copy_from_slice(&msg[..entry.len as usize]);
        }

        self.write_idx.store(write.wrapping_add(1), Ordering::Release);
        true
    }

    /// Drain the next entry, `None` when empty.
    #[inline]
    pub fn drain(&self) -> Option<LogEntry> {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);

        if read == write {
            return None;
        }

        let idx = (read & Self::MASK) as usize;

        // SAFETY: single consumer; the producer published this slot
        // before advancing write_idx.
        let entry = unsafe { (*self.entries.get())[idx] };

        self.read_idx.store(read.wrapping_add(1), Ordering::Release);
        Some(entry)
    }

    /// Count of dropped messages.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Reset the dropped counter after reporting it.
    #[inline]
    pub fn reset_dropped(&self) {
        self.dropped.store(0, Ordering::Relaxed);
    }

    /// Entries waiting to be drained.
    #[inline]
    pub fn pending(&self) -> u32 {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);
        write.wrapping_sub(read)
    }
}

impl<const N: usize> Default for LogRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Format arguments into a byte buffer, returning the length written.
#[inline]
pub fn format_to_buffer(buf: &mut [u8], args: core::fmt::Arguments<'_>) -> usize {
    use core::fmt::Write;

    struct BufWriter<'a> {
        buf: &'a mut [u8],
        pos: usize,
    }

    impl<'a> Write for BufWriter<'a> {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            let bytes = s.as_bytes();
            let remaining = self.buf.len() - self.pos;
            let to_write = bytes.len().min(remaining);
            self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
            self.pos += to_write;
            Ok(())
        }
    }

    let mut writer = BufWriter { buf, pos: 0 };
    let _ = core::fmt::write(&mut writer, args);
    writer.pos
}

/// Format a drained entry for console output:
/// `[timestamp_us] LEVEL: message\n`.
pub fn format_entry(entry: &LogEntry, buf: &mut [u8]) -> usize {
    let msg = core::str::from_utf8(&entry.msg[..entry.len as usize]).unwrap_or("<invalid utf8>");
    format_to_buffer(
        buf,
        format_args!("[{:10}] {}: {}\n", entry.timestamp_us, entry.level.as_str(), msg),
    )
}

/// Push a formatted message into a ring. Safe in the tick path.
#[macro_export]
macro_rules! rt_log {
    ($level:expr, $ring:expr, $timestamp:expr, $($arg:tt)*) => {{
        let mut buf = [0u8; $crate::logging::MAX_MSG_LEN];
        let len = $crate::logging::format_to_buffer(&mut buf, format_args!($($arg)*));
        $ring.push($timestamp, $level, &buf[..len]);
    }};
}

#[macro_export]
macro_rules! rt_info {
    ($ring:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Info, $ring, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! rt_warn {
    ($ring:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Warn, $ring, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! rt_error {
    ($ring:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Error, $ring, $timestamp, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_drain_roundtrip() {
        let ring = LogRing::<16>::new();

        assert!(ring.push(1000, LogLevel::Info, b"table built"));
        assert_eq!(ring.pending(), 1);

        let entry = ring.drain().unwrap();
        assert_eq!(entry.timestamp_us, 1000);
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(&entry.msg[..entry.len as usize], b"table built");
        assert!(ring.drain().is_none());
    }

    #[test]
    fn test_full_ring_drops() {
        let ring = LogRing::<4>::new();

        for i in 0..4 {
            assert!(ring.push(i, LogLevel::Info, b"x"));
        }
        assert!(!ring.push(4, LogLevel::Info, b"x"));
        assert_eq!(ring.dropped(), 1);

        ring.drain();
        assert!(ring.push(5, LogLevel::Info, b"x"));

        ring.reset_dropped();
        assert_eq!(ring.dropped(), 0);
    }

    #[test]
    fn test_producer_phases_preserve_order() {
        let ring = LogRing::<8>::new();

        // Startup context pushes, then hands the producer side over;
        // later pushes from the tick context stay FIFO-ordered.
        assert!(ring.push(1, LogLevel::Info, b"armed"));
        assert!(ring.push(2, LogLevel::Warn, b"late tick"));

        assert_eq!(ring.drain().unwrap().timestamp_us, 1);
        assert_eq!(ring.drain().unwrap().timestamp_us, 2);
        assert!(ring.drain().is_none());
    }

    #[test]
    fn test_long_message_truncated() {
        let ring = LogRing::<4>::new();
        let long = [b'a'; MAX_MSG_LEN + 32];

        assert!(ring.push(0, LogLevel::Warn, &long));
        let entry = ring.drain().unwrap();
        assert_eq!(entry.len as usize, MAX_MSG_LEN);
    }

    #[test]
    fn test_rt_log_macro() {
        let ring = LogRing::<16>::new();
        rt_info!(ring, 42, "cursor at {}", 7);

        let entry = ring.drain().unwrap();
        assert_eq!(entry.timestamp_us, 42);
        assert_eq!(&entry.msg[..entry.len as usize], b"cursor at 7");
    }

    #[test]
    fn test_format_entry() {
        let mut entry = LogEntry::default();
        entry.timestamp_us = 1234567;
        entry.level = LogLevel::Error;
        entry.len = 5;
        entry.msg[..5].copy_from_slice(b"fault");

        let mut buf = [0u8; 160];
        let len = format_entry(&entry, &mut buf);
        let text = core::str::from_utf8(&buf[..len]).unwrap();
        assert!(text.contains("1234567"));
        assert!(text.contains("ERROR"));
        assert!(text.contains("fault"));
        assert!(text.ends_with('\n'));
    }
}
