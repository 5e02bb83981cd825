//! Output filename generation.
//!
//! Output names must never collide, including across runs started within the
//! same second and across records within one run. [`TimestampNamer`] embeds
//! the wall clock down to microseconds plus a per-run sequence number, which
//! covers both. The [`UniqueNamer`] capability keeps the render loop
//! independent of the clock so tests can supply deterministic names.

use chrono::Timelike;

/// Supplies one collision-free output filename per rendered quote.
pub trait UniqueNamer {
    fn next(&mut self, quote_id: u64) -> String;
}

/// Production namer: `quote_<id>_<YYYYmmddHHMMSS>_<micros>_<seq>.jpg`.
pub struct TimestampNamer {
    seq: u32,
}

impl TimestampNamer {
    pub fn new() -> Self {
        Self { seq: 0 }
    }
}

impl Default for TimestampNamer {
    fn default() -> Self {
        Self::new()
    }
}

impl UniqueNamer for TimestampNamer {
    fn next(&mut self, quote_id: u64) -> String {
        let now = chrono::Local::now();
        let micros = now.nanosecond() / 1_000;
        let name = format!(
            "quote_{}_{}_{:06}_{:03}.jpg",
            quote_id,
            now.format("%Y%m%d%H%M%S"),
            micros,
            self.seq
        );
        self.seq += 1;
        name
    }
}
