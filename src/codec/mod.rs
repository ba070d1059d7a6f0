//! Byte-oriented run-length codec.
//!
//! A compressed stream is a flat sequence of 2-byte records, `[count][value]`,
//! with no header, footer or checksum. `count` is 1..=255 in anything the
//! encoder produces; the decoder tolerates 0 and a dangling final byte.

pub mod decoder;
pub mod encoder;
pub mod framing;
pub mod inspect;
pub mod lookahead;

pub use decoder::{decode, decode_slice, Anomalies, DecodeStats, DecodeWarning, Termination};
pub use encoder::{count_runs, encode, encode_slice, EncodeOutcome, EncodeStats};
pub use framing::{read_record, write_pair, Record, RecordReadError};
pub use inspect::{inspect, StreamInfo};
pub use lookahead::Lookahead;

/// Longest run a single record can carry.
///
/// Kept as `u16` so a counter that has reached the cap never wraps to zero
/// before it is narrowed to the one-byte wire form.
pub const MAX_RUN: u16 = u8::MAX as u16;

/// Size of one `[count][value]` record.
pub const PAIR_LEN: u64 = 2;

/// One encoded record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub count: u8,
    pub value: u8,
}

impl Run {
    pub fn new(count: u8, value: u8) -> Self {
        Self { count, value }
    }

    /// Narrow an encoder-side counter to a record. `count` must be in `1..=MAX_RUN`.
    pub(crate) fn capped(count: u16, value: u8) -> Self {
        debug_assert!((1..=MAX_RUN).contains(&count), "run length {} out of range", count);
        Self { count: count.min(MAX_RUN) as u8, value }
    }

    pub fn len(&self) -> usize {
        self.count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
