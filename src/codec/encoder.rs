//! Run-length encoder.
//!
//! Runs are closed as soon as the next byte differs or the run hits
//! [`MAX_RUN`], so a physical run longer than 255 bytes becomes several
//! consecutive records with the same value.

use super::framing::write_pair;
use super::lookahead::Lookahead;
use super::{Run, MAX_RUN, PAIR_LEN};
use crate::error::Result;
use log::debug;
use std::io::{self, Read, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodeOutcome {
    /// The input had no bytes; nothing was written.
    #[default]
    Empty,
    Encoded,
}

#[derive(Debug, Clone, Default)]
pub struct EncodeStats {
    pub outcome: EncodeOutcome,
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub runs: u64,
    /// Runs closed because they reached the length cap.
    pub capped_runs: u64,
}

impl EncodeStats {
    pub fn is_empty(&self) -> bool {
        self.outcome == EncodeOutcome::Empty
    }
}

/// Encode everything `reader` yields into `writer`, one record per run.
///
/// Memory use is constant: each record is written as soon as its run closes.
/// Read and write failures are returned as [`RleError::Io`](crate::RleError::Io).
pub fn encode<R: Read, W: Write>(reader: &mut R, writer: &mut W) -> Result<EncodeStats> {
    let mut source = Lookahead::new(reader);
    let mut stats = EncodeStats::default();

    let Some(mut value) = source.next_byte()? else {
        debug!("Input is empty, nothing to encode");
        return Ok(stats);
    };

    loop {
        let mut count: u16 = 1;
        while count < MAX_RUN {
            match source.next_byte()? {
                Some(next) if next == value => count += 1,
                Some(next) => {
                    source.unread(next);
                    break;
                }
                None => break,
            }
        }

        write_pair(writer, Run::capped(count, value))?;
        stats.runs += 1;
        if count == MAX_RUN {
            stats.capped_runs += 1;
        }

        // After a capped run this starts a new record even if the byte repeats.
        match source.next_byte()? {
            Some(next) => value = next,
            None => break,
        }
    }

    stats.outcome = EncodeOutcome::Encoded;
    stats.bytes_in = source.bytes_read();
    stats.bytes_out = stats.runs * PAIR_LEN;
    debug!(
        "Encoded {} bytes into {} runs ({} capped)",
        stats.bytes_in, stats.runs, stats.capped_runs
    );
    Ok(stats)
}

pub fn encode_slice(data: &[u8]) -> Result<Vec<u8>> {
    let mut input = data;
    let mut encoded = Vec::with_capacity(data.len().min(1 << 20));
    encode(&mut input, &mut encoded)?;
    Ok(encoded)
}

/// Number of records [`encode`] would emit for `reader`, without producing them.
pub fn count_runs<R: Read>(reader: &mut R) -> Result<u64> {
    let stats = encode(reader, &mut io::sink())?;
    Ok(stats.runs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_empty() {
        let mut input: &[u8] = &[];
        let mut out = Vec::new();
        let stats = encode(&mut input, &mut out).unwrap();
        assert!(out.is_empty());
        assert!(stats.is_empty());
        assert_eq!(stats.runs, 0);
    }

    #[test]
    fn test_encode_single_byte() {
        assert_eq!(encode_slice(&[0x41]).unwrap(), vec![0x01, 0x41]);
    }

    #[test]
    fn test_encode_uniform_run() {
        assert_eq!(encode_slice(&[0x41; 10]).unwrap(), vec![0x0A, 0x41]);
    }

    #[test]
    fn test_encode_run_at_cap() {
        assert_eq!(encode_slice(&[0x41; 255]).unwrap(), vec![0xFF, 0x41]);
        assert_eq!(encode_slice(&[0x41; 256]).unwrap(), vec![0xFF, 0x41, 0x01, 0x41]);
    }

    #[test]
    fn test_encode_run_over_cap() {
        let mut input: &[u8] = &[0x41; 300];
        let mut out = Vec::new();
        let stats = encode(&mut input, &mut out).unwrap();
        assert_eq!(out, vec![0xFF, 0x41, 0x2D, 0x41]);
        assert_eq!(stats.runs, 2);
        assert_eq!(stats.capped_runs, 1);
        assert_eq!(stats.bytes_in, 300);
        assert_eq!(stats.bytes_out, 4);
    }

    #[test]
    fn test_encode_alternating() {
        assert_eq!(
            encode_slice(&[0x41, 0x42, 0x41, 0x42]).unwrap(),
            vec![0x01, 0x41, 0x01, 0x42, 0x01, 0x41, 0x01, 0x42]
        );
    }

    #[test]
    fn test_encode_mixed_runs() {
        assert_eq!(
            encode_slice(b"AAABCCDDDD").unwrap(),
            vec![3, b'A', 1, b'B', 2, b'C', 4, b'D']
        );
    }

    #[test]
    fn test_encode_zero_bytes_are_ordinary() {
        assert_eq!(encode_slice(&[0, 0, 0, 7]).unwrap(), vec![3, 0, 1, 7]);
    }

    #[test]
    fn test_long_run_then_different_byte() {
        let mut data = vec![0x00; 510];
        data.push(0x01);
        assert_eq!(encode_slice(&data).unwrap(), vec![0xFF, 0x00, 0xFF, 0x00, 0x01, 0x01]);
    }

    #[test]
    fn test_count_runs() {
        let mut input: &[u8] = b"aabbbc";
        assert_eq!(count_runs(&mut input).unwrap(), 3);
        let mut empty: &[u8] = &[];
        assert_eq!(count_runs(&mut empty).unwrap(), 0);
    }
}
