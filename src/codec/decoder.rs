//! Run-length decoder.
//!
//! Decoding is permissive: zero-count records are skipped with a warning, a
//! lone trailing count byte is dropped, and a read failure ends the stream
//! with a warning instead of an error. Only write failures are fatal.

use super::framing::{read_record, Record};
use super::{MAX_RUN, PAIR_LEN};
use crate::error::Result;
use log::{debug, warn};
use std::fmt;
use std::io::{self, Read, Write};

bitflags::bitflags! {
	#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
	pub struct Anomalies: u8 {
		const ZERO_COUNT   = 0b00000001;
		const TRUNCATED    = 0b00000010;
		const READ_FAILURE = 0b00000100;
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeWarning {
	/// A record with count 0 at `offset` was skipped.
	ZeroCount { offset: u64, value: u8 },
	/// Reading failed at `offset`; nothing after it was decoded.
	ReadFailure { offset: u64, kind: io::ErrorKind, message: String },
}

impl fmt::Display for DecodeWarning {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DecodeWarning::ZeroCount { offset, value } => write!(
				f,
				"Encountered zero count at offset {} (value 0x{:02X}). Skipping.",
				offset, value
			),
			DecodeWarning::ReadFailure { offset, message, .. } => {
				write!(f, "Read failed at offset {}: {}", offset, message)
			}
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Termination {
	/// Input was exhausted, possibly leaving one discarded byte.
	#[default]
	Clean,
	ReadFailure,
}

#[derive(Debug, Clone, Default)]
pub struct DecodeStats {
	pub bytes_in: u64,
	pub bytes_out: u64,
	/// Complete records read, zero-count ones included.
	pub pairs: u64,
	pub warnings: Vec<DecodeWarning>,
	/// Lone byte found after the last complete record.
	pub trailing_byte: Option<u8>,
	pub termination: Termination,
}

impl DecodeStats {
	pub fn is_clean(&self) -> bool {
		self.warnings.is_empty()
	}

	pub fn zero_count_pairs(&self) -> usize {
		self.warnings
			.iter()
			.filter(|w| matches!(w, DecodeWarning::ZeroCount { .. }))
			.count()
	}

	pub fn anomalies(&self) -> Anomalies {
		let mut flags = Anomalies::empty();
		if self.zero_count_pairs() > 0 {
			flags |= Anomalies::ZERO_COUNT;
		}
		if self.trailing_byte.is_some() {
			flags |= Anomalies::TRUNCATED;
		}
		if self.termination == Termination::ReadFailure {
			flags |= Anomalies::READ_FAILURE;
		}
		flags
	}
}

/// Expand the records in `reader` into `writer`.
pub fn decode<R: Read, W: Write>(reader: &mut R, writer: &mut W) -> Result<DecodeStats> {
	let mut stats = DecodeStats::default();
	let mut expanded = [0u8; MAX_RUN as usize];

	loop {
		let offset = stats.bytes_in;
		match read_record(reader) {
			Ok(Record::End) => break,
			Ok(Record::Trailing(byte)) => {
				debug!("Discarding trailing byte 0x{:02X} at offset {}", byte, offset);
				stats.bytes_in += 1;
				stats.trailing_byte = Some(byte);
				break;
			}
			Ok(Record::Pair(run)) => {
				stats.bytes_in += PAIR_LEN;
				stats.pairs += 1;
				if run.is_empty() {
					let warning = DecodeWarning::ZeroCount { offset, value: run.value };
					warn!("{}", warning);
					stats.warnings.push(warning);
					continue;
				}
				let block = &mut expanded[..run.len()];
				block.fill(run.value);
				writer.write_all(block)?;
				stats.bytes_out += run.len() as u64;
			}
			Err(e) => {
				stats.bytes_in += e.consumed;
				let warning = DecodeWarning::ReadFailure {
					offset: offset + e.consumed,
					kind: e.source.kind(),
					message: e.source.to_string(),
				};
				warn!("{}", warning);
				stats.warnings.push(warning);
				stats.termination = Termination::ReadFailure;
				break;
			}
		}
	}

	debug!("Decoded {} records into {} bytes", stats.pairs, stats.bytes_out);
	Ok(stats)
}

pub fn decode_slice(data: &[u8]) -> Result<(Vec<u8>, DecodeStats)> {
	let mut input = data;
	let mut decoded = Vec::with_capacity(data.len() * 2);
	let stats = decode(&mut input, &mut decoded)?;
	Ok((decoded, stats))
}
