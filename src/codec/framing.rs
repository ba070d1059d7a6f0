use super::Run;
use byteorder::{ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};
use thiserror::Error;

/// What the next read from a compressed stream produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
	/// A complete `[count][value]` record.
	Pair(Run),
	/// The stream ended after a lone count byte.
	Trailing(u8),
	/// The stream ended on a record boundary.
	End,
}

/// A read failure, with how many bytes of the current record were already consumed.
#[derive(Error, Debug)]
#[error("read failed {consumed} byte(s) into a record: {source}")]
pub struct RecordReadError {
	pub consumed: u64,
	pub source: io::Error,
}

pub fn write_pair<W: Write>(writer: &mut W, run: Run) -> io::Result<()> {
	writer.write_u8(run.count)?;
	writer.write_u8(run.value)
}

/// Read one record. End-of-stream is never an error here; any other I/O
/// failure is passed through for the caller to classify.
pub fn read_record<R: Read>(reader: &mut R) -> Result<Record, RecordReadError> {
	let count = match reader.read_u8() {
		Ok(count) => count,
		Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(Record::End),
		Err(source) => return Err(RecordReadError { consumed: 0, source }),
	};
	match reader.read_u8() {
		Ok(value) => Ok(Record::Pair(Run::new(count, value))),
		Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(Record::Trailing(count)),
		Err(source) => Err(RecordReadError { consumed: 1, source }),
	}
}
