use byteorder::ReadBytesExt;
use std::io::{self, Read};

/// Byte reader with room to put back a single byte.
///
/// The encoder has to look at the byte after a run before it knows whether
/// that byte belongs to the run. When it does not, it goes back into
/// `pending` and is handed out again by the next [`Lookahead::next_byte`]
/// call, so the underlying reader never needs to seek.
pub struct Lookahead<R> {
    inner: R,
    pending: Option<u8>,
    bytes_read: u64,
}

impl<R: Read> Lookahead<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pending: None,
            bytes_read: 0,
        }
    }

    /// Next byte, or `None` once the source is exhausted.
    pub fn next_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(byte) = self.pending.take() {
            return Ok(Some(byte));
        }
        match self.inner.read_u8() {
            Ok(byte) => {
                self.bytes_read += 1;
                Ok(Some(byte))
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Put `byte` back. Only one byte may be pending at a time.
    pub fn unread(&mut self, byte: u8) {
        debug_assert!(self.pending.is_none(), "lookahead slot already occupied");
        self.pending = Some(byte);
    }

    /// Bytes pulled from the underlying reader, including a pending one.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}
