use super::framing::{read_record, Record};
use super::{Run, MAX_RUN, PAIR_LEN};
use crate::error::Result;
use std::io::Read;

/// Summary of a compressed stream, gathered without expanding it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamInfo {
    pub compressed_size: u64,
    pub original_size: u64,
    pub pairs: u64,
    pub zero_count_pairs: u64,
    /// Adjacent records with the same value that would fit in one record.
    pub mergeable_pairs: u64,
    /// Records short of the cap that are followed by a record with the same value.
    pub underfilled_pairs: u64,
    pub trailing_byte: Option<u8>,
    pub ratio: f64,
}

impl StreamInfo {
    /// True if this stream is exactly what the encoder would have written.
    pub fn is_canonical(&self) -> bool {
        self.zero_count_pairs == 0
            && self.mergeable_pairs == 0
            && self.underfilled_pairs == 0
            && self.trailing_byte.is_none()
    }
}

/// Walk a compressed stream record by record. Unlike decoding, read
/// failures here are returned as errors.
pub fn inspect<R: Read>(reader: &mut R) -> Result<StreamInfo> {
    let mut info = StreamInfo::default();
    let mut previous: Option<Run> = None;

    loop {
        match read_record(reader).map_err(|e| e.source)? {
            Record::End => break,
            Record::Trailing(byte) => {
                info.compressed_size += 1;
                info.trailing_byte = Some(byte);
                break;
            }
            Record::Pair(run) => {
                info.compressed_size += PAIR_LEN;
                info.pairs += 1;
                if run.is_empty() {
                    info.zero_count_pairs += 1;
                    continue;
                }
                if let Some(prev) = previous.filter(|prev| prev.value == run.value) {
                    // The encoder only repeats a value after filling a record.
                    if (prev.count as u16) < MAX_RUN {
                        info.underfilled_pairs += 1;
                    }
                    if (prev.count as u16 + run.count as u16) <= MAX_RUN {
                        info.mergeable_pairs += 1;
                    }
                }
                info.original_size += run.len() as u64;
                previous = Some(run);
            }
        }
    }

    info.ratio = if info.compressed_size > 0 {
        info.original_size as f64 / info.compressed_size as f64
    } else {
        0.0
    };
    Ok(info)
}
