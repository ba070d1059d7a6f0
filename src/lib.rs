//! # rlepack
//!
//! A byte-oriented run-length encoding codec. Every run of identical bytes
//! becomes a two-byte `[count][value]` record, with runs capped at 255 bytes.
//!
//! ## Features
//!
//! - **Streaming**: encoder and decoder read and write incrementally with
//!   constant memory, using a one-byte lookahead instead of seeking
//! - **Permissive decoding**: zero-count records are skipped with a warning
//!   and a dangling final byte is dropped, matching existing files in the wild
//! - **Round-trip verification**: optional CRC32 or SHA-256 check that the
//!   compressed output expands back to the input
//! - **Stream inspection**: report sizes and canonical-form violations without
//!   expanding a file
//!
//! ## Quick Start
//!
//! ```rust
//! use rlepack::{compress_data, decompress_data, RleConfig};
//!
//! let original = b"aaaaaaaaaabbbc";
//! let compressed = compress_data(original, &RleConfig::default()).unwrap();
//! assert_eq!(compressed, vec![10, b'a', 3, b'b', 1, b'c']);
//!
//! let decompressed = decompress_data(&compressed).unwrap();
//! assert_eq!(original.to_vec(), decompressed);
//! ```
//!
//! ### Working with Files
//!
//! ```rust,no_run
//! use rlepack::{pipeline, Mode, RleConfig};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RleConfig::default().with_verify(true);
//! let report = pipeline::run(Mode::Compress, Path::new("input.bin"), Path::new("output.rle"), &config)?;
//! println!("{}", report.message());
//! # Ok(())
//! # }
//! ```

pub mod checksum;
pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod pipeline;

// Re-export commonly used types for convenience
pub use codec::{DecodeStats, DecodeWarning, EncodeOutcome, EncodeStats, StreamInfo};
pub use config::{ChecksumType, Mode, RleConfig};
pub use error::{Result, RleError};
pub use pipeline::{compress, decompress, run, run_named, CompressionStats, DecompressionStats, Report};

use std::io::Cursor;

/// Compress data in memory.
///
/// With `config.verify` set, the result is decoded again and checked against
/// a digest of `data` before it is returned.
///
/// # Example
///
/// ```rust
/// use rlepack::{compress_data, RleConfig};
///
/// let compressed = compress_data(&[0x41; 300], &RleConfig::default()).unwrap();
/// assert_eq!(compressed, vec![0xFF, 0x41, 0x2D, 0x41]);
/// ```
pub fn compress_data(data: &[u8], config: &RleConfig) -> Result<Vec<u8>> {
    let mut input = Cursor::new(data);
    let mut output = Vec::new();

    let stats = pipeline::compress(&mut input, &mut output, config)?;
    if let Some(expected) = &stats.checksum {
        pipeline::verify_round_trip(&mut output.as_slice(), expected, config.checksum)?;
    }
    Ok(output)
}

/// Decompress data in memory, tolerating malformed records.
///
/// Use [`decompress_data_with_stats`] to see what was tolerated.
pub fn decompress_data(compressed_data: &[u8]) -> Result<Vec<u8>> {
    decompress_data_with_stats(compressed_data).map(|(data, _)| data)
}

/// Like [`decompress_data`], also returning warnings and the trailing byte, if any.
///
/// ```rust
/// use rlepack::decompress_data_with_stats;
///
/// let (data, stats) = decompress_data_with_stats(&[0x00, 0x41, 0x02, 0x42]).unwrap();
/// assert_eq!(data, vec![0x42, 0x42]);
/// assert_eq!(stats.warnings.len(), 1);
/// ```
pub fn decompress_data_with_stats(compressed_data: &[u8]) -> Result<(Vec<u8>, DecodeStats)> {
    codec::decode_slice(compressed_data)
}

/// Get information about compressed data without expanding it.
pub fn get_compression_info(compressed_data: &[u8]) -> Result<StreamInfo> {
    let mut input = Cursor::new(compressed_data);
    pipeline::info(&mut input)
}

/// Check whether compressed data is in canonical encoder form.
///
/// Non-canonical data still decodes; this only reports zero counts, records
/// that could have been merged, and a dangling final byte.
pub fn validate_data(compressed_data: &[u8]) -> Result<bool> {
    let mut input = Cursor::new(compressed_data);
    pipeline::validate(&mut input)
}

/// Estimate the compression ratio for data without producing output.
///
/// Values below 1.0 mean the encoded form would be larger than the input.
pub fn estimate_compression_ratio(data: &[u8]) -> Result<f64> {
    let mut input = Cursor::new(data);
    pipeline::estimate_compression(&mut input)
}

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get library version information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        version: VERSION,
        authors: AUTHORS,
        description: DESCRIPTION,
    }
}

#[derive(Debug, Clone)]
pub struct VersionInfo {
    pub version: &'static str,
    pub authors: &'static str,
    pub description: &'static str,
}
