use crate::checksum::{Digest, DigestReader, DigestSink};
use crate::codec::{self, DecodeStats, EncodeOutcome, EncodeStats, StreamInfo, Termination};
use crate::config::{ChecksumType, Mode, RleConfig};
use crate::error::{Result, RleError};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct CompressionStats {
	pub outcome: EncodeOutcome,
	pub original_size: u64,
	pub compressed_size: u64,
	pub ratio: f64,
	pub runs: u64,
	pub capped_runs: u64,
	/// Digest of the input, present when verification was requested.
	pub checksum: Option<Digest>,
	pub processing_time: Duration,
}

impl CompressionStats {
	fn from_encode(stats: EncodeStats, checksum: Option<Digest>, processing_time: Duration) -> Self {
		Self {
			outcome: stats.outcome,
			original_size: stats.bytes_in,
			compressed_size: stats.bytes_out,
			ratio: ratio(stats.bytes_in, stats.bytes_out),
			runs: stats.runs,
			capped_runs: stats.capped_runs,
			checksum,
			processing_time,
		}
	}
}

#[derive(Debug)]
pub struct DecompressionStats {
	pub compressed_size: u64,
	pub decompressed_size: u64,
	pub ratio: f64,
	pub processing_time: Duration,
	pub decode: DecodeStats,
}

/// Outcome of one [`run`], carrying the stats of whichever direction ran.
#[derive(Debug)]
pub enum Report {
	Compressed(CompressionStats),
	Decompressed(DecompressionStats),
}

impl Report {
	pub fn mode(&self) -> Mode {
		match self {
			Report::Compressed(_) => Mode::Compress,
			Report::Decompressed(_) => Mode::Decompress,
		}
	}

	/// False only when decoding stopped on a read failure.
	pub fn is_success(&self) -> bool {
		match self {
			Report::Compressed(_) => true,
			Report::Decompressed(stats) => stats.decode.termination == Termination::Clean,
		}
	}

	pub fn message(&self) -> &'static str {
		match self {
			Report::Compressed(stats) if stats.outcome == EncodeOutcome::Empty => {
				"Input file is empty. Nothing to compress."
			}
			Report::Compressed(_) => "Compression completed successfully.",
			Report::Decompressed(_) if !self.is_success() => {
				"Decompression ended due to a read error or malformed data."
			}
			Report::Decompressed(_) => "Decompression completed successfully.",
		}
	}
}

fn ratio(original: u64, compressed: u64) -> f64 {
	if compressed > 0 { original as f64 / compressed as f64 } else { 0.0 }
}

fn progress_bar(config: &RleConfig, total: Option<u64>) -> ProgressBar {
	if !config.progress {
		return ProgressBar::hidden();
	}
	match total {
		Some(len) => {
			let pb = ProgressBar::new(len);
			if let Ok(style) = ProgressStyle::default_bar()
				.template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
			{
				pb.set_style(style.progress_chars("#>-"));
			}
			pb
		}
		None => ProgressBar::new_spinner(),
	}
}

pub fn compress<R: Read, W: Write>(
	reader: &mut R,
	writer: &mut W,
	config: &RleConfig,
) -> Result<CompressionStats> {
	compress_with_progress(reader, writer, config, progress_bar(config, None))
}

fn compress_with_progress<R: Read, W: Write>(
	reader: &mut R,
	writer: &mut W,
	config: &RleConfig,
	pb: ProgressBar,
) -> Result<CompressionStats> {
	let start = Instant::now();
	// Progress and digest sit below the buffer.
	let tracked = pb.wrap_read(reader);

	let (stats, checksum) = if config.verify {
		let mut buffered = BufReader::new(DigestReader::new(tracked, config.checksum));
		let stats = codec::encode(&mut buffered, writer)?;
		(stats, Some(buffered.into_inner().finish()))
	} else {
		(codec::encode(&mut BufReader::new(tracked), writer)?, None)
	};
	pb.finish_and_clear();

	if stats.is_empty() {
		info!("Input is empty, nothing to compress");
	}
	let stats = CompressionStats::from_encode(stats, checksum, start.elapsed());
	info!(
		"Compressed {} bytes into {} bytes ({} runs, ratio {:.2}x)",
		stats.original_size, stats.compressed_size, stats.runs, stats.ratio
	);
	Ok(stats)
}

pub fn decompress<R: Read, W: Write>(
	reader: &mut R,
	writer: &mut W,
	config: &RleConfig,
) -> Result<DecompressionStats> {
	decompress_with_progress(reader, writer, config, progress_bar(config, None))
}

fn decompress_with_progress<R: Read, W: Write>(
	reader: &mut R,
	writer: &mut W,
	config: &RleConfig,
	pb: ProgressBar,
) -> Result<DecompressionStats> {
	let start = Instant::now();
	let mut buffered = BufReader::new(pb.wrap_read(reader));
	let decode = codec::decode(&mut buffered, writer)?;
	pb.finish_and_clear();

	let stats = DecompressionStats {
		compressed_size: decode.bytes_in,
		decompressed_size: decode.bytes_out,
		ratio: ratio(decode.bytes_out, decode.bytes_in),
		processing_time: start.elapsed(),
		decode,
	};
	info!(
		"Decompressed {} bytes into {} bytes ({} warnings)",
		stats.compressed_size,
		stats.decompressed_size,
		stats.decode.warnings.len()
	);

	// A dropped trailing byte is not a warning, so it passes here.
	if config.strict {
		if let Some(first) = stats.decode.warnings.first() {
			return Err(RleError::MalformedStream(format!(
				"{} warning(s) in {} records, first: {}",
				stats.decode.warnings.len(),
				stats.decode.pairs,
				first
			)));
		}
	}
	Ok(stats)
}

/// Decode `compressed` into a digest and compare it with `expected`.
pub fn verify_round_trip<R: Read>(compressed: &mut R, expected: &Digest, checksum: ChecksumType) -> Result<()> {
	let mut sink = DigestSink::new(checksum);
	let decode = codec::decode(compressed, &mut sink)?;
	let actual = sink.finish();
	if !decode.is_clean() || actual != *expected {
		warn!("Round-trip verification failed: expected {}, got {}", expected, actual);
		return Err(RleError::VerificationFailed { expected: expected.to_string(), actual: actual.to_string() });
	}
	info!("Round-trip verified ({})", actual);
	Ok(())
}

/// Run one compress or decompress operation between two files.
///
/// The input is opened before the output is created, so an unreadable input
/// never truncates an existing output file. Both handles are released when
/// this returns, on success and on error.
pub fn run(mode: Mode, input: &Path, output: &Path, config: &RleConfig) -> Result<Report> {
	let mut in_file = File::open(input).map_err(|source| RleError::OpenInput { path: input.to_path_buf(), source })?;
	let total = in_file.metadata().ok().map(|m| m.len());
	let out_file = File::create(output).map_err(|source| RleError::OpenOutput { path: output.to_path_buf(), source })?;
	info!("{} {} -> {}", mode, input.display(), output.display());

	let mut writer = BufWriter::new(out_file);
	let pb = progress_bar(config, total);

	let report = match mode {
		Mode::Compress => Report::Compressed(compress_with_progress(&mut in_file, &mut writer, config, pb)?),
		Mode::Decompress => Report::Decompressed(decompress_with_progress(&mut in_file, &mut writer, config, pb)?),
	};
	writer.flush()?;
	drop(writer);
	drop(in_file);

	if let Report::Compressed(CompressionStats { checksum: Some(expected), .. }) = &report {
		let mut written = BufReader::new(File::open(output)?);
		verify_round_trip(&mut written, expected, config.checksum)?;
	}

	Ok(report)
}

/// [`run`] with the mode given as text, as the interactive front end supplies it.
pub fn run_named(mode: &str, input: &Path, output: &Path, config: &RleConfig) -> Result<Report> {
	let mode: Mode = mode.parse()?;
	run(mode, input, output, config)
}

pub fn info<R: Read>(reader: &mut R) -> Result<StreamInfo> {
	codec::inspect(reader)
}

/// True if the stream is exactly what the encoder would produce.
pub fn validate<R: Read>(reader: &mut R) -> Result<bool> {
	let info = codec::inspect(reader)?;
	if !info.is_canonical() {
		warn!(
			"Stream is not canonical: {} zero-count, {} mergeable, {} underfilled, trailing byte {:?}",
			info.zero_count_pairs, info.mergeable_pairs, info.underfilled_pairs, info.trailing_byte
		);
	}
	Ok(info.is_canonical())
}

/// Ratio the encoder would achieve on `reader`, without writing anything.
pub fn estimate_compression<R: Read>(reader: &mut R) -> Result<f64> {
	let stats = codec::encode(reader, &mut io::sink())?;
	Ok(ratio(stats.bytes_in, stats.bytes_out))
}
