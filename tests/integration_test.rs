use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use rlepack::config::{ChecksumType, Mode, RleConfig};
use rlepack::{codec, pipeline, EncodeOutcome, Report, RleError};
use std::fs;
use tempfile::TempDir;

fn random_runs(rng: &mut StdRng, len: usize) -> Vec<u8> {
	let mut data = Vec::with_capacity(len);
	while data.len() < len {
		let value: u8 = rng.gen_range(0..4);
		let run = rng.gen_range(1..700usize).min(len - data.len());
		data.extend(std::iter::repeat(value).take(run));
	}
	data
}

#[test]
fn round_trip_small_buffer() {
	let input_data = (0..1024u32).flat_map(|x| x.to_le_bytes()).collect::<Vec<_>>();
	let mut reader = std::io::Cursor::new(input_data.clone());
	let mut compressed = Vec::new();
	let cfg = RleConfig::default();
	let _ = pipeline::compress(&mut reader, &mut compressed, &cfg).unwrap();

	let mut comp_reader = std::io::Cursor::new(compressed);
	let mut restored = Vec::new();
	pipeline::decompress(&mut comp_reader, &mut restored, &cfg).unwrap();
	assert_eq!(restored, input_data);
}

#[test]
fn round_trip_random_inputs() {
	let mut rng = StdRng::seed_from_u64(0x5EED);
	for _ in 0..50 {
		let len = rng.gen_range(0..5000);
		let data: Vec<u8> = if rng.gen_bool(0.5) {
			random_runs(&mut rng, len)
		} else {
			(0..len).map(|_| rng.gen()).collect()
		};
		let encoded = codec::encode_slice(&data).unwrap();
		assert_eq!(encoded.len() % 2, 0);
		assert!(encoded.chunks(2).all(|pair| pair[0] >= 1));

		let (decoded, stats) = codec::decode_slice(&encoded).unwrap();
		assert_eq!(decoded, data);
		assert!(stats.anomalies().is_empty());
		assert!(codec::inspect(&mut encoded.as_slice()).unwrap().is_canonical());
	}
}

#[test]
fn file_round_trip_with_verification() {
	let temp_dir = TempDir::new().unwrap();
	let input_path = temp_dir.path().join("input.bin");
	let packed_path = temp_dir.path().join("input.rle");
	let restored_path = temp_dir.path().join("restored.bin");

	let mut rng = StdRng::seed_from_u64(7);
	let data = random_runs(&mut rng, 100_000);
	fs::write(&input_path, &data).unwrap();

	for checksum in [ChecksumType::CRC32, ChecksumType::SHA256] {
		let config = RleConfig::default().with_verify(true).with_checksum(checksum);
		let report = pipeline::run(Mode::Compress, &input_path, &packed_path, &config).unwrap();
		assert_eq!(report.message(), "Compression completed successfully.");
		match &report {
			Report::Compressed(stats) => {
				assert_eq!(stats.original_size, data.len() as u64);
				assert_eq!(stats.compressed_size, fs::metadata(&packed_path).unwrap().len());
				assert!(stats.checksum.is_some());
			}
			other => panic!("unexpected report: {:?}", other),
		}
	}

	let report = pipeline::run(Mode::Decompress, &packed_path, &restored_path, &RleConfig::default()).unwrap();
	assert!(report.is_success());
	assert_eq!(report.message(), "Decompression completed successfully.");
	assert_eq!(fs::read(&restored_path).unwrap(), data);
}

#[test]
fn empty_file_is_nothing_to_do() {
	let temp_dir = TempDir::new().unwrap();
	let input_path = temp_dir.path().join("empty.bin");
	let output_path = temp_dir.path().join("empty.rle");
	fs::write(&input_path, b"").unwrap();

	let report = pipeline::run(Mode::Compress, &input_path, &output_path, &RleConfig::default()).unwrap();
	match &report {
		Report::Compressed(stats) => assert_eq!(stats.outcome, EncodeOutcome::Empty),
		other => panic!("unexpected report: {:?}", other),
	}
	assert_eq!(report.message(), "Input file is empty. Nothing to compress.");
	assert_eq!(fs::read(&output_path).unwrap(), Vec::<u8>::new());

	let restored_path = temp_dir.path().join("empty.out");
	let report = pipeline::run(Mode::Decompress, &output_path, &restored_path, &RleConfig::default()).unwrap();
	assert!(report.is_success());
	assert!(fs::read(&restored_path).unwrap().is_empty());
}

#[test]
fn malformed_file_decodes_with_warnings() {
	let temp_dir = TempDir::new().unwrap();
	let input_path = temp_dir.path().join("bad.rle");
	let output_path = temp_dir.path().join("bad.out");
	fs::write(&input_path, [0x00, 0x41, 0x02, 0x42, 0x05]).unwrap();

	let report = pipeline::run(Mode::Decompress, &input_path, &output_path, &RleConfig::default()).unwrap();
	match &report {
		Report::Decompressed(stats) => {
			assert_eq!(stats.decode.zero_count_pairs(), 1);
			assert_eq!(stats.decode.trailing_byte, Some(0x05));
		}
		other => panic!("unexpected report: {:?}", other),
	}
	assert!(report.is_success());
	assert_eq!(fs::read(&output_path).unwrap(), vec![0x42, 0x42]);

	let strict = RleConfig::default().with_strict(true);
	let err = pipeline::run(Mode::Decompress, &input_path, &output_path, &strict).unwrap_err();
	assert!(matches!(err, RleError::MalformedStream(_)));
}

#[test]
fn missing_input_is_open_error() {
	let temp_dir = TempDir::new().unwrap();
	let missing = temp_dir.path().join("does-not-exist.bin");
	let output_path = temp_dir.path().join("out.rle");

	let err = pipeline::run(Mode::Compress, &missing, &output_path, &RleConfig::default()).unwrap_err();
	match err {
		RleError::OpenInput { path, .. } => assert_eq!(path, missing),
		other => panic!("unexpected error: {:?}", other),
	}
	assert!(!output_path.exists());
}

#[test]
fn unwritable_output_is_open_error() {
	let temp_dir = TempDir::new().unwrap();
	let input_path = temp_dir.path().join("input.bin");
	fs::write(&input_path, b"aaab").unwrap();
	let output_path = temp_dir.path().join("no-such-dir").join("out.rle");

	let err = pipeline::run(Mode::Compress, &input_path, &output_path, &RleConfig::default()).unwrap_err();
	assert!(matches!(err, RleError::OpenOutput { .. }));
	assert!(err.to_string().contains("for writing"));
}

#[test]
fn invalid_mode_does_not_touch_files() {
	let temp_dir = TempDir::new().unwrap();
	let input_path = temp_dir.path().join("input.bin");
	let output_path = temp_dir.path().join("out.rle");
	fs::write(&input_path, b"abc").unwrap();

	let err = pipeline::run_named("3", &input_path, &output_path, &RleConfig::default()).unwrap_err();
	assert!(matches!(err, RleError::InvalidMode(ref m) if m == "3"));
	assert!(!output_path.exists());

	let report = pipeline::run_named("1", &input_path, &output_path, &RleConfig::default()).unwrap();
	assert_eq!(report.mode(), Mode::Compress);
	assert_eq!(fs::read(&output_path).unwrap(), vec![1, b'a', 1, b'b', 1, b'c']);
}
