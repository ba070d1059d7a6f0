use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RleError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Could not open input file \"{}\" for reading: {source}", .path.display())]
	OpenInput {
		path: PathBuf,
		source: std::io::Error,
	},

	#[error("Could not open output file \"{}\" for writing: {source}", .path.display())]
	OpenOutput {
		path: PathBuf,
		source: std::io::Error,
	},

	#[error("Invalid mode \"{0}\": choose compress (1) or decompress (2)")]
	InvalidMode(String),

	#[error("Malformed RLE stream: {0}")]
	MalformedStream(String),

	#[error("Round-trip verification failed: expected {expected}, got {actual}")]
	VerificationFailed { expected: String, actual: String },

	#[error("Configuration error: {0}")]
	ConfigError(String),
}

pub type Result<T> = std::result::Result<T, RleError>;
