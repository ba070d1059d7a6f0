use crate::error::RleError;
use std::fmt;
use std::str::FromStr;

/// Which direction a file is pushed through the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumType {
    CRC32,
    SHA256,
}

#[derive(Debug, Clone)]
pub struct RleConfig {
    /// Draw a progress bar on stderr while streaming.
    pub progress: bool,
    /// Decode the freshly written output and compare digests with the input.
    pub verify: bool,
    /// Turn decode warnings into a hard error.
    pub strict: bool,
    pub checksum: ChecksumType,
}

impl Default for RleConfig {
    fn default() -> Self {
        Self {
            progress: false,
            verify: false,
            strict: false,
            checksum: ChecksumType::CRC32,
        }
    }
}

impl RleConfig {
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_checksum(mut self, checksum: ChecksumType) -> Self {
        self.checksum = checksum;
        self
    }
}

impl FromStr for Mode {
    type Err = RleError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compress" | "c" | "1" => Ok(Mode::Compress),
            "decompress" | "d" | "2" => Ok(Mode::Decompress),
            _ => Err(RleError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Compress => write!(f, "compress"),
            Mode::Decompress => write!(f, "decompress"),
        }
    }
}

impl FromStr for ChecksumType {
    type Err = RleError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "crc32" => Ok(ChecksumType::CRC32),
            "sha256" => Ok(ChecksumType::SHA256),
            _ => Err(RleError::ConfigError(format!("Invalid checksum type: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_aliases() {
        assert_eq!("compress".parse::<Mode>().unwrap(), Mode::Compress);
        assert_eq!("C".parse::<Mode>().unwrap(), Mode::Compress);
        assert_eq!("1".parse::<Mode>().unwrap(), Mode::Compress);
        assert_eq!("Decompress".parse::<Mode>().unwrap(), Mode::Decompress);
        assert_eq!(" 2 ".parse::<Mode>().unwrap(), Mode::Decompress);
    }

    #[test]
    fn test_invalid_mode() {
        match "3".parse::<Mode>() {
            Err(RleError::InvalidMode(s)) => assert_eq!(s, "3"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_checksum_parse() {
        assert_eq!("SHA256".parse::<ChecksumType>().unwrap(), ChecksumType::SHA256);
        assert!(matches!("md5".parse::<ChecksumType>(), Err(RleError::ConfigError(_))));
    }

    #[test]
    fn test_builder() {
        let config = RleConfig::default()
            .with_verify(true)
            .with_strict(true)
            .with_checksum(ChecksumType::SHA256);
        assert!(config.verify);
        assert!(config.strict);
        assert!(!config.progress);
        assert_eq!(config.checksum, ChecksumType::SHA256);
    }
}
