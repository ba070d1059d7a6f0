//! Streaming digests used to check that a compressed file expands back to
//! its source.

use crate::config::ChecksumType;
use crc32fast::Hasher as Crc32Hasher;
use sha2::{Digest as _, Sha256};
use std::fmt;
use std::io::{self, Read, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Digest {
    Crc32(u32),
    Sha256([u8; 32]),
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Digest::Crc32(value) => write!(f, "crc32:{:08x}", value),
            Digest::Sha256(bytes) => {
                write!(f, "sha256:")?;
                for byte in bytes {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
        }
    }
}

enum HasherState {
    Crc32(Crc32Hasher),
    Sha256(Sha256),
}

/// Incremental digest over a byte stream.
pub struct StreamingDigest {
    state: HasherState,
}

impl StreamingDigest {
    pub fn new(checksum_type: ChecksumType) -> Self {
        let state = match checksum_type {
            ChecksumType::CRC32 => HasherState::Crc32(Crc32Hasher::new()),
            ChecksumType::SHA256 => HasherState::Sha256(Sha256::new()),
        };
        Self { state }
    }

    pub fn update(&mut self, data: &[u8]) {
        match &mut self.state {
            HasherState::Crc32(hasher) => hasher.update(data),
            HasherState::Sha256(hasher) => hasher.update(data),
        }
    }

    pub fn finalize(self) -> Digest {
        match self.state {
            HasherState::Crc32(hasher) => Digest::Crc32(hasher.finalize()),
            HasherState::Sha256(hasher) => Digest::Sha256(hasher.finalize().into()),
        }
    }
}

/// Reader adapter that digests every byte passing through it.
pub struct DigestReader<R> {
    inner: R,
    digest: StreamingDigest,
}

impl<R: Read> DigestReader<R> {
    pub fn new(inner: R, checksum_type: ChecksumType) -> Self {
        Self { inner, digest: StreamingDigest::new(checksum_type) }
    }

    pub fn finish(self) -> Digest {
        self.digest.finalize()
    }
}

impl<R: Read> Read for DigestReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.digest.update(&buf[..n]);
        Ok(n)
    }
}

/// Writer that keeps nothing but the digest of what it was given.
pub struct DigestSink {
    digest: StreamingDigest,
}

impl DigestSink {
    pub fn new(checksum_type: ChecksumType) -> Self {
        Self { digest: StreamingDigest::new(checksum_type) }
    }

    pub fn finish(self) -> Digest {
        self.digest.finalize()
    }
}

impl Write for DigestSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.digest.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
