// Hash computation module
// Provides the algorithm registry and the in-memory / streaming digest paths

use std::fmt;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use md5::{Digest as Md5Digest, Md5};
use sha2::{Digest as Sha2Digest, Sha256, Sha512};
use tracing::debug;

use super::error::{HashUtilityError, Result};

/// Files strictly larger than this are streamed instead of read into memory
pub const LARGE_FILE_THRESHOLD: u64 = 100 * 1024 * 1024; // 100 MiB

const STREAM_BUFFER_SIZE: usize = 1024 * 1024;

/// Supported digest algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    #[default]
    Md5,
    Sha256,
    Sha512,
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Md5 => "md5",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha512 => "sha512",
        }
    }

    /// Length of the lowercase hex digest
    pub fn hex_len(&self) -> usize {
        self.output_bits() / 4
    }

    pub fn output_bits(&self) -> usize {
        match self {
            Algorithm::Md5 => 128,
            Algorithm::Sha256 => 256,
            Algorithm::Sha512 => 512,
        }
    }
}

impl FromStr for Algorithm {
    type Err = HashUtilityError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "md5" => Ok(Algorithm::Md5),
            "sha256" | "sha-256" => Ok(Algorithm::Sha256),
            "sha512" | "sha-512" => Ok(Algorithm::Sha512),
            _ => Err(HashUtilityError::UnsupportedAlgorithm {
                algorithm: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait for hash algorithm implementations
pub trait Hasher: Send {
    /// Update the hasher with new data
    fn update(&mut self, data: &[u8]);

    /// Finalize the hash and return the result
    fn finalize(self: Box<Self>) -> Vec<u8>;

    /// Get the output size in bytes
    fn output_size(&self) -> usize;
}

pub struct Md5Wrapper(Md5);

impl Hasher for Md5Wrapper {
    fn update(&mut self, data: &[u8]) {
        Md5Digest::update(&mut self.0, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        Md5Digest::finalize(self.0).to_vec()
    }

    fn output_size(&self) -> usize {
        16
    }
}

pub struct Sha256Wrapper(Sha256);

impl Hasher for Sha256Wrapper {
    fn update(&mut self, data: &[u8]) {
        Sha2Digest::update(&mut self.0, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        Sha2Digest::finalize(self.0).to_vec()
    }

    fn output_size(&self) -> usize {
        32
    }
}

pub struct Sha512Wrapper(Sha512);

impl Hasher for Sha512Wrapper {
    fn update(&mut self, data: &[u8]) {
        Sha2Digest::update(&mut self.0, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        Sha2Digest::finalize(self.0).to_vec()
    }

    fn output_size(&self) -> usize {
        64
    }
}

/// Information about a hash algorithm
#[derive(Debug, Clone)]
pub struct AlgorithmInfo {
    pub name: String,
    pub output_bits: usize,
    pub hex_len: usize,
}

pub struct HashRegistry;

impl HashRegistry {
    /// Get a hasher instance for the specified algorithm
    pub fn get_hasher(algorithm: Algorithm) -> Box<dyn Hasher> {
        match algorithm {
            Algorithm::Md5 => Box::new(Md5Wrapper(Md5Digest::new())),
            Algorithm::Sha256 => Box::new(Sha256Wrapper(Sha2Digest::new())),
            Algorithm::Sha512 => Box::new(Sha512Wrapper(Sha2Digest::new())),
        }
    }

    /// List all available hash algorithms
    pub fn list_algorithms() -> Vec<AlgorithmInfo> {
        [Algorithm::Md5, Algorithm::Sha256, Algorithm::Sha512]
            .iter()
            .map(|alg| AlgorithmInfo {
                name: alg.name().to_string(),
                output_bits: alg.output_bits(),
                hex_len: alg.hex_len(),
            })
            .collect()
    }
}

/// Digest an in-memory buffer (small-file path)
pub fn digest_bytes(algorithm: Algorithm, data: &[u8]) -> String {
    let mut hasher = HashRegistry::get_hasher(algorithm);
    hasher.update(data);
    bytes_to_hex(&hasher.finalize())
}

/// Digest a sequential byte source to EOF (large-file path)
pub fn digest_reader<R: Read>(algorithm: Algorithm, mut reader: R) -> std::io::Result<String> {
    let mut hasher = HashRegistry::get_hasher(algorithm);
    let mut buffer = vec![0u8; STREAM_BUFFER_SIZE];

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(bytes_to_hex(&hasher.finalize()))
}

/// How a file of a given size gets hashed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStrategy {
    InMemory,
    Streaming,
}

impl ReadStrategy {
    /// Boundary is inclusive to the in-memory path
    pub fn for_size(size: u64) -> Self {
        if size > LARGE_FILE_THRESHOLD {
            ReadStrategy::Streaming
        } else {
            ReadStrategy::InMemory
        }
    }
}

/// Computes file digests with a fixed algorithm for the whole run
#[derive(Debug, Clone, Copy)]
pub struct HashComputer {
    algorithm: Algorithm,
}

impl HashComputer {
    pub fn new(algorithm: Algorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Stat the file and hash it with the strategy its size calls for
    pub fn compute_hash(&self, path: &Path) -> Result<String> {
        let size = fs::metadata(path)
            .map_err(|e| HashUtilityError::from_io_error(e, "reading metadata of", Some(path.to_path_buf())))?
            .len();
        self.compute_hash_sized(path, size)
    }

    /// Hash a file whose size is already known
    pub fn compute_hash_sized(&self, path: &Path, size: u64) -> Result<String> {
        let strategy = ReadStrategy::for_size(size);
        debug!(path = %path.display(), size, ?strategy, algorithm = %self.algorithm, "hashing file");

        match strategy {
            ReadStrategy::InMemory => {
                let data = fs::read(path)
                    .map_err(|e| HashUtilityError::from_io_error(e, "reading", Some(path.to_path_buf())))?;
                Ok(digest_bytes(self.algorithm, &data))
            }
            ReadStrategy::Streaming => {
                // The handle is dropped on every return path below
                let file = File::open(path)
                    .map_err(|e| HashUtilityError::from_io_error(e, "opening", Some(path.to_path_buf())))?;
                digest_reader(self.algorithm, file)
                    .map_err(|e| HashUtilityError::from_io_error(e, "reading", Some(path.to_path_buf())))
            }
        }
    }
}

/// Convert bytes to hexadecimal string
fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
