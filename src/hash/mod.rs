// Checksum engine
// Digest selection, traversal, computation, persistence and validation

pub mod config;
pub mod database;
pub mod engine;
pub mod error;
pub mod hash;
pub mod path_utils;
pub mod scan;
pub mod verify;

// Re-export commonly used types for convenience
pub use config::{EngineConfig, InputSource, Mode, OutputTarget, ReferenceSource};
pub use database::{DatabaseFormat, DatabaseHandler, DatabaseRecord};
pub use engine::ChecksumEngine;
pub use error::HashUtilityError;
pub use hash::{
    digest_bytes, digest_reader, Algorithm, AlgorithmInfo, HashComputer, HashRegistry, Hasher, ReadStrategy,
    LARGE_FILE_THRESHOLD,
};
pub use scan::{ChecksumSet, FileEntry, ScanEngine, ScanReport, ScanStats};
pub use verify::{ReferenceSet, Verdict, VerdictSet, VerifyEngine, VerifySummary};
