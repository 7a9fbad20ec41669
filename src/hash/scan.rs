// Traversal and checksum computation
// Enumerates the configured target and hashes every file it finds

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use jwalk::WalkDir;
use tracing::{debug, info};

use super::config::InputSource;
use super::error::{HashUtilityError, Result};
use super::hash::HashComputer;
use super::path_utils;

/// Path → digest mapping produced by a run
pub type ChecksumSet = BTreeMap<String, String>;

/// A file to hash, as found by the traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Where the file actually lives
    pub path: PathBuf,
    /// Key the digest is recorded under
    pub key: String,
    pub size: u64,
}

/// Statistics collected during a scan
#[derive(Debug, Clone)]
pub struct ScanStats {
    pub files_processed: usize,
    pub total_bytes: u64,
    pub duration: Duration,
}

/// Result of hashing one input source
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub checksums: ChecksumSet,
    pub stats: ScanStats,
}

/// Engine for enumerating and hashing the configured input
pub struct ScanEngine {
    computer: HashComputer,
}

impl ScanEngine {
    pub fn new(computer: HashComputer) -> Self {
        Self { computer }
    }

    /// Hash every file of the input source
    ///
    /// The first traversal or I/O error aborts the scan; no partial set is
    /// returned.
    pub fn scan(&self, source: &InputSource) -> Result<ScanReport> {
        let start_time = Instant::now();
        let files = self.collect_files(source)?;

        let mut checksums = ChecksumSet::new();
        let mut total_bytes = 0u64;

        for entry in &files {
            let digest = self.computer.compute_hash_sized(&entry.path, entry.size)?;
            total_bytes += entry.size;
            // Duplicate keys keep the last digest seen
            checksums.insert(entry.key.clone(), digest);
        }

        let stats = ScanStats {
            files_processed: files.len(),
            total_bytes,
            duration: start_time.elapsed(),
        };
        info!(
            files = stats.files_processed,
            bytes = stats.total_bytes,
            seconds = stats.duration.as_secs_f64(),
            algorithm = %self.computer.algorithm(),
            "scan complete"
        );

        Ok(ScanReport { checksums, stats })
    }

    /// Enumerate the (path, size) pairs of the input source
    pub fn collect_files(&self, source: &InputSource) -> Result<Vec<FileEntry>> {
        match source {
            InputSource::File(path) => {
                let size = file_size(path)?;
                Ok(vec![FileEntry {
                    path: path.clone(),
                    key: path_utils::path_key(path),
                    size,
                }])
            }
            InputSource::Folder(root) => collect_directory(root),
        }
    }
}

/// Walk a directory tree sequentially, skipping directory entries
fn collect_directory(root: &Path) -> Result<Vec<FileEntry>> {
    let mut files = Vec::new();

    for entry_result in WalkDir::new(root)
        .parallelism(jwalk::Parallelism::Serial)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
    {
        let mut entry = entry_result.map_err(|e| walk_error(root, e))?;

        if entry.file_type().is_dir() {
            // jwalk hands back unreadable directories as Ok entries
            if let Some(err) = entry.read_children_error.take() {
                return Err(walk_error(&entry.path(), err));
            }
            continue;
        }

        let path = entry.path();
        let metadata = fs::metadata(&path)
            .map_err(|e| HashUtilityError::from_io_error(e, "reading metadata of", Some(path.clone())))?;
        // Symlinked directories are not descended into
        if metadata.is_dir() {
            continue;
        }
        let size = metadata.len();
        let key = path_utils::path_key(&path_utils::traversal_key(root, &path));
        debug!(path = %path.display(), key = %key, size, "found file");

        files.push(FileEntry { path, key, size });
    }

    Ok(files)
}

/// Map a jwalk error onto the error taxonomy, preferring the path jwalk reports
fn walk_error(fallback: &Path, err: jwalk::Error) -> HashUtilityError {
    let path = err.path().unwrap_or(fallback).to_path_buf();
    match err.io_error().map(|e| e.kind()) {
        Some(io::ErrorKind::PermissionDenied) => HashUtilityError::PermissionDenied {
            path,
            operation: "reading directory".to_string(),
        },
        Some(io::ErrorKind::NotFound) => HashUtilityError::DirectoryNotFound { path },
        _ => HashUtilityError::TraversalFailed {
            path,
            reason: err.to_string(),
        },
    }
}

fn file_size(path: &Path) -> Result<u64> {
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| HashUtilityError::from_io_error(e, "reading metadata of", Some(path.to_path_buf())))
}
