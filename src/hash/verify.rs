// Verification module
// Reconciles expected digests against the files currently on disk

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{info, warn};

use super::config::ReferenceSource;
use super::database::DatabaseHandler;
use super::error::{HashUtilityError, Result};
use super::hash::HashComputer;
use super::path_utils;
use super::scan::ChecksumSet;

/// Expected digests, keyed by path as written in the reference
pub type ReferenceSet = ChecksumSet;

/// Outcome for one reference entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Ok,
    NotOk,
    Missing,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Ok => "OK",
            Verdict::NotOk => "NOT OK",
            Verdict::Missing => "missing",
        }
    }
}

impl AsRef<str> for Verdict {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type VerdictSet = BTreeMap<String, Verdict>;

/// Counts per verdict, for the run summary
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VerifySummary {
    pub matches: usize,
    pub mismatches: usize,
    pub missing: usize,
}

impl VerifySummary {
    pub fn from_verdicts(verdicts: &VerdictSet) -> Self {
        let mut summary = Self::default();
        for verdict in verdicts.values() {
            match verdict {
                Verdict::Ok => summary.matches += 1,
                Verdict::NotOk => summary.mismatches += 1,
                Verdict::Missing => summary.missing += 1,
            }
        }
        summary
    }
}

/// Engine for verifying files against expected digests
pub struct VerifyEngine {
    computer: HashComputer,
}

impl VerifyEngine {
    pub fn new(computer: HashComputer) -> Self {
        Self { computer }
    }

    /// Build the reference set: the inline pair first, then the checksum file
    /// merged over it
    pub fn load_reference(source: &ReferenceSource) -> Result<ReferenceSet> {
        let mut reference = ReferenceSet::new();

        if let Some((path, checksum)) = &source.inline {
            reference.insert(path_utils::path_key(path), checksum.clone());
        }

        if let Some(file) = &source.checksum_file {
            reference.extend(DatabaseHandler::load(file)?);
        }

        Ok(reference)
    }

    /// Load the reference and reconcile it
    pub fn verify(&self, source: &ReferenceSource) -> Result<VerdictSet> {
        let reference = Self::load_reference(source)?;
        self.reconcile(&reference)
    }

    /// Classify every reference entry as OK, NOT OK or missing
    ///
    /// A missing file is recorded and the loop continues. A directory entry is
    /// skipped with a warning and gets no verdict. Any other I/O error aborts.
    pub fn reconcile(&self, reference: &ReferenceSet) -> Result<VerdictSet> {
        let mut verdicts = VerdictSet::new();

        for (key, expected) in reference {
            let path = path_utils::clean_path(&PathBuf::from(key));

            let metadata = match fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    verdicts.insert(key.clone(), Verdict::Missing);
                    continue;
                }
                Err(e) => return Err(HashUtilityError::from_io_error(e, "checking", Some(path))),
            };

            if metadata.is_dir() {
                warn!(path = %path.display(), "skipping directory entry in checksum reference");
                continue;
            }

            let actual = self.computer.compute_hash_sized(&path, metadata.len())?;
            let verdict = if actual == *expected {
                Verdict::Ok
            } else {
                Verdict::NotOk
            };
            verdicts.insert(key.clone(), verdict);
        }

        let summary = VerifySummary::from_verdicts(&verdicts);
        info!(
            matches = summary.matches,
            mismatches = summary.mismatches,
            missing = summary.missing,
            "validation complete"
        );

        Ok(verdicts)
    }
}
