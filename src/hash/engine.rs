// Checksum engine facade
// One capability set per run: configure, compute, validate, persist

use std::collections::BTreeMap;
use std::io::Write;

use super::config::{EngineConfig, Mode, OutputTarget};
use super::database::DatabaseHandler;
use super::error::{HashUtilityError, Result};
use super::hash::HashComputer;
use super::scan::{ChecksumSet, ScanEngine};
use super::verify::{VerdictSet, VerifyEngine};

/// Runs the calculate and validate flows for one `EngineConfig`
///
/// Every call returns fresh sets; nothing computed by one call is visible to
/// the next.
pub struct ChecksumEngine {
    config: EngineConfig,
    computer: HashComputer,
}

impl ChecksumEngine {
    pub fn new(config: EngineConfig) -> Self {
        let computer = HashComputer::new(config.algorithm);
        Self { config, computer }
    }

    /// Hash the configured input file or folder
    pub fn compute(&self) -> Result<ChecksumSet> {
        match &self.config.mode {
            Mode::Calculate(source) => Ok(ScanEngine::new(self.computer).scan(source)?.checksums),
            Mode::Validate(_) => Err(HashUtilityError::invalid_arguments(
                "engine is configured for validate, not calculate",
            )),
        }
    }

    /// Reconcile the configured reference against the files on disk
    pub fn validate(&self) -> Result<VerdictSet> {
        match &self.config.mode {
            Mode::Validate(reference) => VerifyEngine::new(self.computer).verify(reference),
            Mode::Calculate(_) => Err(HashUtilityError::invalid_arguments(
                "engine is configured for calculate, not validate",
            )),
        }
    }

    /// Write a result mapping to the configured output target
    ///
    /// `table` renders to `stdout`; file targets are truncated and rewritten.
    pub fn persist<W, V>(&self, data: &BTreeMap<String, V>, stdout: &mut W) -> Result<()>
    where
        W: Write,
        V: AsRef<str>,
    {
        match &self.config.output {
            OutputTarget::Table => DatabaseHandler::write_table(stdout, data)
                .map_err(|e| HashUtilityError::from_io_error(e, "writing table output", None)),
            OutputTarget::File { path, format } => DatabaseHandler::save(path, *format, data),
        }
    }
}
