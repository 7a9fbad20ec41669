// Run configuration
// Built once from command-line input and validated before any hashing starts

use std::fs;
use std::path::{Path, PathBuf};

use super::database::DatabaseFormat;
use super::error::{HashUtilityError, Result};
use super::hash::Algorithm;

/// Literal `--output` value that selects table rendering
pub const TABLE_OUTPUT: &str = "table";

/// What `calculate` hashes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Folder(PathBuf),
}

/// Where results are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Human-readable rendering on standard output, never re-loadable
    Table,
    File { path: PathBuf, format: DatabaseFormat },
}

impl OutputTarget {
    /// Parse an `--output` value; unset or `table` means table output
    pub fn parse(output: Option<&str>) -> Result<Self> {
        match output {
            None | Some("") | Some(TABLE_OUTPUT) => Ok(OutputTarget::Table),
            Some(dest) => {
                let path = PathBuf::from(dest);
                let format = DatabaseFormat::from_path(&path)?;
                Ok(OutputTarget::File { path, format })
            }
        }
    }
}

/// Expected digests for `validate`
///
/// Both halves may be set. The checksum file is merged after the inline
/// pair, so its entry wins when both name the same path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSource {
    pub inline: Option<(PathBuf, String)>,
    pub checksum_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Calculate(InputSource),
    Validate(ReferenceSource),
}

/// Immutable configuration for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub mode: Mode,
    pub algorithm: Algorithm,
    pub output: OutputTarget,
}

impl EngineConfig {
    /// Configuration for `calculate`: exactly one of file or folder
    pub fn calculate(
        input_file: Option<&str>,
        input_folder: Option<&str>,
        output: Option<&str>,
        algorithm: Option<&str>,
    ) -> Result<Self> {
        let source = match (non_empty(input_file), non_empty(input_folder)) {
            (None, None) => {
                return Err(HashUtilityError::MissingRequiredArgument {
                    argument: "either --input-file or --input-folder must be set".to_string(),
                })
            }
            (Some(_), Some(_)) => {
                return Err(HashUtilityError::invalid_arguments(
                    "--input-file and --input-folder are mutually exclusive",
                ))
            }
            (Some(file), None) => {
                let path = PathBuf::from(file);
                require_file(&path, "--input-file must be a file, not a directory. use --input-folder for directory")?;
                InputSource::File(path)
            }
            (None, Some(folder)) => {
                let path = PathBuf::from(folder);
                let metadata = fs::metadata(&path).map_err(|e| {
                    HashUtilityError::from_io_error(e, "checking input directory", Some(path.clone()))
                })?;
                if !metadata.is_dir() {
                    return Err(HashUtilityError::invalid_arguments(
                        "--input-folder must be a folder, not a file. use --input-file for single file",
                    ));
                }
                InputSource::Folder(path)
            }
        };

        Ok(Self {
            mode: Mode::Calculate(source),
            algorithm: parse_algorithm(algorithm)?,
            output: OutputTarget::parse(output)?,
        })
    }

    /// Configuration for `validate`: an inline pair, a checksum file, or both
    pub fn validate(
        input_file: Option<&str>,
        checksum: Option<&str>,
        checksum_file: Option<&str>,
        output: Option<&str>,
        algorithm: Option<&str>,
    ) -> Result<Self> {
        let input_file = non_empty(input_file);
        let checksum_file = non_empty(checksum_file);

        if input_file.is_none() && checksum_file.is_none() {
            return Err(HashUtilityError::MissingRequiredArgument {
                argument: "either --input-file or --checksum-file must be set".to_string(),
            });
        }

        let mut reference = ReferenceSource::default();

        if let Some(file) = input_file {
            let checksum = non_empty(checksum)
                .ok_or_else(|| HashUtilityError::invalid_arguments("--checksum is empty"))?;
            let path = PathBuf::from(file);
            require_file(&path, "--input-file must be a file, not a directory")?;
            reference.inline = Some((path, checksum.to_string()));
        }

        if let Some(file) = checksum_file {
            let path = PathBuf::from(file);
            require_file(&path, "--checksum-file must be a file, not a directory")?;
            // Reject unknown extensions before any hashing
            DatabaseFormat::from_path(&path)?;
            reference.checksum_file = Some(path);
        }

        Ok(Self {
            mode: Mode::Validate(reference),
            algorithm: parse_algorithm(algorithm)?,
            output: OutputTarget::parse(output)?,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn parse_algorithm(algorithm: Option<&str>) -> Result<Algorithm> {
    match non_empty(algorithm) {
        Some(name) => name.parse(),
        None => Ok(Algorithm::default()),
    }
}

fn require_file(path: &Path, dir_message: &str) -> Result<()> {
    let metadata = fs::metadata(path)
        .map_err(|e| HashUtilityError::from_io_error(e, "checking input file", Some(path.to_path_buf())))?;
    if metadata.is_dir() {
        return Err(HashUtilityError::invalid_arguments(dir_message));
    }
    Ok(())
}
