// Checksum file handler module
// Reads and writes path → value mappings as txt, json or yaml

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{HashUtilityError, Result};

/// Persisted checksum file format, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseFormat {
    /// One `<path> <value>` pair per line
    Txt,
    /// Array of `{file_name, value}` records
    Json,
    /// Same records as json
    Yaml,
}

impl DatabaseFormat {
    /// Select the format from the final `.`-separated token of the path
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path.to_string_lossy();
        match name.rsplit('.').next() {
            Some("txt") => Ok(DatabaseFormat::Txt),
            Some("json") => Ok(DatabaseFormat::Json),
            Some("yaml") => Ok(DatabaseFormat::Yaml),
            _ => Err(HashUtilityError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DatabaseFormat::Txt => "txt",
            DatabaseFormat::Json => "json",
            DatabaseFormat::Yaml => "yaml",
        }
    }
}

/// One record of the json/yaml forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseRecord {
    pub file_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
}

/// Handler for reading and writing checksum files
pub struct DatabaseHandler;

impl DatabaseHandler {
    /// Load a mapping, picking the format from the extension
    pub fn load(path: &Path) -> Result<BTreeMap<String, String>> {
        let format = DatabaseFormat::from_path(path)?;
        debug!(path = %path.display(), format = format.name(), "loading checksum file");

        match format {
            DatabaseFormat::Txt => Self::load_txt(path),
            DatabaseFormat::Json | DatabaseFormat::Yaml => {
                let raw = fs::read_to_string(path)
                    .map_err(|e| HashUtilityError::from_io_error(e, "reading", Some(path.to_path_buf())))?;
                let records = Self::parse_records(&raw, format, path)?;
                Ok(Self::records_to_map(records))
            }
        }
    }

    /// Save a mapping, truncating whatever was at `path`
    pub fn save<V: AsRef<str>>(path: &Path, format: DatabaseFormat, data: &BTreeMap<String, V>) -> Result<()> {
        debug!(path = %path.display(), format = format.name(), entries = data.len(), "writing checksum file");

        let file = File::create(path)
            .map_err(|e| HashUtilityError::from_io_error(e, "creating output file", Some(path.to_path_buf())))?;
        let mut writer = BufWriter::new(file);

        match format {
            DatabaseFormat::Txt => Self::write_txt(&mut writer, data)
                .map_err(|e| HashUtilityError::from_io_error(e, "writing", Some(path.to_path_buf())))?,
            DatabaseFormat::Json => {
                serde_json::to_writer(&mut writer, &Self::map_to_records(data)).map_err(|e| {
                    HashUtilityError::DatabaseWriteError {
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    }
                })?
            }
            DatabaseFormat::Yaml => {
                serde_yaml::to_writer(&mut writer, &Self::map_to_records(data)).map_err(|e| {
                    HashUtilityError::DatabaseWriteError {
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    }
                })?
            }
        }

        writer
            .flush()
            .map_err(|e| HashUtilityError::from_io_error(e, "flushing output file", Some(path.to_path_buf())))
    }

    /// Render the write-only table form: `<path> <value>` per line
    pub fn write_table<W: Write, V: AsRef<str>>(writer: &mut W, data: &BTreeMap<String, V>) -> std::io::Result<()> {
        Self::write_txt(writer, data)
    }

    fn write_txt<W: Write, V: AsRef<str>>(writer: &mut W, data: &BTreeMap<String, V>) -> std::io::Result<()> {
        for (file, value) in data {
            writeln!(writer, "{} {}", file, value.as_ref())?;
        }
        Ok(())
    }

    /// Read the txt form; any malformed line fails the whole load
    fn load_txt(path: &Path) -> Result<BTreeMap<String, String>> {
        let file = File::open(path)
            .map_err(|e| HashUtilityError::from_io_error(e, "opening", Some(path.to_path_buf())))?;
        let reader = BufReader::new(file);
        let mut data = BTreeMap::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result
                .map_err(|e| HashUtilityError::from_io_error(e, "reading", Some(path.to_path_buf())))?;

            match Self::parse_line(&line) {
                Some((file_name, value)) => {
                    data.insert(file_name, value);
                }
                None => {
                    return Err(HashUtilityError::InvalidLine {
                        path: path.to_path_buf(),
                        line_number: line_num + 1,
                        line,
                    })
                }
            }
        }

        Ok(data)
    }

    /// Parse a single txt line
    /// Splits on single spaces and requires exactly two tokens
    pub fn parse_line(line: &str) -> Option<(String, String)> {
        let mut parts = line.split(' ');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(file_name), Some(value), None) => Some((file_name.to_string(), value.to_string())),
            _ => None,
        }
    }

    /// A `null` document is an empty record list
    fn parse_records(raw: &str, format: DatabaseFormat, path: &Path) -> Result<Vec<DatabaseRecord>> {
        let parsed: std::result::Result<Option<Vec<DatabaseRecord>>, String> = match format {
            DatabaseFormat::Json => serde_json::from_str(raw).map_err(|e| e.to_string()),
            _ => serde_yaml::from_str(raw).map_err(|e| e.to_string()),
        };
        parsed
            .map(Option::unwrap_or_default)
            .map_err(|reason| HashUtilityError::DatabaseParseError {
                path: PathBuf::from(path),
                format: format.name().to_string(),
                reason,
            })
    }

    /// Later records win on key collision
    pub fn records_to_map(records: Vec<DatabaseRecord>) -> BTreeMap<String, String> {
        records.into_iter().map(|r| (r.file_name, r.value)).collect()
    }

    pub fn map_to_records<V: AsRef<str>>(data: &BTreeMap<String, V>) -> Vec<DatabaseRecord> {
        data.iter()
            .map(|(file_name, value)| DatabaseRecord {
                file_name: file_name.clone(),
                value: value.as_ref().to_string(),
            })
            .collect()
    }
}
