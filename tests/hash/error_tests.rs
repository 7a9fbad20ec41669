// Tests for error classification and messages

use std::error::Error;
use std::io;
use std::path::PathBuf;

use csguard::hash::HashUtilityError;

#[test]
fn test_not_found_maps_to_file_not_found() {
    let err = HashUtilityError::from_io_error(
        io::Error::new(io::ErrorKind::NotFound, "gone"),
        "reading",
        Some(PathBuf::from("a.txt")),
    );
    assert!(matches!(err, HashUtilityError::FileNotFound { .. }));
    assert!(err.to_string().contains("a.txt"));
}

#[test]
fn test_not_found_directory_operation() {
    let err = HashUtilityError::from_io_error(
        io::Error::new(io::ErrorKind::NotFound, "gone"),
        "checking input directory",
        Some(PathBuf::from("data")),
    );
    assert!(matches!(err, HashUtilityError::DirectoryNotFound { .. }));
}

#[test]
fn test_permission_denied() {
    let err = HashUtilityError::from_io_error(
        io::Error::new(io::ErrorKind::PermissionDenied, "nope"),
        "reading",
        Some(PathBuf::from("/protected/file.txt")),
    );
    let message = err.to_string();
    assert!(message.contains("Permission denied"));
    assert!(message.contains("/protected/file.txt"));
}

#[test]
fn test_io_error_keeps_source() {
    let err = HashUtilityError::from_io_error(io::Error::new(io::ErrorKind::Other, "disk full"), "writing", None);
    assert!(err.source().is_some());
    assert!(err.to_string().contains("disk full"));
}

#[test]
fn test_unsupported_format_message() {
    let err = HashUtilityError::UnsupportedFormat {
        path: PathBuf::from("out.csv"),
    };
    let message = err.to_string();
    assert!(message.contains("invalid output format"));
    assert!(message.contains("'txt', 'json', 'yaml'"));
}
