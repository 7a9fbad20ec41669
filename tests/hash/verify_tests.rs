// Tests for the validation reconciler

use std::fs;
use std::path::Path;

use csguard::hash::{
    Algorithm, DatabaseFormat, DatabaseHandler, HashComputer, HashUtilityError, InputSource, ReferenceSet,
    ReferenceSource, ScanEngine, Verdict, VerifyEngine,
};
use tempfile::TempDir;

const HELLO_MD5: &str = "5d41402abc4b2a76b9719d911017c592";

fn key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn engine() -> VerifyEngine {
    VerifyEngine::new(HashComputer::new(Algorithm::Md5))
}

#[test]
fn test_ok_not_ok_and_missing() {
    let dir = TempDir::new().unwrap();
    let same = dir.path().join("same.txt");
    let changed = dir.path().join("changed.txt");
    let gone = dir.path().join("gone.txt");
    for path in [&same, &changed, &gone] {
        fs::write(path, b"hello").unwrap();
    }

    let mut reference = ReferenceSet::new();
    for path in [&same, &changed, &gone] {
        reference.insert(key(path), HELLO_MD5.to_string());
    }

    fs::write(&changed, b"hellp").unwrap();
    fs::remove_file(&gone).unwrap();

    let verdicts = engine().reconcile(&reference).unwrap();
    assert_eq!(verdicts.len(), 3);
    assert_eq!(verdicts[&key(&same)], Verdict::Ok);
    assert_eq!(verdicts[&key(&changed)], Verdict::NotOk);
    assert_eq!(verdicts[&key(&gone)], Verdict::Missing);
}

#[test]
fn test_comparison_is_case_sensitive() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("a.txt");
    fs::write(&file, b"hello").unwrap();

    let mut reference = ReferenceSet::new();
    reference.insert(key(&file), HELLO_MD5.to_uppercase());

    let verdicts = engine().reconcile(&reference).unwrap();
    assert_eq!(verdicts[&key(&file)], Verdict::NotOk);
}

#[test]
fn test_directory_entry_is_skipped() {
    let dir = TempDir::new().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    let file = dir.path().join("z.txt");
    fs::write(&file, b"hello").unwrap();

    let mut reference = ReferenceSet::new();
    reference.insert(key(&sub), HELLO_MD5.to_string());
    reference.insert(key(&file), HELLO_MD5.to_string());

    // Entries after the directory are still processed
    let verdicts = engine().reconcile(&reference).unwrap();
    assert_eq!(verdicts.len(), 1);
    assert!(!verdicts.contains_key(&key(&sub)));
    assert_eq!(verdicts[&key(&file)], Verdict::Ok);
}

#[test]
fn test_reference_paths_are_cleaned_but_keys_kept() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("a.txt");
    fs::write(&file, b"hello").unwrap();

    let raw = format!("{}/./sub/../a.txt", dir.path().display());
    let mut reference = ReferenceSet::new();
    reference.insert(raw.clone(), HELLO_MD5.to_string());

    let verdicts = engine().reconcile(&reference).unwrap();
    assert_eq!(verdicts[&raw], Verdict::Ok);
}

#[test]
fn test_checksum_file_overrides_inline_pair() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("a.txt");
    fs::write(&file, b"hello").unwrap();

    let sums = dir.path().join("sums.txt");
    fs::write(&sums, format!("{} {}\n", key(&file), HELLO_MD5)).unwrap();

    let source = ReferenceSource {
        inline: Some((file.clone(), "wrong".to_string())),
        checksum_file: Some(sums),
    };

    let reference = VerifyEngine::load_reference(&source).unwrap();
    assert_eq!(reference[&key(&file)], HELLO_MD5);

    let verdicts = engine().verify(&source).unwrap();
    assert_eq!(verdicts[&key(&file)], Verdict::Ok);
}

#[test]
fn test_malformed_checksum_file_produces_no_verdicts() {
    let dir = TempDir::new().unwrap();
    let sums = dir.path().join("sums.txt");
    fs::write(&sums, "onlyonetoken\n").unwrap();

    let source = ReferenceSource {
        inline: None,
        checksum_file: Some(sums),
    };
    assert!(matches!(
        engine().verify(&source),
        Err(HashUtilityError::InvalidLine { .. })
    ));
}

#[test]
fn test_calculate_then_validate_directory() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("tree");
    fs::create_dir_all(root.join("nested")).unwrap();
    fs::write(root.join("one.txt"), b"one").unwrap();
    fs::write(root.join("nested/two.txt"), b"two").unwrap();

    let computer = HashComputer::new(Algorithm::Sha256);
    let checksums = ScanEngine::new(computer)
        .scan(&InputSource::Folder(root.clone()))
        .unwrap()
        .checksums;

    let sums = dir.path().join("sums.json");
    DatabaseHandler::save(&sums, DatabaseFormat::Json, &checksums).unwrap();
    fs::write(root.join("nested/two.txt"), b"TWO").unwrap();

    let source = ReferenceSource {
        inline: None,
        checksum_file: Some(sums),
    };
    let verdicts = VerifyEngine::new(computer).verify(&source).unwrap();

    // Every reference key gets exactly one verdict
    assert_eq!(verdicts.keys().collect::<Vec<_>>(), checksums.keys().collect::<Vec<_>>());
    assert_eq!(verdicts[&key(&root.join("one.txt"))], Verdict::Ok);
    assert_eq!(verdicts[&key(&root.join("nested/two.txt"))], Verdict::NotOk);
}
