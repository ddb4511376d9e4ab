use super::*;
use std::{
    fs::{File, write},
    time::{Duration, SystemTime},
};

#[test]
fn extract_populates_every_field() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let path = tmp.path().join("notes.txt");
    write(&path, b"hello world").expect("write file");

    let stamp = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    File::options()
        .write(true)
        .open(&path)
        .and_then(|f| f.set_modified(stamp))
        .expect("set mtime");

    let rec = Extractor::new().extract(&path).expect("extract ok");

    assert_eq!(rec.path, path);
    assert_eq!(rec.size, 11);
    assert_eq!(rec.extension(), "txt");
    assert!(!rec.owner.is_empty());
    assert_eq!(rec.permissions.len(), 10);
    assert!(rec.permissions.starts_with('-'));
    assert_eq!(rec.modified, DateTime::<Local>::from(stamp));
}

#[cfg(unix)]
#[test]
fn extract_renders_mode_bits() {
    use std::{fs::Permissions, os::unix::fs::PermissionsExt};

    let tmp = tempfile::tempdir().expect("create temp dir");
    let path = tmp.path().join("script.sh");
    write(&path, b"#!/bin/sh\n").expect("write file");
    std::fs::set_permissions(&path, Permissions::from_mode(0o750)).expect("chmod");

    let rec = Extractor::new().extract(&path).expect("extract ok");
    assert_eq!(rec.permissions, "-rwxr-x---");
}

#[cfg(unix)]
#[test]
fn extract_reports_current_user_as_owner() {
    use std::os::unix::fs::MetadataExt;

    let tmp = tempfile::tempdir().expect("create temp dir");
    let path = tmp.path().join("mine.bin");
    write(&path, b"x").expect("write file");

    let uid = std::fs::metadata(&path).expect("metadata").uid();
    let owners = Arc::new(OwnerResolver::new());
    let extractor = Extractor::with_owner_resolver(Arc::clone(&owners));

    let rec = extractor.extract(&path).expect("extract ok");
    assert_eq!(rec.owner, owners.resolve(uid));
}

#[test]
fn extract_missing_file_is_vanished() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let path = tmp.path().join("gone.txt");

    match Extractor::new().extract(&path) {
        Err(ExtractError::Vanished(p)) => assert_eq!(p, path),
        other => panic!("expected Vanished, got {:?}", other),
    }
}

#[test]
fn extract_error_display_names_the_path() {
    let err = ExtractError::Vanished(PathBuf::from("/tmp/x.txt"));
    assert_eq!(err.to_string(), "/tmp/x.txt vanished during scan");
    assert!(err.source().is_none());

    let err = ExtractError::from_io(
        Path::new("/tmp/y"),
        io::Error::new(io::ErrorKind::Other, "boom"),
    );
    assert!(matches!(err, ExtractError::Io { .. }));
    assert!(err.source().is_some());
}
