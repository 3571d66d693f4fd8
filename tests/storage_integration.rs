//! Integration tests for the storage collaborator boundary.
//!
//! This test suite verifies that:
//! - The builder forwards exactly its joined path string to the disk
//! - Existence preconditions fail with errors carrying path and disk id
//! - Collaborator failures propagate unchanged, with no retries
//! - The filesystem-backed LocalDisk behaves end to end under a temp root
//! - Disk identifiers resolve through the StorageRouter

use std::fs;
use std::sync::Arc;

use mockall::mock;
use mockall::predicate::eq;
use pathforge::{Disk, Error, LocalDisk, PathBuilder, Result, StorageRouter};

mock! {
    StorageDisk {}

    impl Disk for StorageDisk {
        fn name(&self) -> &str;
        fn exists(&self, path: &str) -> Result<bool>;
        fn size(&self, path: &str) -> Result<u64>;
        fn delete(&self, path: &str) -> Result<bool>;
        fn url(&self, path: &str) -> Result<String>;
    }
}

// =============================================================================
// Forwarding the joined path
// =============================================================================

#[test]
fn test_exists_forwards_joined_path() {
    let mut disk = MockStorageDisk::new();
    disk.expect_exists()
        .with(eq("uploads/images/avatar.jpg"))
        .times(1)
        .returning(|_| Ok(true));

    let builder = PathBuilder::base("uploads//images/").add_file("avatar.jpg");
    assert!(builder.exists(&disk).unwrap());
}

#[test]
fn test_size_forwards_joined_path() {
    let mut disk = MockStorageDisk::new();
    disk.expect_size()
        .with(eq("uploads/report.pdf"))
        .times(1)
        .returning(|_| Ok(2048));

    let builder = PathBuilder::base("uploads").add_file("report.pdf");
    assert_eq!(builder.size(&disk).unwrap(), 2048);
}

#[test]
fn test_delete_forwards_joined_path() {
    let mut disk = MockStorageDisk::new();
    disk.expect_delete()
        .with(eq("uploads/report.pdf"))
        .times(1)
        .returning(|_| Ok(true));

    let builder = PathBuilder::base("uploads").add_file("report.pdf");
    assert!(builder.delete(&disk).unwrap());
}

#[test]
fn test_url_forwards_joined_path() {
    let mut disk = MockStorageDisk::new();
    disk.expect_url()
        .with(eq("media/clip.mp4"))
        .times(1)
        .returning(|path| Ok(format!("https://cdn.example.com/{path}")));

    let builder = PathBuilder::base("media").add_file("clip.mp4");
    assert_eq!(
        builder.url(&disk).unwrap(),
        "https://cdn.example.com/media/clip.mp4"
    );
}

// =============================================================================
// Existence preconditions
// =============================================================================

#[test]
fn test_must_exist_passes_when_present() {
    let mut disk = MockStorageDisk::new();
    disk.expect_exists().returning(|_| Ok(true));

    let builder = PathBuilder::base("uploads").add_file("present.pdf");
    assert!(builder.must_exist(&disk).is_ok());
}

#[test]
fn test_must_exist_fails_with_path_and_disk() {
    let mut disk = MockStorageDisk::new();
    disk.expect_exists().returning(|_| Ok(false));
    disk.expect_name().return_const("s3".to_string());

    let err = PathBuilder::base("uploads")
        .add_file("absent.pdf")
        .must_exist(&disk)
        .unwrap_err();

    match err {
        Error::PathNotFound { path, disk } => {
            assert_eq!(path, "uploads/absent.pdf");
            assert_eq!(disk, "s3");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_must_not_exist_passes_when_absent() {
    let mut disk = MockStorageDisk::new();
    disk.expect_exists().returning(|_| Ok(false));

    let builder = PathBuilder::base("uploads").add_file("new.pdf");
    assert!(builder.must_not_exist(&disk).is_ok());
}

#[test]
fn test_must_not_exist_fails_with_path_and_disk() {
    let mut disk = MockStorageDisk::new();
    disk.expect_exists().returning(|_| Ok(true));
    disk.expect_name().return_const("local".to_string());

    let err = PathBuilder::base("uploads")
        .add_file("taken.pdf")
        .must_not_exist(&disk)
        .unwrap_err();

    match err {
        Error::PathAlreadyExists { path, disk } => {
            assert_eq!(path, "uploads/taken.pdf");
            assert_eq!(disk, "local");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_collaborator_failure_propagates() {
    let mut disk = MockStorageDisk::new();
    disk.expect_exists().returning(|_| {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into())
    });

    let err = PathBuilder::base("uploads")
        .add_file("locked.pdf")
        .must_exist(&disk)
        .unwrap_err();

    assert!(matches!(err, Error::Io(_)));
}

// =============================================================================
// LocalDisk end to end
// =============================================================================

#[test]
fn test_local_disk_round_trip() {
    let root = tempfile::tempdir().unwrap();
    let disk = LocalDisk::new(root.path());

    let builder = PathBuilder::base("uploads")
        .add("reports")
        .unwrap()
        .add_file("summary.txt");

    fs::create_dir_all(root.path().join("uploads/reports")).unwrap();
    fs::write(root.path().join("uploads/reports/summary.txt"), b"summary").unwrap();

    assert!(builder.exists(&disk).unwrap());
    assert_eq!(builder.size(&disk).unwrap(), 7);

    let builder = builder.must_exist(&disk).unwrap();
    assert!(builder.delete(&disk).unwrap());
    assert!(!builder.exists(&disk).unwrap());
    assert!(builder.must_not_exist(&disk).is_ok());
}

#[test]
fn test_local_disk_has_no_urls() {
    let root = tempfile::tempdir().unwrap();
    let disk = LocalDisk::new(root.path());

    let err = PathBuilder::base("uploads")
        .add_file("file.txt")
        .url(&disk)
        .unwrap_err();

    match err {
        Error::UrlUnsupported { disk } => assert_eq!(disk, "local"),
        other => panic!("unexpected error: {other}"),
    }
}

// =============================================================================
// Router resolution
// =============================================================================

#[test]
fn test_router_resolves_by_identifier() {
    let root = tempfile::tempdir().unwrap();
    let router = StorageRouter::new()
        .with_disk(Arc::new(LocalDisk::new(root.path())))
        .with_disk(Arc::new(LocalDisk::new(root.path()).with_name("archive")));

    fs::write(root.path().join("note.txt"), b"hi").unwrap();

    let builder = PathBuilder::base("note.txt");
    assert!(builder.exists(router.default_disk().unwrap().as_ref()).unwrap());
    assert!(builder.exists(router.disk("archive").unwrap().as_ref()).unwrap());

    let err = router.disk("s3").err().unwrap();
    match err {
        Error::UnknownDisk { name } => assert_eq!(name, "s3"),
        other => panic!("unexpected error: {other}"),
    }
}
