use std::fs;

use canon_builder::{CanonError, Store};

#[test]
fn opening_a_missing_root_is_the_one_early_abort() {
    let dir = tempfile::tempdir().unwrap();
    let result = Store::open(dir.path().join("nowhere"));
    assert!(matches!(result, Err(CanonError::StoreMissing(_))));
}

#[test]
fn missing_and_corrupt_records_are_distinct_failures() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("chapters");
    fs::create_dir_all(root.join("RUTH")).unwrap();
    let store = Store::open(&root).unwrap();

    let missing = store.load_chapter("RUTH", 1);
    assert!(matches!(missing, Err(CanonError::RecordMissing { .. })));

    fs::write(root.join("RUTH/002.json"), b"{ broken").unwrap();
    let corrupt = store.load_chapter("RUTH", 2);
    assert!(matches!(corrupt, Err(CanonError::RecordCorrupt { .. })));
}

#[test]
fn backups_are_additive_even_within_one_second() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("chapters");
    fs::create_dir_all(root.join("RUTH")).unwrap();
    fs::write(root.join("RUTH/001.json"), b"{}").unwrap();
    let store = Store::open(&root).unwrap();

    // Two backups back to back will collide on the timestamp; the second
    // must take a secondary path instead of overwriting the first.
    let first = store.backup().unwrap();
    let second = store.backup().unwrap();
    assert_ne!(first, second);
    assert!(first.join("RUTH/001.json").is_file());
    assert!(second.join("RUTH/001.json").is_file());

    let backups: Vec<_> = fs::read_dir(dir.path().join("backups"))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(backups.len(), 2);
}
