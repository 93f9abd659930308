use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use wxr_engine::{ensure_output_dir, write_output_files, PersistError};

#[test]
fn writes_every_file_and_returns_sorted_paths() {
    let temp = tempfile::TempDir::new().unwrap();
    let mut files = BTreeMap::new();
    files.insert("b.md".to_string(), "# B\n".to_string());
    files.insert("a.md".to_string(), "# A\n".to_string());

    let written = write_output_files(temp.path(), &files).unwrap();
    assert_eq!(written.len(), 2);
    assert!(written[0].ends_with("a.md"));
    assert!(written[1].ends_with("b.md"));
    assert_eq!(std::fs::read_to_string(&written[0]).unwrap(), "# A\n");
    assert_eq!(std::fs::read_to_string(&written[1]).unwrap(), "# B\n");
}

#[test]
fn creates_missing_output_directory() {
    let temp = tempfile::TempDir::new().unwrap();
    let nested = temp.path().join("out").join("posts");
    let mut files = BTreeMap::new();
    files.insert("x.md".to_string(), "x\n".to_string());

    write_output_files(&nested, &files).unwrap();
    assert!(nested.join("x.md").exists());
}

#[test]
fn rerun_replaces_previous_output() {
    let temp = tempfile::TempDir::new().unwrap();
    let mut files = BTreeMap::new();
    files.insert("a.md".to_string(), "old\n".to_string());
    write_output_files(temp.path(), &files).unwrap();

    files.insert("a.md".to_string(), "new\n".to_string());
    write_output_files(temp.path(), &files).unwrap();
    assert_eq!(
        std::fs::read_to_string(temp.path().join("a.md")).unwrap(),
        "new\n"
    );
}

#[test]
fn file_in_place_of_directory_is_rejected() {
    let temp = tempfile::TempDir::new().unwrap();
    let blocker = temp.path().join("not-a-dir");
    std::fs::write(&blocker, "occupied").unwrap();

    let err = ensure_output_dir(&blocker).unwrap_err();
    assert!(matches!(err, PersistError::OutputDir(_)));
}
