//! Real filesystem behaviour: atomic replace, backups, detection on disk.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use gign_adapters::{LocalFilesystem, ManualClock};
use gign_core::application::{
    OutputWriter, TechnologyDetector, WriteOptions, WriteOutcome, ports::Filesystem,
};
use gign_core::domain::{MergedDocument, TechnologyId, TemplateSet};

fn document(text: &str) -> MergedDocument {
    let mut set = TemplateSet::new();
    set.insert(TechnologyId::parse("rust").unwrap(), text);
    MergedDocument::merge(&set)
}

fn writer() -> OutputWriter {
    OutputWriter::new(
        Arc::new(LocalFilesystem::new()),
        Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 2, 3, 4, 5, 6).unwrap(),
        )),
    )
}

#[test]
fn write_atomic_replaces_content_and_leaves_no_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join(".gitignore");
    fs::write(&target, "old\n").unwrap();

    LocalFilesystem::new()
        .write_atomic(&target, "new\n")
        .unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), "new\n");
    let names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names.len(), 1);
}

#[test]
fn write_into_missing_directory_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("missing").join(".gitignore");

    assert!(LocalFilesystem::new().write_atomic(&target, "x\n").is_err());
    assert!(!target.exists());
}

#[test]
fn writer_creates_backup_next_to_target() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join(".gitignore");
    fs::write(&target, "previous\n").unwrap();

    let outcome = writer()
        .write(
            &target,
            &document("target/\n"),
            WriteOptions {
                backup: true,
                dry_run: false,
            },
        )
        .unwrap();

    let backup = dir.path().join(".gitignore.20260203T040506.bak");
    assert_eq!(fs::read_to_string(&backup).unwrap(), "previous\n");
    assert_eq!(fs::read_to_string(&target).unwrap(), "# rust\ntarget/\n");
    assert_eq!(
        outcome,
        WriteOutcome::Written {
            path: target,
            backup: Some(backup)
        }
    );
}

#[test]
fn same_second_backups_never_overwrite_each_other() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join(".gitignore");
    fs::write(&target, "original\n").unwrap();
    let writer = writer();
    let options = WriteOptions {
        backup: true,
        dry_run: false,
    };

    writer.write(&target, &document("target/\n"), options).unwrap();
    let second = writer.write(&target, &document("out/\n"), options).unwrap();

    let first_backup = dir.path().join(".gitignore.20260203T040506.bak");
    let second_backup = dir.path().join(".gitignore.20260203T040506.1.bak");
    assert_eq!(fs::read_to_string(&first_backup).unwrap(), "original\n");
    assert_eq!(
        fs::read_to_string(&second_backup).unwrap(),
        "# rust\ntarget/\n"
    );
    assert!(matches!(
        second,
        WriteOutcome::Written { backup: Some(ref b), .. } if *b == second_backup
    ));
}

#[test]
fn copy_new_refuses_existing_destination() {
    let dir = tempfile::tempdir().unwrap();
    let from = dir.path().join("a");
    let to = dir.path().join("b");
    fs::write(&from, "new").unwrap();
    fs::write(&to, "kept").unwrap();

    assert!(!LocalFilesystem::new().copy_new(&from, &to).unwrap());
    assert_eq!(fs::read_to_string(&to).unwrap(), "kept");
}

#[test]
fn walk_stops_at_depth_and_skips_rejected_directories() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("a/b/c")).unwrap();
    fs::write(root.join("a/b/c/deep.txt"), "").unwrap();
    fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
    fs::write(root.join("top.txt"), "").unwrap();

    let walk = LocalFilesystem::new()
        .walk(root, 2, &|e| e.name != "node_modules")
        .unwrap();

    let mut seen: Vec<_> = walk
        .entries
        .iter()
        .map(|w| (w.entry.name.as_str(), w.depth))
        .collect();
    seen.sort();
    assert_eq!(
        seen,
        vec![("a", 1), ("b", 2), ("c", 3), ("node_modules", 1), ("top.txt", 1)]
    );
    assert!(walk.unreadable.is_empty());
}

#[test]
fn no_backup_when_target_is_new() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join(".gitignore");

    let outcome = writer()
        .write(
            &target,
            &document("target/\n"),
            WriteOptions {
                backup: true,
                dry_run: false,
            },
        )
        .unwrap();

    assert!(matches!(outcome, WriteOutcome::Written { backup: None, .. }));
}

#[test]
fn empty_document_is_not_written() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join(".gitignore");

    let outcome = writer()
        .write(&target, &MergedDocument::default(), WriteOptions::default())
        .unwrap();

    assert_eq!(outcome, WriteOutcome::Empty);
    assert!(!target.exists());
}

#[test]
fn detects_technologies_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("Cargo.toml"), "[package]\n").unwrap();
    fs::create_dir_all(root.join("web")).unwrap();
    fs::write(root.join("web/package.json"), r#"{"dependencies":{"react":"18"}}"#).unwrap();
    fs::create_dir_all(root.join("target/debug")).unwrap();
    fs::write(root.join("target/debug/setup.py"), "").unwrap();

    let report = TechnologyDetector::new(Arc::new(LocalFilesystem::new()))
        .detect(root)
        .unwrap();

    let ids: Vec<_> = report
        .detections
        .iter()
        .map(|d| d.technology.as_str())
        .collect();
    assert_eq!(ids, vec!["node", "react", "rust"]);
    assert!(report.stats.cache_dirs.contains(&"target".to_string()));
}

#[test]
fn missing_root_is_fatal() {
    let detector = TechnologyDetector::new(Arc::new(LocalFilesystem::new()));
    assert!(detector.detect(Path::new("/definitely/not/here")).is_err());
}
