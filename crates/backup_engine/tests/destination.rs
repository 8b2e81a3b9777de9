mod common;

use std::fs;
use std::path::PathBuf;

use backup_engine::{resolve_destination, DestinationError};
use common::init_logging;
use tempfile::TempDir;

fn candidates(temp: &TempDir, names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(|name| temp.path().join(name)).collect()
}

#[test]
fn single_existing_directory_is_found_at_any_position() {
    init_logging();
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("present")).unwrap();

    for position in 0..3 {
        let mut names = vec!["gone-a", "gone-b"];
        names.insert(position, "present");
        let list = candidates(&temp, &names);

        let found = resolve_destination(&list).unwrap();
        assert_eq!(found, temp.path().join("present"), "position {position}");
    }
}

#[test]
fn first_match_wins() {
    init_logging();
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("second")).unwrap();
    fs::create_dir(temp.path().join("third")).unwrap();

    let list = candidates(&temp, &["first", "second", "third"]);
    assert_eq!(resolve_destination(&list).unwrap(), temp.path().join("second"));
}

#[test]
fn regular_files_are_not_destinations() {
    init_logging();
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("file"), "x").unwrap();
    fs::create_dir(temp.path().join("dir")).unwrap();

    let list = candidates(&temp, &["file", "file/below", "dir"]);
    assert_eq!(resolve_destination(&list).unwrap(), temp.path().join("dir"));
}

#[test]
fn none_available_lists_every_candidate() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let list = candidates(&temp, &["usb", "nas", "cloud"]);

    let err = resolve_destination(&list).unwrap_err();
    assert!(matches!(err, DestinationError::NoneAvailable { .. }));
    let message = err.to_string();
    assert!(message.starts_with("No backup location found"));
    for candidate in &list {
        assert!(
            message.contains(&candidate.display().to_string()),
            "{message}"
        );
    }
}

#[test]
fn filesystem_is_checked_on_every_call() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let list = candidates(&temp, &["drive"]);
    assert!(resolve_destination(&list).is_err());

    fs::create_dir(&list[0]).unwrap();
    assert_eq!(resolve_destination(&list).unwrap(), list[0]);

    fs::remove_dir(&list[0]).unwrap();
    assert!(resolve_destination(&list).is_err());
}

#[cfg(unix)]
#[test]
fn inaccessible_candidate_is_skipped() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let looped = temp.path().join("loop");
    std::os::unix::fs::symlink(&looped, &looped).unwrap();
    fs::create_dir(temp.path().join("usb")).unwrap();

    let list = vec![looped, temp.path().join("usb")];
    assert_eq!(resolve_destination(&list).unwrap(), temp.path().join("usb"));
}

#[cfg(unix)]
#[test]
fn only_inaccessible_candidates_means_none_available() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let looped = temp.path().join("loop");
    std::os::unix::fs::symlink(&looped, &looped).unwrap();

    let err = resolve_destination(&[looped]).unwrap_err();
    assert!(matches!(err, DestinationError::NoneAvailable { .. }));
}
