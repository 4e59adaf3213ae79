use docsite_kit::generator::{self, CleanupReport, GenerateOptions, Layout};
use std::fs;
use tempfile::tempdir;

#[test]
fn leaves_non_matching_files_untouched() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("guides")).unwrap();
    fs::write(root.join("index.md"), "home").unwrap();
    fs::write(root.join("guides/intro.md"), "intro").unwrap();

    let report = generator::cleanup(root).expect("cleanup");
    assert_eq!(report, CleanupReport::default());
    assert!(root.join("index.md").is_file());
    assert!(root.join("guides/intro.md").is_file());
}

#[test]
fn removes_matching_files_and_emptied_directories() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let mut opts = GenerateOptions::new(root, 60);
    opts.layout = Layout::Sharded;
    generator::generate(&opts).unwrap();

    let report = generator::cleanup(root).unwrap();
    assert_eq!(report.deleted_files, 60);
    // 1, 1/1, 1/1/1, 1/1/2, 1/1/3
    assert_eq!(report.removed_dirs, 5);
    assert!(root.is_dir());
    assert_eq!(fs::read_dir(root).unwrap().count(), 0);
}

#[test]
fn keeps_directories_that_still_hold_other_files() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let mut opts = GenerateOptions::new(root, 30);
    opts.layout = Layout::Sharded;
    generator::generate(&opts).unwrap();
    fs::write(root.join("1/1/2/notes.md"), "mine").unwrap();

    generator::cleanup(root).unwrap();
    assert!(root.join("1/1/2/notes.md").is_file());
    assert!(!root.join("1/1/1").exists());
    assert!(!root.join("1/1/2/generated_content_file_30.md").exists());
}

#[test]
fn prefix_must_start_the_name() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("my_generated_content_file_1.md"), "x").unwrap();
    fs::write(root.join("generated_content_file_1.md"), "x").unwrap();

    let report = generator::cleanup(root).unwrap();
    assert_eq!(report.deleted_files, 1);
    assert!(root.join("my_generated_content_file_1.md").exists());
}

#[test]
fn missing_directory_is_a_no_op() {
    let dir = tempdir().unwrap();
    let report = generator::cleanup(&dir.path().join("absent")).unwrap();
    assert_eq!(report, CleanupReport::default());
}
