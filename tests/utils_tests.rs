use docsite_kit::utils::{file_walker, logging, repo_root};
use log::LevelFilter;
use std::fs;
use tempfile::tempdir;

#[test]
fn file_walker_lists_hidden_files_but_not_git_internals() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join(".git/objects")).unwrap();
    fs::create_dir_all(root.join("b/.drafts")).unwrap();
    fs::write(root.join(".git/HEAD"), "ref").unwrap();
    fs::write(root.join(".git/objects/x"), "obj").unwrap();
    fs::write(root.join(".env"), "k=v").unwrap();
    fs::write(root.join("a.md"), "a").unwrap();
    fs::write(root.join("b/.drafts/c.md"), "c").unwrap();

    let files = file_walker::all_files(root).unwrap();
    let rel: Vec<String> = files
        .iter()
        .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(rel, vec![".env", "a.md", "b/.drafts/c.md"]);
}

#[test]
fn file_walker_errors_on_missing_root() {
    let dir = tempdir().unwrap();
    assert!(file_walker::all_files(&dir.path().join("absent")).is_err());
}

#[test]
fn repo_root_detects_nearest_git_ancestor() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("repo");
    let nested = root.join("src/content/docs");
    fs::create_dir_all(&nested).unwrap();
    fs::create_dir_all(root.join(".git")).unwrap();

    assert_eq!(repo_root::detect(Some(&nested)), root);
    assert_eq!(repo_root::detect(Some(&root)), root);
}

#[test]
fn log_level_follows_flags() {
    assert_eq!(logging::level_for(false, 0), LevelFilter::Warn);
    assert_eq!(logging::level_for(false, 1), LevelFilter::Info);
    assert_eq!(logging::level_for(false, 2), LevelFilter::Debug);
    assert_eq!(logging::level_for(false, 9), LevelFilter::Trace);
    assert_eq!(logging::level_for(true, 3), LevelFilter::Error);
}
