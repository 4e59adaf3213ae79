//! Last-modified metadata for documentation sources.
//!
//! [`collect`] walks a directory inside a repository, asks version control for
//! the newest commit timestamp of every non-ignored file and writes a flat JSON
//! object (`relative path -> timestamp`) for the site generator. Files without
//! history map to [`UNTRACKED`].
use crate::errors::CollectError;
use crate::utils::file_walker;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub mod history;
pub mod vcs;

pub use history::{parse_history_log, IgnoreRules};
pub use vcs::{Git, VersionControl};

/// Value recorded for files that have no commit history.
pub const UNTRACKED: &str = "untracked";

/// Relative path (`/`-separated) -> ISO-8601 timestamp or [`UNTRACKED`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LastModifiedIndex {
    entries: BTreeMap<String, String>,
}

impl LastModifiedIndex {
    pub fn insert(&mut self, path: impl Into<String>, timestamp: impl Into<String>) {
        self.entries.insert(path.into(), timestamp.into());
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Write the index as indented JSON, creating parent directories.
    pub fn save_json(&self, path: &Path) -> Result<(), CollectError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|source| CollectError::CreateDir { path: parent.to_path_buf(), source })?;
        }
        let mut data = serde_json::to_string_pretty(self)?;
        data.push('\n');
        fs::write(path, data).map_err(|source| CollectError::Write { path: path.to_path_buf(), source })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// One `is_ignored` and one `last_commit_timestamp` query per file.
    #[default]
    PerFile,
    /// A single history log for the analyzed tree, with `.gitignore` rules
    /// evaluated in-process.
    BulkLog,
}

#[derive(Debug, Clone)]
pub struct CollectOptions {
    pub repo_root: PathBuf,
    /// Relative paths are resolved against `repo_root`.
    pub analyze_dir: PathBuf,
    /// Relative paths are resolved against `repo_root`.
    pub output: PathBuf,
    pub strategy: Strategy,
}

impl CollectOptions {
    pub fn new(
        repo_root: impl Into<PathBuf>,
        analyze_dir: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            repo_root: repo_root.into(),
            analyze_dir: analyze_dir.into(),
            output: output.into(),
            strategy: Strategy::default(),
        }
    }

    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.repo_root.join(&self.output)
    }
}

fn canonical(path: &Path) -> Result<PathBuf, CollectError> {
    fs::canonicalize(path).map_err(|source| CollectError::Resolve { path: path.to_path_buf(), source })
}

fn relative_key(root: &Path, path: &Path) -> Result<String, CollectError> {
    let rel = path.strip_prefix(root).map_err(|_| CollectError::OutsideRoot {
        path: path.to_path_buf(),
        root: root.to_path_buf(),
    })?;
    Ok(rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}

/// Canonical root, canonical analyze dir and every file under it.
///
/// Enumeration finishes before any version-control query runs.
fn enumerate(
    repo_root: &Path,
    analyze_dir: &Path,
) -> Result<(PathBuf, PathBuf, Vec<PathBuf>), CollectError> {
    let root = canonical(repo_root)?;
    let dir = canonical(&root.join(analyze_dir))?;
    if !dir.starts_with(&root) {
        return Err(CollectError::OutsideRoot { path: dir, root });
    }
    let files = file_walker::all_files(&dir)?;
    debug!("Found {} files under {}", files.len(), dir.display());
    Ok((root, dir, files))
}

/// Build the index with one ignore check and one history lookup per file.
pub fn collect_index(
    vcs: &dyn VersionControl,
    repo_root: &Path,
    analyze_dir: &Path,
) -> Result<LastModifiedIndex, CollectError> {
    let (root, _dir, files) = enumerate(repo_root, analyze_dir)?;
    let mut index = LastModifiedIndex::default();
    for file in &files {
        let key = relative_key(&root, file)?;
        if vcs.is_ignored(&key) {
            debug!("Ignored: {key}");
            continue;
        }
        let ts = vcs.last_commit_timestamp(&key).unwrap_or_else(|| UNTRACKED.to_string());
        debug!("{key}: {ts}");
        index.insert(key, ts);
    }
    Ok(index)
}

/// Build the index from a single history log and in-process ignore rules.
pub fn collect_index_bulk(
    vcs: &dyn VersionControl,
    repo_root: &Path,
    analyze_dir: &Path,
) -> Result<LastModifiedIndex, CollectError> {
    let (root, dir, files) = enumerate(repo_root, analyze_dir)?;
    let rules = IgnoreRules::discover(&root, &dir, &files);
    let scope = match relative_key(&root, &dir)? {
        s if s.is_empty() => ".".to_string(),
        s => s,
    };
    let history = vcs.history_log(&scope).map(|log| parse_history_log(&log)).unwrap_or_default();
    debug!("History log covers {} paths", history.len());

    let mut index = LastModifiedIndex::default();
    for file in &files {
        let key = relative_key(&root, file)?;
        // committed files are never ignored, same as `git check-ignore`
        let ts = match history.get(&key) {
            Some(ts) => ts.clone(),
            None if rules.is_ignored(file) => {
                debug!("Ignored: {key}");
                continue;
            }
            None => UNTRACKED.to_string(),
        };
        index.insert(key, ts);
    }
    Ok(index)
}

/// Build the index with `vcs` according to `opts.strategy` and write it to
/// `opts.output_path()`.
pub fn collect_with(
    vcs: &dyn VersionControl,
    opts: &CollectOptions,
) -> Result<LastModifiedIndex, CollectError> {
    info!(
        "Collecting last-modified metadata for {} in {}",
        opts.analyze_dir.display(),
        opts.repo_root.display()
    );
    let index = match opts.strategy {
        Strategy::PerFile => collect_index(vcs, &opts.repo_root, &opts.analyze_dir)?,
        Strategy::BulkLog => collect_index_bulk(vcs, &opts.repo_root, &opts.analyze_dir)?,
    };
    let output = opts.output_path();
    index.save_json(&output)?;
    info!("Wrote {} entries to {}", index.len(), output.display());
    Ok(index)
}

/// Collect with `git` and the per-file strategy.
pub fn collect(
    repo_root: &Path,
    analyze_dir: &Path,
    output: &Path,
) -> Result<LastModifiedIndex, CollectError> {
    let git = Git::new(repo_root);
    collect_with(&git, &CollectOptions::new(repo_root, analyze_dir, output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    #[derive(Default)]
    struct FakeVcs {
        ignored: HashSet<String>,
        history: HashMap<String, String>,
        log: Option<String>,
    }

    impl VersionControl for FakeVcs {
        fn is_ignored(&self, rel_path: &str) -> bool {
            self.ignored.contains(rel_path)
        }

        fn last_commit_timestamp(&self, rel_path: &str) -> Option<String> {
            self.history.get(rel_path).cloned()
        }

        fn history_log(&self, _rel_dir: &str) -> Option<String> {
            self.log.clone()
        }
    }

    fn repo_with(files: &[&str]) -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        for rel in files {
            let p = tmp.path().join(rel);
            fs::create_dir_all(p.parent().unwrap()).unwrap();
            fs::write(p, rel).unwrap();
        }
        tmp
    }

    #[test]
    fn per_file_skips_ignored_and_marks_untracked() {
        let tmp = repo_with(&["docs/a.md", "docs/b.md", "docs/new.md", "docs/secret.md", "other/x.md"]);
        let vcs = FakeVcs {
            ignored: ["docs/secret.md".to_string()].into_iter().collect(),
            history: [
                ("docs/a.md".to_string(), "2024-02-02T00:00:00+00:00".to_string()),
                ("docs/b.md".to_string(), "2024-01-01T00:00:00+00:00".to_string()),
            ]
            .into_iter()
            .collect(),
            log: None,
        };

        let index = collect_index(&vcs, tmp.path(), Path::new("docs")).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.get("docs/a.md"), Some("2024-02-02T00:00:00+00:00"));
        assert_eq!(index.get("docs/b.md"), Some("2024-01-01T00:00:00+00:00"));
        assert_eq!(index.get("docs/new.md"), Some(UNTRACKED));
        assert_eq!(index.get("docs/secret.md"), None);
        assert_eq!(index.get("other/x.md"), None);
    }

    #[test]
    fn hidden_files_are_included() {
        let tmp = repo_with(&["docs/.nav.yml", "docs/nested/deep/page.md"]);
        let index = collect_index(&FakeVcs::default(), tmp.path(), Path::new("docs")).unwrap();
        let keys: Vec<&str> = index.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["docs/.nav.yml", "docs/nested/deep/page.md"]);
    }

    #[test]
    fn analyze_dir_outside_root_is_rejected() {
        let outer = repo_with(&["repo/docs/a.md", "elsewhere/b.md"]);
        let err = collect_index(
            &FakeVcs::default(),
            &outer.path().join("repo"),
            &outer.path().join("elsewhere"),
        )
        .unwrap_err();
        assert!(matches!(err, CollectError::OutsideRoot { .. }));
    }

    #[test]
    fn missing_analyze_dir_is_an_error() {
        let tmp = repo_with(&["docs/a.md"]);
        let err = collect_index(&FakeVcs::default(), tmp.path(), Path::new("nope")).unwrap_err();
        assert!(matches!(err, CollectError::Resolve { .. }));
    }

    #[test]
    fn bulk_log_uses_newest_entry_and_gitignore() {
        let tmp = repo_with(&["docs/a.md", "docs/b.md", "docs/build/out.md", "docs/fresh.md"]);
        fs::write(tmp.path().join(".gitignore"), "build/\n").unwrap();
        let vcs = FakeVcs {
            log: Some(
                "2024-05-01T00:00:00+00:00\n\ndocs/a.md\n\n2024-04-01T00:00:00+00:00\n\ndocs/a.md\ndocs/b.md\n"
                    .to_string(),
            ),
            ..FakeVcs::default()
        };

        let index = collect_index_bulk(&vcs, tmp.path(), Path::new("docs")).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.get("docs/a.md"), Some("2024-05-01T00:00:00+00:00"));
        assert_eq!(index.get("docs/b.md"), Some("2024-04-01T00:00:00+00:00"));
        assert_eq!(index.get("docs/fresh.md"), Some(UNTRACKED));
        assert_eq!(index.get("docs/build/out.md"), None);
    }

    #[test]
    fn bulk_log_keeps_committed_files_matching_ignore_rules() {
        let tmp = repo_with(&["docs/forced.log", "docs/debug.log", "docs/a.md"]);
        fs::write(tmp.path().join(".gitignore"), "*.log\n").unwrap();
        let vcs = FakeVcs {
            log: Some("2024-05-01T00:00:00+00:00\n\ndocs/forced.log\ndocs/a.md\n".to_string()),
            ..FakeVcs::default()
        };

        let index = collect_index_bulk(&vcs, tmp.path(), Path::new("docs")).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("docs/forced.log"), Some("2024-05-01T00:00:00+00:00"));
        assert_eq!(index.get("docs/debug.log"), None);
    }

    #[test]
    fn collect_with_writes_pretty_json_to_nested_output() {
        let tmp = repo_with(&["docs/a.md"]);
        let vcs = FakeVcs::default();
        let opts = CollectOptions::new(tmp.path(), "docs", "site/data/last-modified.json");
        let index = collect_with(&vcs, &opts).unwrap();

        let written = fs::read_to_string(tmp.path().join("site/data/last-modified.json")).unwrap();
        assert_eq!(written, "{\n  \"docs/a.md\": \"untracked\"\n}\n");
        let back: LastModifiedIndex = serde_json::from_str(&written).unwrap();
        assert_eq!(back, index);
    }
}
