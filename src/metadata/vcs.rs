//! Version-control queries used by the collector.
//!
//! The collector only needs two answers per file, so the whole VCS surface is
//! the [`VersionControl`] trait. [`Git`] shells out to the `git` binary; tests
//! use in-memory fakes.
use log::debug;
use std::path::PathBuf;
use std::process::{Command, Output};

pub trait VersionControl {
    /// Whether `rel_path` (relative to the repository root) matches an ignore rule.
    fn is_ignored(&self, rel_path: &str) -> bool;

    /// Timestamp of the newest commit touching `rel_path`, or `None` when the
    /// file has no history or the lookup failed.
    fn last_commit_timestamp(&self, rel_path: &str) -> Option<String>;

    /// Newest-first log of commit timestamps, each followed by the paths that
    /// commit touched under `rel_dir`. Used by the bulk-log strategy.
    fn history_log(&self, _rel_dir: &str) -> Option<String> {
        None
    }
}

/// `git` CLI, run with the repository root as working directory.
#[derive(Debug, Clone)]
pub struct Git {
    root: PathBuf,
}

impl Git {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn run(&self, args: &[&str]) -> Option<Output> {
        match Command::new("git").args(args).current_dir(&self.root).output() {
            Ok(output) => Some(output),
            Err(e) => {
                debug!("git {} failed to start: {e}", args.join(" "));
                None
            }
        }
    }

    fn stdout_of(&self, args: &[&str]) -> Option<String> {
        let output = self.run(args)?;
        if !output.status.success() {
            debug!("git {} exited with {}", args.join(" "), output.status);
            return None;
        }
        Some(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

// Pathspecs are taken literally so `[a].md` never matches `a.md`, and
// non-ASCII paths are printed raw instead of C-quoted.
const LOG: [&str; 4] = ["--literal-pathspecs", "-c", "core.quotePath=false", "log"];

impl VersionControl for Git {
    fn is_ignored(&self, rel_path: &str) -> bool {
        // check-ignore exits 0 for ignored paths and 1 otherwise
        self.run(&["check-ignore", "-q", "--", rel_path])
            .is_some_and(|output| output.status.success())
    }

    fn last_commit_timestamp(&self, rel_path: &str) -> Option<String> {
        let args = [&LOG[..], &["-1", "--format=%cI", "--", rel_path][..]].concat();
        let out = self.stdout_of(&args)?;
        let ts = out.trim();
        if ts.is_empty() {
            None
        } else {
            Some(ts.to_string())
        }
    }

    fn history_log(&self, rel_dir: &str) -> Option<String> {
        self.stdout_of(
            &[&LOG[..], &["--format=%cI", "--name-only", "--relative", "--", rel_dir][..]].concat(),
        )
    }
}
