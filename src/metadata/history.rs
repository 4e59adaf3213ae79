//! Support for the bulk-log strategy: one history log for the whole tree plus
//! in-process `.gitignore` matching instead of per-file `git` calls.
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::Match;
use log::warn;
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

fn timestamp_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[+-]\d{2}:?\d{2})$")
            .expect("timestamp regex compiles")
    })
}

/// Undo git's C-style quoting of unusual path names, e.g. `"caf\303\251.md"`.
/// Unquoted lines are returned as-is.
#[must_use]
pub fn unquote_path(line: &str) -> String {
    let Some(inner) = line.strip_prefix('"').and_then(|l| l.strip_suffix('"')) else {
        return line.to_string();
    };
    let raw = inner.as_bytes();
    let mut bytes = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if raw[i] != b'\\' || i + 1 == raw.len() {
            bytes.push(raw[i]);
            i += 1;
            continue;
        }
        let octal = raw.get(i + 1..i + 4).filter(|d| d.iter().all(|c| (b'0'..=b'7').contains(c)));
        if let Some(digits) = octal {
            let value = digits.iter().fold(0u32, |acc, d| acc * 8 + u32::from(d - b'0'));
            bytes.push(u8::try_from(value).unwrap_or(b'?'));
            i += 4;
            continue;
        }
        bytes.push(match raw[i + 1] {
            b'n' => b'\n',
            b't' => b'\t',
            b'r' => b'\r',
            b'a' => 0x07,
            b'b' => 0x08,
            b'f' => 0x0c,
            b'v' => 0x0b,
            other => other,
        });
        i += 2;
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Parse `git log --format=%cI --name-only` output into path -> newest timestamp.
///
/// Each timestamp line opens a commit and the non-empty lines after it are the
/// paths that commit touched. History is newest-first, so the first timestamp
/// seen for a path wins. Paths listed before any timestamp are dropped.
#[must_use]
pub fn parse_history_log(text: &str) -> HashMap<String, String> {
    let mut out: HashMap<String, String> = HashMap::new();
    let mut current: Option<&str> = None;
    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        if timestamp_line().is_match(line) {
            current = Some(line);
            continue;
        }
        if let Some(ts) = current {
            out.entry(unquote_path(line)).or_insert_with(|| ts.to_string());
        }
    }
    out
}

/// `.gitignore` rules between a repository root and the files being analyzed.
///
/// Each `.gitignore` is compiled relative to its own directory; the deepest
/// matcher with an opinion about a path decides.
#[derive(Debug, Default)]
pub struct IgnoreRules {
    // deepest directory first
    matchers: Vec<Gitignore>,
}

impl IgnoreRules {
    /// Collect `.gitignore` files from `analyze_dir` up to `repo_root` and from
    /// the already enumerated `files`.
    #[must_use]
    pub fn discover(repo_root: &Path, analyze_dir: &Path, files: &[PathBuf]) -> Self {
        let mut sources: Vec<PathBuf> = analyze_dir
            .ancestors()
            .take_while(|dir| dir.starts_with(repo_root))
            .map(|dir| dir.join(".gitignore"))
            .filter(|p| p.is_file())
            .collect();
        sources.extend(
            files
                .iter()
                .filter(|p| p.file_name().is_some_and(|n| n == ".gitignore"))
                .cloned(),
        );
        sources.sort();
        sources.dedup();

        let mut matchers = Vec::with_capacity(sources.len());
        for source in sources {
            let Some(dir) = source.parent() else { continue };
            let mut builder = GitignoreBuilder::new(dir);
            if let Some(e) = builder.add(&source) {
                warn!("Skipping unreadable ignore file {}: {e}", source.display());
                continue;
            }
            match builder.build() {
                Ok(gi) => matchers.push(gi),
                Err(e) => warn!("Skipping invalid ignore file {}: {e}", source.display()),
            }
        }
        matchers.sort_by_key(|gi| std::cmp::Reverse(gi.path().components().count()));
        Self { matchers }
    }

    #[must_use]
    pub fn is_ignored(&self, path: &Path) -> bool {
        for gi in &self.matchers {
            if !path.starts_with(gi.path()) {
                continue;
            }
            match gi.matched_path_or_any_parents(path, false) {
                Match::Ignore(_) => return true,
                Match::Whitelist(_) => return false,
                Match::None => {}
            }
        }
        false
    }
}
