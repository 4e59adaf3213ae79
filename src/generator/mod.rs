//! Deterministic filler content for load-testing a documentation site.
//!
//! Every document is a pure function of its 1-based file number: the body
//! size comes from [`magnitude`], a sine-based hash of the number, so running
//! [`generate`] twice with the same options reproduces every file byte for
//! byte. Documents land either directly in the output directory or in a
//! sharded tree (see [`shard`]). [`cleanup`] removes them again by name prefix.
use crate::errors::GenerateError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub mod shard;

pub use shard::ShardPath;

/// Every generated file name starts with this prefix; [`cleanup`] relies on it.
pub const FILE_PREFIX: &str = "generated_content_file_";

pub const MIN_SECTION_COUNT: usize = 4;
pub const MAX_SECTION_COUNT: usize = 25;
pub const MIN_LINE_COUNT: usize = 10;
pub const MAX_LINE_COUNT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// `out_dir/<prefix><n>.md`
    #[default]
    Flat,
    /// `out_dir/<outer>/<middle>/<inner>/<prefix><n>.md`
    Sharded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BodyKind {
    /// Numbered sections of illustrative Markdown.
    #[default]
    Sections,
    /// Numbered plain-text lines.
    Lines,
}

impl BodyKind {
    #[must_use]
    pub fn default_range(self) -> CountRange {
        match self {
            BodyKind::Sections => CountRange { min: MIN_SECTION_COUNT, max: MAX_SECTION_COUNT },
            BodyKind::Lines => CountRange { min: MIN_LINE_COUNT, max: MAX_LINE_COUNT },
        }
    }
}

/// Inclusive `[min, max]` range for the section or line count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountRange {
    min: usize,
    max: usize,
}

impl CountRange {
    pub fn new(min: usize, max: usize) -> Result<Self, GenerateError> {
        if min > max {
            return Err(GenerateError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn min(&self) -> usize {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> usize {
        self.max
    }
}

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub out_dir: PathBuf,
    pub file_count: usize,
    pub layout: Layout,
    pub body: BodyKind,
    pub range: CountRange,
    /// Run [`cleanup`] on `out_dir` before writing anything.
    pub clean: bool,
}

impl GenerateOptions {
    /// Flat layout, sectioned bodies, default section range, no cleanup.
    pub fn new(out_dir: impl Into<PathBuf>, file_count: usize) -> Self {
        let body = BodyKind::default();
        Self {
            out_dir: out_dir.into(),
            file_count,
            layout: Layout::default(),
            body,
            range: body.default_range(),
            clean: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    pub written: Vec<PathBuf>,
    pub cleanup: Option<CleanupReport>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub deleted_files: usize,
    pub removed_dirs: usize,
}

/// Stable value in `[0, 1)` derived from `seed` alone (1.0 only through
/// floating-point rounding).
///
/// Takes the fractional part of `sin(seed) * 10000`. Results may differ in
/// the last bits across platforms' `sin` implementations; callers only rely on
/// the rounded value.
#[must_use]
pub fn unit_fraction(seed: usize) -> f64 {
    let x = (seed as f64).sin() * 10_000.0;
    x - x.floor()
}

/// Map `seed` into `range`, rounding to the nearest integer.
#[must_use]
pub fn magnitude(seed: usize, range: CountRange) -> usize {
    let span = (range.max - range.min) as f64;
    let value = (range.min as f64 + unit_fraction(seed) * span).round() as usize;
    // x - floor(x) rounds to 1.0 when x is a tiny negative number
    value.clamp(range.min, range.max)
}

#[must_use]
pub fn file_name(file_number: usize) -> String {
    format!("{FILE_PREFIX}{file_number}.md")
}

#[must_use]
pub fn document_path(out_dir: &Path, file_number: usize, layout: Layout) -> PathBuf {
    match layout {
        Layout::Flat => out_dir.join(file_name(file_number)),
        Layout::Sharded => out_dir
            .join(ShardPath::for_file(file_number).to_path_buf())
            .join(file_name(file_number)),
    }
}

/// Full Markdown text of document `file_number`.
#[must_use]
pub fn build_document(file_number: usize, body: BodyKind, range: CountRange) -> String {
    let n = file_number;
    let mut out = format!(
        "---\ntitle: File {n}\ndescription: This is the description for file number {n}.\n---\n\n# File {n}\n"
    );
    let count = magnitude(n, range);
    // writing into a String cannot fail
    match body {
        BodyKind::Sections => {
            for i in 0..count {
                let _ = write!(
                    out,
                    "\n## Section {i} of file {n}\n\
                     \n\
                     This is section {i} of file {n}.\n\
                     \n\
                     It has a list:\n\
                     - [Item 1](https://example.com/item1)\n\
                     - **Item 2**\n\
                     - *Item 3*\n\
                     \n\
                     And a code block:\n\
                     \n\
                     ```javascript\n\
                     console.log(\"This is a code block in file {n}, section {i}\");\n\
                     ```\n\
                     \n\
                     That's the end of section {i} in file {n}.\n"
                );
            }
        }
        BodyKind::Lines => {
            out.push('\n');
            for i in 1..=count {
                let _ = writeln!(out, "Line {i} of file {n}.");
            }
        }
    }
    out
}

fn create_dir_all(path: &Path) -> Result<(), GenerateError> {
    fs::create_dir_all(path)
        .map_err(|source| GenerateError::CreateDir { path: path.to_path_buf(), source })
}

/// Write `opts.file_count` documents into `opts.out_dir`.
///
/// Aborts on the first directory or write failure; re-running is safe since
/// every file is overwritten with identical content.
pub fn generate(opts: &GenerateOptions) -> Result<GenerateReport, GenerateError> {
    let mut report = GenerateReport::default();
    if opts.clean {
        report.cleanup = Some(cleanup(&opts.out_dir)?);
    }
    info!("Generating {} content files in {}", opts.file_count, opts.out_dir.display());
    create_dir_all(&opts.out_dir)?;

    let mut last_parent: Option<PathBuf> = None;
    for n in 1..=opts.file_count {
        let path = document_path(&opts.out_dir, n, opts.layout);
        if let Some(parent) = path.parent() {
            // consecutive files share a shard directory, so skip repeated mkdirs
            if last_parent.as_deref() != Some(parent) {
                create_dir_all(parent)?;
                last_parent = Some(parent.to_path_buf());
            }
        }
        let contents = build_document(n, opts.body, opts.range);
        debug!("Writing {}", path.display());
        fs::write(&path, contents)
            .map_err(|source| GenerateError::Write { path: path.clone(), source })?;
        report.written.push(path);
    }
    Ok(report)
}

fn is_generated(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_file()
        && entry.file_name().to_str().is_some_and(|name| name.starts_with(FILE_PREFIX))
}

fn is_empty_dir(path: &Path) -> Result<bool, GenerateError> {
    let mut entries = fs::read_dir(path)
        .map_err(|source| GenerateError::ReadDir { path: path.to_path_buf(), source })?;
    Ok(entries.next().is_none())
}

/// Delete generated files under `dir` and prune subdirectories left empty.
///
/// `dir` itself is kept. Non-matching files are never touched, and a missing
/// `dir` is treated as already clean.
pub fn cleanup(dir: &Path) -> Result<CleanupReport, GenerateError> {
    let mut report = CleanupReport::default();
    if !dir.is_dir() {
        debug!("Nothing to clean: {} is not a directory", dir.display());
        return Ok(report);
    }
    info!("Deleting generated content files in {}", dir.display());

    // Snapshot the tree first; contents_first yields each directory after its children.
    let entries = WalkDir::new(dir)
        .min_depth(1)
        .contents_first(true)
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    for entry in entries {
        let path = entry.path();
        if entry.file_type().is_dir() {
            if is_empty_dir(path)? {
                debug!("Removing empty directory {}", path.display());
                fs::remove_dir(path)
                    .map_err(|source| GenerateError::Delete { path: path.to_path_buf(), source })?;
                report.removed_dirs += 1;
            }
        } else if is_generated(&entry) {
            debug!("Deleting {}", path.display());
            fs::remove_file(path)
                .map_err(|source| GenerateError::Delete { path: path.to_path_buf(), source })?;
            report.deleted_files += 1;
        } else {
            debug!("Skipping {}", path.display());
        }
    }
    Ok(report)
}
