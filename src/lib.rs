//! docsite-kit — build helpers for documentation sites
//!
//! Two independent build steps:
//! - deterministic filler content: Markdown documents whose size is a pure
//!   function of their number, flat or sharded into nested directories, plus
//!   prefix-based cleanup
//! - last-modified metadata: newest commit timestamp per file under a
//!   directory, skipping ignored files, written as JSON for the site
//!
//! # Quickstart (Library)
//! ```no_run
//! use docsite_kit::generator::{self, GenerateOptions, Layout};
//! use std::path::Path;
//!
//! let mut opts = GenerateOptions::new("/tmp/generated", 5000);
//! opts.layout = Layout::Sharded;
//! opts.clean = true;
//! generator::generate(&opts).expect("generate content");
//!
//! let index = docsite_kit::metadata::collect(
//!     Path::new("."),
//!     Path::new("src/content"),
//!     Path::new("src/data/last-modified.json"),
//! )
//! .expect("collect metadata");
//! println!("entries: {}", index.len());
//! ```
//!
//! # Quickstart (CLI)
//! ```text
//! docsite-kit generate --out-dir src/content/generated --count 5000 --layout sharded --clean
//! docsite-kit clean --dir src/content/generated
//! docsite-kit collect --analyze-dir src/content --output src/data/last-modified.json
//! ```
pub mod app;
pub mod cli;
pub mod errors;
pub mod generator;
pub mod metadata;
pub mod utils;
