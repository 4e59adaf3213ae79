use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::generator::{BodyKind, Layout};
use crate::metadata::Strategy;

#[derive(Debug, Parser)]
#[command(
    name = "docsite-kit",
    version,
    about = "Build helpers for documentation sites",
    long_about = "Generate deterministic filler Markdown for load-testing a documentation site, clean it up again, and collect last-modified timestamps from git history into a JSON file the site can read at build time. Settings can also come from docsite-kit.toml in the current directory or a file passed with --config; explicit flags win."
)]
pub struct Cli {
    /// Suppress summary output
    #[arg(short, long, global = true, default_value_t = false)]
    pub quiet: bool,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write N generated Markdown documents
    Generate {
        /// Output directory (default: src/content/generated)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
        /// Number of documents (default: 10)
        #[arg(short = 'n', long)]
        count: Option<usize>,
        /// Directory layout
        #[arg(long, value_enum)]
        layout: Option<LayoutArg>,
        /// Body made of sections or plain lines
        #[arg(long, value_enum)]
        body: Option<BodyArg>,
        /// Minimum section/line count
        #[arg(long)]
        min: Option<usize>,
        /// Maximum section/line count
        #[arg(long)]
        max: Option<usize>,
        /// Delete previously generated documents first
        #[arg(long, overrides_with = "no_clean")]
        clean: bool,
        /// Keep previously generated documents even if the config says `clean = true`
        #[arg(long, overrides_with = "clean")]
        no_clean: bool,
    },
    /// Delete generated documents and prune emptied directories
    Clean {
        /// Directory to clean (default: the generate output directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    /// Write last-modified timestamps from git history as JSON
    Collect {
        /// Repository root (default: nearest ancestor containing .git)
        #[arg(long)]
        repo_root: Option<PathBuf>,
        /// Directory to analyze, relative to the repository root (default: src/content)
        #[arg(long)]
        analyze_dir: Option<PathBuf>,
        /// Output JSON file, relative to the repository root (default: src/data/last-modified.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// History lookup strategy
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,
    },
    /// Print shell completion script
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    Flat,
    Sharded,
}

impl From<LayoutArg> for Layout {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::Flat => Layout::Flat,
            LayoutArg::Sharded => Layout::Sharded,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BodyArg {
    Sections,
    Lines,
}

impl From<BodyArg> for BodyKind {
    fn from(value: BodyArg) -> Self {
        match value {
            BodyArg::Sections => BodyKind::Sections,
            BodyArg::Lines => BodyKind::Lines,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    PerFile,
    BulkLog,
}

impl From<StrategyArg> for Strategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::PerFile => Strategy::PerFile,
            StrategyArg::BulkLog => Strategy::BulkLog,
        }
    }
}

#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
