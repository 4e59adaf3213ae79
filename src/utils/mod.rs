pub mod config {
    use crate::errors::ConfigError;
    use crate::generator::{BodyKind, Layout};
    use crate::metadata::Strategy;
    use serde::Deserialize;
    use std::fs;
    use std::path::{Path, PathBuf};

    pub const DEFAULT_CONFIG_FILE: &str = "docsite-kit.toml";

    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct GenerateConfig {
        pub out_dir: Option<PathBuf>,
        pub count: Option<usize>,
        pub layout: Option<Layout>, // "flat" | "sharded"
        pub body: Option<BodyKind>, // "sections" | "lines"
        pub min: Option<usize>,
        pub max: Option<usize>,
        pub clean: Option<bool>,
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct CollectConfig {
        pub repo_root: Option<PathBuf>,
        pub analyze_dir: Option<PathBuf>,
        pub output: Option<PathBuf>,
        pub strategy: Option<Strategy>, // "per-file" | "bulk-log"
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct Config {
        pub generate: Option<GenerateConfig>,
        pub collect: Option<CollectConfig>,
    }

    pub fn load_config_at(path: &Path) -> Result<Config, ConfigError> {
        let data = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        toml::from_str::<Config>(&data)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Load `docsite-kit.toml` from `dir` when present.
    pub fn load_config_near(dir: &Path) -> Result<Option<Config>, ConfigError> {
        let path = dir.join(DEFAULT_CONFIG_FILE);
        if path.is_file() {
            load_config_at(&path).map(Some)
        } else {
            Ok(None)
        }
    }
}

pub mod file_walker {
    use std::path::{Path, PathBuf};
    use walkdir::WalkDir;

    /// Every regular file under `root`, hidden ones included, in file-name
    /// order. `.git` directories are not descended into.
    pub fn all_files(root: &Path) -> Result<Vec<PathBuf>, walkdir::Error> {
        let mut out = Vec::new();
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || e.file_name() != ".git");
        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file() {
                out.push(entry.into_path());
            }
        }
        Ok(out)
    }
}

pub mod repo_root {
    use std::env;
    use std::path::{Path, PathBuf};

    /// Detect the repository root by walking ancestors looking for `.git`
    /// (a directory, or a file for worktrees and submodules).
    #[must_use]
    pub fn detect(start: Option<&Path>) -> PathBuf {
        let cwd = || env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let start = start.map_or_else(cwd, Path::to_path_buf);
        start
            .ancestors()
            .find(|dir| dir.join(".git").exists())
            .map_or_else(cwd, Path::to_path_buf)
    }
}

pub mod logging {
    use log::LevelFilter;

    /// `-q` wins over `-v`; each `-v` raises the level one step from `warn`.
    #[must_use]
    pub fn level_for(quiet: bool, verbose: u8) -> LevelFilter {
        if quiet {
            return LevelFilter::Error;
        }
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Install the `env_logger` backend. `RUST_LOG` overrides the flag-derived level.
    pub fn init(quiet: bool, verbose: u8) {
        let _ = env_logger::Builder::new()
            .filter_level(level_for(quiet, verbose))
            .parse_default_env()
            .format_timestamp(None)
            .try_init();
    }
}
