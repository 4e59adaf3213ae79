use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: usize, max: usize },

    #[error("Failed to create directory {path}: {source}")]
    CreateDir { path: PathBuf, source: std::io::Error },

    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },

    #[error("Failed to read directory {path}: {source}")]
    ReadDir { path: PathBuf, source: std::io::Error },

    #[error("Failed to delete {path}: {source}")]
    Delete { path: PathBuf, source: std::io::Error },

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to resolve {path}: {source}")]
    Resolve { path: PathBuf, source: std::io::Error },

    #[error("Path {path} is not inside repository root {root}")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("JSON encode error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to create directory {path}: {source}")]
    CreateDir { path: PathBuf, source: std::io::Error },

    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("Invalid config {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
}
