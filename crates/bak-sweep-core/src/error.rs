use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Root folder '{}' is not a readable directory", .0.display())]
    InvalidRoot(PathBuf),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// The frame popped off the classifier stack belongs to another directory.
    #[error("Left directory '{}' but the innermost open directory was '{}'", .left.display(), .open.display())]
    StateInvariantViolation { left: PathBuf, open: PathBuf },

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("{0}")]
    Other(String),
}
