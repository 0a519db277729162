use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;

pub const DEFAULT_CONCURRENCY: usize = 5;
pub const DEFAULT_RETRIES: u32 = 2;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Folder the sweep starts from.
    pub root_path: PathBuf,
    /// Maximum number of backup files deleted at the same time.
    pub concurrency: usize,
    /// Attempt budget for every single delete.
    pub retries: u32,
    #[serde(default = "default_progress")]
    pub progress: bool,
}

fn default_progress() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from("."),
            concurrency: DEFAULT_CONCURRENCY,
            retries: DEFAULT_RETRIES,
            progress: true,
        }
    }
}

/// Built-in defaults, then `Config.toml` if present, then `BAK_SWEEP_*` variables.
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .set_default("root_path", ".")?
        .set_default("concurrency", DEFAULT_CONCURRENCY as u64)?
        .set_default("retries", DEFAULT_RETRIES as u64)?
        .set_default("progress", true)?
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(Environment::with_prefix("BAK_SWEEP"))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

impl AppConfig {
    pub fn with_root_path(mut self, root_path: impl Into<PathBuf>) -> Self {
        self.root_path = root_path.into();
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Number of delete attempts made per candidate. A budget of zero still
    /// allows the initial attempt.
    pub fn max_attempts(&self) -> u32 {
        self.retries.max(1)
    }

    /// Checks the option ranges and resolves the root to an absolute directory.
    pub fn validate(mut self) -> Result<AppConfig, Error> {
        if self.concurrency == 0 {
            return Err(Error::InvalidConfig(
                "concurrency must be greater than zero".to_string(),
            ));
        }
        self.root_path = absolute_root(&self.root_path)?;
        Ok(self)
    }
}

// Canonical form has no `.`/`..` components, which `remove_dir` rejects.
fn absolute_root(root: &Path) -> Result<PathBuf, Error> {
    match fs::canonicalize(root) {
        Ok(absolute) if absolute.is_dir() => Ok(absolute),
        Ok(absolute) => Err(Error::InvalidRoot(absolute)),
        Err(_) => Err(Error::InvalidRoot(root.to_path_buf())),
    }
}
