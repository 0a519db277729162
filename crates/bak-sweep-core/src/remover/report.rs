use colored::*;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

use super::DeletionResult;
use crate::error::Error;
use crate::scanner::WalkStats;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Deleted count and failures of one lane.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaneTally {
    pub deleted: usize,
    pub failed: Vec<DeletionFailure>,
}

impl LaneTally {
    pub fn from_results(results: Vec<DeletionResult>) -> Self {
        let mut tally = LaneTally::default();
        for result in results {
            match result.error {
                None => tally.deleted += 1,
                Some(err) => tally.failed.push(DeletionFailure {
                    path: result.path,
                    error: err.to_string(),
                }),
            }
        }
        tally
    }

    pub fn total(&self) -> usize {
        self.deleted + self.failed.len()
    }
}

#[derive(Debug, Default)]
pub struct SweepReport {
    pub files: LaneTally,
    pub directories: LaneTally,
    pub walk: WalkStats,
    /// Set when the walk stopped before covering the whole tree.
    pub walk_error: Option<Error>,
    pub duration: Duration,
}

impl SweepReport {
    pub fn aggregate(files: Vec<DeletionResult>, directories: Vec<DeletionResult>) -> Self {
        Self {
            files: LaneTally::from_results(files),
            directories: LaneTally::from_results(directories),
            ..Default::default()
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.files.failed.is_empty() || !self.directories.failed.is_empty()
    }

    pub fn completed(&self) -> bool {
        self.walk_error.is_none()
    }

    pub fn log_summary(&self) {
        info!("Files deleted: {}", format!("{}", self.files.deleted).green());
        info!(
            "Folders deleted: {}",
            format!("{}", self.directories.deleted).green()
        );

        info!(
            "Failed files ({}):",
            format!("{}", self.files.failed.len()).red()
        );
        for failure in &self.files.failed {
            info!("\t{} - {}", failure.path.display(), failure.error);
        }

        info!(
            "Failed folders ({}):",
            format!("{}", self.directories.failed.len()).red()
        );
        for failure in &self.directories.failed {
            info!("\t{} - {}", failure.path.display(), failure.error);
        }

        if let Some(err) = &self.walk_error {
            error!("Scan aborted before finishing: {}", err);
        }

        info!(
            "Scanned {} folders and {} files in {}",
            self.walk.directories,
            self.walk.files,
            format!("{:.2}s", self.duration.as_secs_f64()).green()
        );
    }
}
