pub mod pipeline;
pub mod report;
pub mod retry;

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub use pipeline::{DeletionPipeline, PipelineOutput};
pub use report::{DeletionFailure, LaneTally, SweepReport};
pub use retry::delete_with_retry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateKind {
    File,
    Directory,
}

impl fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateKind::File => write!(f, "file"),
            CandidateKind::Directory => write!(f, "directory"),
        }
    }
}

/// Delete primitives the pipeline runs against.
pub trait Remover: Send + Sync {
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Removes an empty directory; never recursive.
    fn remove_dir(&self, path: &Path) -> io::Result<()>;

    fn remove(&self, kind: CandidateKind, path: &Path) -> io::Result<()> {
        match kind {
            CandidateKind::File => self.remove_file(path),
            CandidateKind::Directory => self.remove_dir(path),
        }
    }
}

/// Deletes from the local filesystem.
pub struct FsRemover;

impl Remover for FsRemover {
    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }
}

/// Terminal outcome for one candidate.
#[derive(Debug)]
pub struct DeletionResult {
    pub path: PathBuf,
    pub kind: CandidateKind,
    pub attempts: u32,
    /// Cause of the last failed attempt, `None` when the delete went through.
    pub error: Option<io::Error>,
}

impl DeletionResult {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}
