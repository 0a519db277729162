use std::path::Path;

use crate::remover::CandidateKind;

/// Trait for reporting sweep progress.
///
/// The CLI implements it with an indicatif spinner. Deletion callbacks arrive
/// from worker threads. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_walk_start(&self, _root: &Path) {}
    fn on_candidate(&self, _kind: CandidateKind, _path: &Path) {}
    fn on_walk_complete(&self, _duration_secs: f64) {}
    fn on_deleted(&self, _kind: CandidateKind, _path: &Path) {}
    fn on_delete_failed(&self, _kind: CandidateKind, _path: &Path, _error: &std::io::Error) {}
    fn on_files_complete(&self, _deleted: usize, _failed: usize) {}
    fn on_directories_complete(&self, _deleted: usize, _failed: usize) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
