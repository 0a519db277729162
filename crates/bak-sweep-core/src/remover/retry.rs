use std::path::PathBuf;
use tracing::{debug, warn};

use super::{CandidateKind, DeletionResult, Remover};

/// Deletes `path`, making at most `max_attempts` attempts back to back.
///
/// Never fails: an exhausted budget yields a result carrying the last error.
pub fn delete_with_retry(
    remover: &dyn Remover,
    kind: CandidateKind,
    path: PathBuf,
    max_attempts: u32,
) -> DeletionResult {
    let max_attempts = max_attempts.max(1);
    let mut attempts = 0;

    loop {
        attempts += 1;
        match remover.remove(kind, &path) {
            Ok(()) => {
                debug!("Deleted {} {}", kind, path.display());
                return DeletionResult {
                    path,
                    kind,
                    attempts,
                    error: None,
                };
            }
            Err(err) if attempts < max_attempts => {
                debug!(
                    "Attempt {}/{} to delete {} {} failed: {}",
                    attempts,
                    max_attempts,
                    kind,
                    path.display(),
                    err
                );
            }
            Err(err) => {
                warn!("Failed to delete {} '{}': {}", kind, path.display(), err);
                return DeletionResult {
                    path,
                    kind,
                    attempts,
                    error: Some(err),
                };
            }
        }
    }
}
