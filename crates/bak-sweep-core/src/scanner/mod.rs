pub mod channels;
pub mod classifier;
pub mod entry;
pub mod walk;

pub use channels::{candidate_channels, CandidateChannels, CandidateMessage, CandidateStreams, WalkAborted};
pub use classifier::{CandidateSink, OrphanClassifier};
pub use entry::{FileEntry, BACKUP_EXTENSION};
pub use walk::{walk_sorted, DirVisitor, WalkStats};

use std::path::Path;

use crate::error::Error;

/// Classifies the tree under `root`, feeding verdicts into `channels`.
///
/// The channels are closed when this returns; on failure both streams get an
/// abort marker first.
pub fn scan_tree(root: &Path, channels: CandidateChannels<'_>) -> Result<WalkStats, Error> {
    let mut classifier = OrphanClassifier::new(channels);
    let result = walk_sorted(root, &mut classifier);

    let channels = classifier.into_sink();
    let (files, directories) = channels.emitted();
    tracing::debug!(
        "Classifier emitted {} file and {} directory candidates",
        files,
        directories
    );
    if let Err(err) = &result {
        channels.abort(WalkAborted {
            reason: err.to_string(),
        });
    }
    result
}
