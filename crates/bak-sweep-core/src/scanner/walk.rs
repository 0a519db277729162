use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::debug;
use walkdir::WalkDir;

use super::entry::FileEntry;
use crate::error::Error;

/// Callbacks of a depth-first walk: pre-order enter, per-file visit,
/// post-order exit.
pub trait DirVisitor {
    fn enter_directory(&mut self, dir: &Path) -> Result<(), Error>;
    fn visit_file(&mut self, entry: &FileEntry);
    fn exit_directory(&mut self, dir: &Path) -> Result<(), Error>;
}

#[derive(Debug, Clone, Default)]
pub struct WalkStats {
    pub directories: u64,
    pub files: u64,
    pub duration: Duration,
}

/// Depth-first walk of `root` with every listing sorted by file name.
///
/// Symlinks are reported as files and never followed. Any entry that is not a
/// directory counts as a file. Stops at the first enumeration error.
pub fn walk_sorted<V: DirVisitor>(root: &Path, visitor: &mut V) -> Result<WalkStats, Error> {
    let start = Instant::now();
    let mut stats = WalkStats::default();
    let mut open: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry?;

        // An entry at depth d lives in the d-th open directory.
        while open.len() > entry.depth() {
            if let Some(dir) = open.pop() {
                visitor.exit_directory(&dir)?;
            }
        }

        if entry.file_type().is_dir() {
            visitor.enter_directory(entry.path())?;
            stats.directories += 1;
            open.push(entry.into_path());
        } else {
            visitor.visit_file(&FileEntry::new(entry.into_path()));
            stats.files += 1;
        }
    }

    while let Some(dir) = open.pop() {
        visitor.exit_directory(&dir)?;
    }

    stats.duration = start.elapsed();
    debug!(
        "Walked {} directories and {} files under '{}' in {:.2}s",
        stats.directories,
        stats.files,
        root.display(),
        stats.duration.as_secs_f64()
    );
    Ok(stats)
}
