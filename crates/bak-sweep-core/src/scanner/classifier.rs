use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use super::entry::FileEntry;
use super::walk::DirVisitor;
use crate::error::Error;

/// Receiver of the classifier's verdicts.
///
/// Files are confirmed orphans; directories arrive in post-order.
pub trait CandidateSink {
    fn orphan_file(&mut self, path: PathBuf);
    fn removable_directory(&mut self, path: PathBuf);
}

#[derive(Debug)]
struct PendingBackup {
    path: PathBuf,
    base_name: String,
}

/// Classification state of one open directory.
#[derive(Debug)]
pub struct DirectoryFrame {
    directory_path: PathBuf,
    pending_backup: Option<PendingBackup>,
    last_seen_name: Option<String>,
    last_seen_base_name: Option<String>,
    last_seen_was_backup: bool,
    keep_directory: bool,
}

impl DirectoryFrame {
    fn new(directory_path: PathBuf) -> Self {
        Self {
            directory_path,
            pending_backup: None,
            last_seen_name: None,
            last_seen_base_name: None,
            last_seen_was_backup: false,
            keep_directory: false,
        }
    }

    pub fn directory_path(&self) -> &Path {
        &self.directory_path
    }

    pub fn keep_directory(&self) -> bool {
        self.keep_directory
    }

    pub fn last_seen_backup_base_name(&self) -> Option<&str> {
        self.pending_backup.as_ref().map(|p| p.base_name.as_str())
    }

    /// The previous file of this directory is the original of a backup keyed `key`.
    /// A backup never vindicates another backup: it may be an orphan itself.
    fn preceded_by_original_of(&self, key: &str) -> bool {
        !self.last_seen_was_backup
            && (self.last_seen_name.as_deref() == Some(key)
                || self.last_seen_base_name.as_deref() == Some(key))
    }

    fn forget_last_seen(&mut self) {
        self.last_seen_name = None;
        self.last_seen_base_name = None;
        self.last_seen_was_backup = false;
    }

    fn reset(&mut self) {
        self.pending_backup = None;
        self.forget_last_seen();
    }
}

/// Single-pass orphan backup detector.
///
/// Relies on sorted listings: an original and its backup are always adjacent,
/// so one pending backup per open directory is all the state needed.
pub struct OrphanClassifier<S> {
    stack: Vec<DirectoryFrame>,
    sink: S,
}

impl<S: CandidateSink> OrphanClassifier<S> {
    pub fn new(sink: S) -> Self {
        Self {
            stack: Vec::new(),
            sink,
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn current_frame(&self) -> Option<&DirectoryFrame> {
        self.stack.last()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn classify(&mut self, entry: &FileEntry) {
        let Some(frame) = self.stack.last_mut() else {
            debug!("Ignoring '{}' outside of any directory", entry.path.display());
            return;
        };

        let mut confirmed = None;
        if entry.is_backup() {
            if frame.preceded_by_original_of(&entry.base_name) {
                frame.reset();
            } else {
                confirmed = frame.pending_backup.replace(PendingBackup {
                    path: entry.path.clone(),
                    base_name: entry.base_name.clone(),
                });
            }
        } else if frame
            .last_seen_backup_base_name()
            .is_some_and(|key| entry.answers_to(key))
        {
            trace!("'{}' has its backup", entry.path.display());
            frame.reset();
        } else if frame.last_seen_base_name.as_deref() != Some(entry.base_name.as_str()) {
            confirmed = frame.pending_backup.take();
        }

        frame.last_seen_name = Some(entry.name.clone());
        frame.last_seen_base_name = Some(entry.base_name.clone());
        frame.last_seen_was_backup = entry.is_backup();
        frame.keep_directory |= !entry.is_backup();

        if let Some(orphan) = confirmed {
            self.sink.orphan_file(orphan.path);
        }
    }

    pub fn enter_directory(&mut self, dir: &Path) {
        // Adjacency does not survive a detour through a subdirectory.
        if let Some(parent) = self.stack.last_mut() {
            parent.forget_last_seen();
        }
        self.stack.push(DirectoryFrame::new(dir.to_path_buf()));
    }

    pub fn exit_directory(&mut self, dir: &Path) -> Result<(), Error> {
        let frame = match self.stack.pop() {
            Some(frame) if frame.directory_path == dir => frame,
            other => {
                return Err(Error::StateInvariantViolation {
                    left: dir.to_path_buf(),
                    open: other.map(|f| f.directory_path).unwrap_or_default(),
                })
            }
        };

        if let Some(orphan) = frame.pending_backup {
            self.sink.orphan_file(orphan.path);
        }

        if frame.keep_directory {
            if let Some(parent) = self.stack.last_mut() {
                parent.keep_directory = true;
            }
        } else {
            self.sink.removable_directory(frame.directory_path);
        }
        Ok(())
    }
}

impl<S: CandidateSink> DirVisitor for OrphanClassifier<S> {
    fn enter_directory(&mut self, dir: &Path) -> Result<(), Error> {
        OrphanClassifier::enter_directory(self, dir);
        Ok(())
    }

    fn visit_file(&mut self, entry: &FileEntry) {
        self.classify(entry);
    }

    fn exit_directory(&mut self, dir: &Path) -> Result<(), Error> {
        OrphanClassifier::exit_directory(self, dir)
    }
}
