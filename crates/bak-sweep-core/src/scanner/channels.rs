use crossbeam_channel::{unbounded, Receiver, Sender};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

use super::classifier::CandidateSink;
use crate::progress::ProgressReporter;
use crate::remover::CandidateKind;

/// Terminal marker pushed on both streams when the walk fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("walk aborted: {reason}")]
pub struct WalkAborted {
    pub reason: String,
}

pub type CandidateMessage = Result<PathBuf, WalkAborted>;

/// Producer half, owned by the walking thread.
pub struct CandidateChannels<'r> {
    files: Sender<CandidateMessage>,
    directories: Sender<CandidateMessage>,
    reporter: &'r dyn ProgressReporter,
    emitted_files: usize,
    emitted_directories: usize,
}

/// Consumer half: one stream per candidate kind.
pub struct CandidateStreams {
    pub files: Receiver<CandidateMessage>,
    pub directories: Receiver<CandidateMessage>,
}

pub fn candidate_channels(reporter: &dyn ProgressReporter) -> (CandidateChannels<'_>, CandidateStreams) {
    let (file_tx, file_rx) = unbounded();
    let (dir_tx, dir_rx) = unbounded();
    (
        CandidateChannels {
            files: file_tx,
            directories: dir_tx,
            reporter,
            emitted_files: 0,
            emitted_directories: 0,
        },
        CandidateStreams {
            files: file_rx,
            directories: dir_rx,
        },
    )
}

impl CandidateChannels<'_> {
    /// Ends both streams with `aborted`. Dropping the channels afterwards
    /// completes them.
    pub fn abort(&self, aborted: WalkAborted) {
        warn!("{}", aborted);
        for sender in [&self.files, &self.directories] {
            if sender.send(Err(aborted.clone())).is_err() {
                debug!("Candidate stream already closed, abort marker dropped");
            }
        }
    }

    pub fn emitted(&self) -> (usize, usize) {
        (self.emitted_files, self.emitted_directories)
    }

    fn send(&mut self, kind: CandidateKind, path: PathBuf) {
        self.reporter.on_candidate(kind, &path);
        let sender = match kind {
            CandidateKind::File => {
                self.emitted_files += 1;
                &self.files
            }
            CandidateKind::Directory => {
                self.emitted_directories += 1;
                &self.directories
            }
        };
        if let Err(err) = sender.send(Ok(path)) {
            debug!("No consumer left for {:?} candidate {:?}", kind, err.0);
        }
    }
}

impl CandidateSink for CandidateChannels<'_> {
    fn orphan_file(&mut self, path: PathBuf) {
        debug!("Orphaned backup: {}", path.display());
        self.send(CandidateKind::File, path);
    }

    fn removable_directory(&mut self, path: PathBuf) {
        debug!("Removable directory: {}", path.display());
        self.send(CandidateKind::Directory, path);
    }
}
