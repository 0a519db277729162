use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Instant;
use tracing::{debug, info};

use super::retry::delete_with_retry;
use super::{CandidateKind, DeletionResult, Remover};
use crate::error::Error;
use crate::progress::{ProgressReporter, SilentReporter};
use crate::scanner::{CandidateStreams, WalkAborted};

/// Results of both deletion lanes.
#[derive(Debug, Default)]
pub struct PipelineOutput {
    pub files: Vec<DeletionResult>,
    /// In candidate emission order.
    pub directories: Vec<DeletionResult>,
    pub aborted: Option<WalkAborted>,
}

/// Consumes the candidate streams while the walk is still producing them.
///
/// File lane: up to `concurrency` deletes in flight, no ordering.
/// Directory lane: starts once the file lane is drained, one delete at a time,
/// in emission order, so children always go before their parents.
pub struct DeletionPipeline<'a> {
    remover: &'a dyn Remover,
    reporter: &'a dyn ProgressReporter,
    concurrency: usize,
    max_attempts: u32,
}

impl<'a> DeletionPipeline<'a> {
    pub fn new(remover: &'a dyn Remover, concurrency: usize, max_attempts: u32) -> Self {
        Self {
            remover,
            reporter: &SilentReporter,
            concurrency,
            max_attempts,
        }
    }

    pub fn with_reporter(mut self, reporter: &'a dyn ProgressReporter) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn run(&self, streams: CandidateStreams) -> Result<PipelineOutput, Error> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.concurrency)
            .thread_name(|i| format!("bak-delete-{}", i))
            .build()?;
        let aborted: OnceLock<WalkAborted> = OnceLock::new();

        let lane_start = Instant::now();
        let files: Vec<DeletionResult> = pool.install(|| {
            streams
                .files
                .into_iter()
                .par_bridge()
                .map(|message| match message {
                    Ok(path) => Some(self.delete(CandidateKind::File, path)),
                    Err(marker) => {
                        let _ = aborted.set(marker);
                        None
                    }
                })
                .while_some()
                .collect()
        });
        let (deleted, failed) = count_outcomes(&files);
        debug!(
            "File lane drained in {:.2}s: {} deleted, {} failed",
            lane_start.elapsed().as_secs_f64(),
            deleted,
            failed
        );
        self.reporter.on_files_complete(deleted, failed);

        let mut directories = Vec::new();
        for message in streams.directories.iter() {
            match message {
                Ok(path) => directories.push(self.delete(CandidateKind::Directory, path)),
                Err(marker) => {
                    let _ = aborted.set(marker);
                    break;
                }
            }
        }
        let (deleted, failed) = count_outcomes(&directories);
        self.reporter.on_directories_complete(deleted, failed);

        let aborted = aborted.into_inner();
        if let Some(marker) = &aborted {
            info!("Deletion stopped early: {}", marker);
        }

        Ok(PipelineOutput {
            files,
            directories,
            aborted,
        })
    }

    fn delete(&self, kind: CandidateKind, path: PathBuf) -> DeletionResult {
        let result = delete_with_retry(self.remover, kind, path, self.max_attempts);
        match &result.error {
            None => self.reporter.on_deleted(kind, &result.path),
            Some(err) => self.reporter.on_delete_failed(kind, &result.path, err),
        }
        result
    }
}

fn count_outcomes(results: &[DeletionResult]) -> (usize, usize) {
    let deleted = results.iter().filter(|r| r.succeeded()).count();
    (deleted, results.len() - deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{candidate_channels, CandidateSink};
    use std::collections::HashSet;
    use std::io;
    use std::path::Path;
    use std::sync::Mutex;

    /// Records every call; fails directories listed in `broken`.
    #[derive(Default)]
    struct Recording {
        calls: Mutex<Vec<(CandidateKind, PathBuf)>>,
        broken: HashSet<PathBuf>,
    }

    impl Remover for Recording {
        fn remove_file(&self, path: &Path) -> io::Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push((CandidateKind::File, path.to_path_buf()));
            Ok(())
        }

        fn remove_dir(&self, path: &Path) -> io::Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push((CandidateKind::Directory, path.to_path_buf()));
            if self.broken.contains(path) {
                return Err(io::Error::new(io::ErrorKind::Other, "directory not empty"));
            }
            Ok(())
        }
    }

    fn chain(depth: usize) -> Vec<PathBuf> {
        // Deepest first, the way the classifier emits a removable chain.
        (0..depth)
            .rev()
            .map(|level| {
                let mut path = PathBuf::from("/r");
                for i in 0..=level {
                    path.push(format!("d{}", i));
                }
                path
            })
            .collect()
    }

    #[test]
    fn test_directories_follow_emission_order_after_all_files() {
        for concurrency in [1, 2, 8] {
            let remover = Recording::default();
            let (mut channels, streams) = candidate_channels(&SilentReporter);
            let dirs = chain(6);
            for i in 0..20 {
                channels.orphan_file(PathBuf::from(format!("/r/f{}.bak", i)));
            }
            for dir in &dirs {
                channels.removable_directory(dir.clone());
            }
            drop(channels);

            let output = DeletionPipeline::new(&remover, concurrency, 2)
                .run(streams)
                .unwrap();

            assert_eq!(output.files.len(), 20);
            let result_order: Vec<PathBuf> =
                output.directories.iter().map(|r| r.path.clone()).collect();
            assert_eq!(result_order, dirs);

            let calls = remover.calls.lock().unwrap();
            let first_dir = calls
                .iter()
                .position(|(kind, _)| *kind == CandidateKind::Directory)
                .unwrap();
            assert!(calls[..first_dir].iter().all(|(k, _)| *k == CandidateKind::File));
            assert!(calls[first_dir..].iter().all(|(k, _)| *k == CandidateKind::Directory));
            assert_eq!(first_dir, 20);
        }
    }

    #[test]
    fn test_failed_directory_does_not_stop_the_lane() {
        let dirs = chain(3);
        let remover = Recording {
            broken: HashSet::from([dirs[1].clone()]),
            ..Default::default()
        };
        let (mut channels, streams) = candidate_channels(&SilentReporter);
        for dir in &dirs {
            channels.removable_directory(dir.clone());
        }
        drop(channels);

        let output = DeletionPipeline::new(&remover, 1, 2).run(streams).unwrap();
        let outcomes: Vec<bool> = output.directories.iter().map(|r| r.succeeded()).collect();
        assert_eq!(outcomes, vec![true, false, true]);
        assert_eq!(output.directories[1].attempts, 2);
        assert!(output.aborted.is_none());
    }

    #[test]
    fn test_abort_marker_ends_both_lanes() {
        let remover = Recording::default();
        let (mut channels, streams) = candidate_channels(&SilentReporter);
        channels.orphan_file(PathBuf::from("/r/a.bak"));
        channels.removable_directory(PathBuf::from("/r/empty"));
        channels.abort(WalkAborted {
            reason: "permission denied".to_string(),
        });
        drop(channels);

        let output = DeletionPipeline::new(&remover, 4, 1).run(streams).unwrap();
        assert_eq!(output.files.len(), 1);
        assert_eq!(output.directories.len(), 1);
        assert_eq!(
            output.aborted,
            Some(WalkAborted {
                reason: "permission denied".to_string()
            })
        );
    }

    #[test]
    fn test_empty_streams_complete() {
        let remover = Recording::default();
        let (channels, streams) = candidate_channels(&SilentReporter);
        drop(channels);
        let output = DeletionPipeline::new(&remover, 3, 1).run(streams).unwrap();
        assert!(output.files.is_empty());
        assert!(output.directories.is_empty());
        assert!(remover.calls.lock().unwrap().is_empty());
    }
}
