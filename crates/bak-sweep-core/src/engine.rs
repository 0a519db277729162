use std::thread;
use std::time::Instant;
use tracing::info;

use crate::config::AppConfig;
use crate::error::Error;
use crate::progress::ProgressReporter;
use crate::remover::{DeletionPipeline, FsRemover, Remover, SweepReport};
use crate::scanner::{candidate_channels, scan_tree};

pub struct SweepEngine {
    config: AppConfig,
    remover: Box<dyn Remover>,
}

impl SweepEngine {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            remover: Box::new(FsRemover),
        }
    }

    pub fn with_remover(mut self, remover: Box<dyn Remover>) -> Self {
        self.remover = remover;
        self
    }

    /// Run one sweep:
    /// 1. Walk and classify on a dedicated thread
    /// 2. Delete orphaned backups in parallel while the walk goes on
    /// 3. Delete emptied folders one by one, deepest first
    ///
    /// Individual delete failures end up in the report. A failed walk also
    /// ends up in the report after the already found candidates were handled.
    pub fn run(&self, reporter: &dyn ProgressReporter) -> Result<SweepReport, Error> {
        let config = self.config.clone().validate()?;
        let root = config.root_path.as_path();
        info!(
            "Sweeping '{}' with {} delete workers and {} attempts per delete",
            root.display(),
            config.concurrency,
            config.max_attempts()
        );

        let start = Instant::now();
        reporter.on_walk_start(root);

        let (channels, streams) = candidate_channels(reporter);
        let pipeline = DeletionPipeline::new(
            self.remover.as_ref(),
            config.concurrency,
            config.max_attempts(),
        )
        .with_reporter(reporter);

        let (walk, output) = thread::scope(|scope| {
            let walker = thread::Builder::new()
                .name("bak-walk".to_string())
                .spawn_scoped(scope, move || {
                    let walk = scan_tree(root, channels);
                    reporter.on_walk_complete(start.elapsed().as_secs_f64());
                    walk
                })?;

            let output = pipeline.run(streams);
            let walk = walker
                .join()
                .map_err(|_| Error::Other("walker thread panicked".to_string()))?;
            Ok::<_, Error>((walk, output?))
        })?;

        let mut report = SweepReport::aggregate(output.files, output.directories);
        match walk {
            Ok(stats) => report.walk = stats,
            Err(err) => report.walk_error = Some(err),
        }
        report.duration = start.elapsed();
        Ok(report)
    }
}
