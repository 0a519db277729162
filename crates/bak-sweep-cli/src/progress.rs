use bak_sweep_core::remover::CandidateKind;
use bak_sweep_core::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Spinner showing found and deleted counts while the sweep runs.
pub struct CliReporter {
    bar: ProgressBar,
    found: AtomicUsize,
    deleted: AtomicUsize,
    failed: AtomicUsize,
}

impl CliReporter {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        Self {
            bar,
            found: AtomicUsize::new(0),
            deleted: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
        }
    }

    fn refresh(&self) {
        self.bar.set_message(format!(
            "Sweeping... {} candidates, {} deleted, {} failed",
            self.found.load(Ordering::Relaxed),
            self.deleted.load(Ordering::Relaxed),
            self.failed.load(Ordering::Relaxed),
        ));
    }
}

impl ProgressReporter for CliReporter {
    fn on_walk_start(&self, root: &Path) {
        self.bar
            .set_message(format!("Scanning {}...", root.display()));
        self.bar.enable_steady_tick(Duration::from_millis(80));
    }

    fn on_candidate(&self, _kind: CandidateKind, _path: &Path) {
        self.found.fetch_add(1, Ordering::Relaxed);
        self.refresh();
    }

    fn on_walk_complete(&self, duration_secs: f64) {
        self.bar.println(format!(
            "  \x1b[32m✓\x1b[0m Scan complete in {:.2}s",
            duration_secs
        ));
    }

    fn on_deleted(&self, _kind: CandidateKind, _path: &Path) {
        self.deleted.fetch_add(1, Ordering::Relaxed);
        self.refresh();
    }

    fn on_delete_failed(&self, _kind: CandidateKind, _path: &Path, _error: &std::io::Error) {
        self.failed.fetch_add(1, Ordering::Relaxed);
        self.refresh();
    }

    fn on_files_complete(&self, deleted: usize, failed: usize) {
        self.bar.println(format!(
            "  \x1b[32m✓\x1b[0m Backup files: {} deleted, {} failed",
            deleted, failed
        ));
    }

    fn on_directories_complete(&self, deleted: usize, failed: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Folders: {} deleted, {} failed",
            deleted, failed
        );
    }
}
