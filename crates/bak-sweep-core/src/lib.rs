pub mod config;
pub mod engine;
pub mod error;
pub mod progress;
pub mod remover;
pub mod scanner;

pub use config::AppConfig;
pub use engine::SweepEngine;
pub use error::Error;
pub use progress::{ProgressReporter, SilentReporter};
pub use remover::report::SweepReport;
