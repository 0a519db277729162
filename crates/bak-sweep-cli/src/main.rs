mod commands;
mod logging;
mod progress;

use std::process;

use anyhow::Context;
use bak_sweep_core::config::load_configuration;
use bak_sweep_core::{AppConfig, ProgressReporter, SilentReporter, SweepEngine};
use clap::Parser;
use colored::*;
use commands::Cli;
use dotenv::dotenv;
use progress::CliReporter;
use tracing::{debug, error};

fn main() {
    dotenv().ok();

    let _guard = logging::init_logger();

    let args = Cli::parse();

    match run(args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            error!("Error: {:#}", err);
            process::exit(1);
        }
    }
}

/// Returns whether the whole tree was swept.
fn run(args: Cli) -> anyhow::Result<bool> {
    let config = apply_args(
        load_configuration().context("Error loading configuration")?,
        &args,
    );
    debug!("Configuration: {:?}", config);

    let reporter: Box<dyn ProgressReporter> = if config.progress {
        Box::new(CliReporter::new())
    } else {
        Box::new(SilentReporter)
    };

    let report = SweepEngine::new(config).run(reporter.as_ref())?;

    println!();
    report.log_summary();
    if !report.completed() {
        error!("{}", "Sweep stopped before covering the whole tree".red());
    }

    Ok(report.completed())
}

fn apply_args(mut config: AppConfig, args: &Cli) -> AppConfig {
    if let Some(root) = &args.root_folder {
        config = config.with_root_path(root);
    }
    if let Some(concurrency) = args.concurrency {
        config = config.with_concurrency(concurrency);
    }
    if let Some(retries) = args.retries {
        config = config.with_retries(retries);
    }
    if args.no_progress {
        config.progress = false;
    }
    config
}
