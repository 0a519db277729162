use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "bak-sweep")]
#[command(about = "Removes orphaned .bak files and the folders they leave empty", long_about = None)]
pub struct Cli {
    /// Starting folder
    #[arg(long)]
    pub root_folder: Option<PathBuf>,

    /// Number of threads deleting the bak files
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Maximum number of attempts for deleting a bak file or folder
    #[arg(long)]
    pub retries: Option<u32>,

    /// Do not draw the progress spinner
    #[arg(long)]
    pub no_progress: bool,
}
