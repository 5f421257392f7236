use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)] // requires `derive` feature
#[command(name = "foci-combine")]
#[command(about = "Combine per-sample foci count CSVs into per-group results", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Aggregate per-sample CSVs under a root directory
    Combine(CombineArgs),
    /// Print configuration values
    PrintConfig,
}

#[derive(Debug, Args)]
pub struct CombineArgs {
    /// Experiment root directory (defaults to root_path from Config.toml)
    pub root: Option<PathBuf>,

    /// Rows with a foci count >= this are classified positive
    #[arg(short, long)]
    pub threshold: Option<u32>,

    /// Measurement column holding the foci count
    #[arg(long)]
    pub foci_column: Option<String>,

    /// Answer yes to every confirmation, including deletion of old
    /// CombinedResults folders
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Skip rendering the summary plot
    #[arg(long)]
    pub no_plot: bool,
}
