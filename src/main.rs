use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser};
use colored::*;
use dotenv::dotenv;
use foci_combine::cli::{Cli, CombineArgs, Commands};
use foci_combine::console::{CliReporter, ConsoleInteraction};
use foci_combine::{
    logging, plot, AppConfig, AssumeYes, CombineEngine, CombineResult, Error, Interaction,
};
use tracing::{error, info};

fn main() {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match foci_combine::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    match args.command {
        Some(Commands::Combine(combine_args)) => match run_combine(combine_args, &config) {
            Ok(()) => {}
            Err(Error::Aborted(reason)) => {
                info!("Process aborted by user: {}", reason);
            }
            Err(err) => {
                error!("Error: {}", err);
                process::exit(1);
            }
        },
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }
}

fn run_combine(args: CombineArgs, config: &AppConfig) -> Result<(), Error> {
    let root = match args.root.or_else(|| config.root_path.clone().map(PathBuf::from)) {
        Some(root) => root,
        None => return Err(Error::Aborted("no directory selected")),
    };
    if !root.is_dir() {
        error!("{} is not a directory", root.display());
        return Err(Error::Aborted("no directory selected"));
    }

    let threshold = match args.threshold.or(config.threshold) {
        Some(threshold) => threshold,
        None => return Err(Error::Aborted("no positive threshold supplied")),
    };

    let foci_column = args
        .foci_column
        .unwrap_or_else(|| config.foci_column.clone());

    let engine = CombineEngine::new(&root, threshold).with_foci_column(&foci_column);
    let reporter = CliReporter::new();
    let interact: Box<dyn Interaction> = if args.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(ConsoleInteraction)
    };

    let result = engine.run(&reporter, interact.as_ref())?;

    print_summary(&result);

    if config.plot && !args.no_plot && !result.table.is_empty() {
        let plot_dir = result.output_dir.clone().unwrap_or_else(|| root.clone());
        let plot_path = plot_dir.join("combined_results_plot.png");
        match plot::render_summary_plot(
            &result.table,
            &result.summary,
            threshold,
            &foci_column,
            &plot_path,
        ) {
            Ok(()) => info!("Wrote summary plot to {}", plot_path.display()),
            Err(err) => error!("Failed to render summary plot: {:#}", err),
        }
    }

    Ok(())
}

fn print_summary(result: &CombineResult) {
    println!();
    if !result.summary.is_empty() {
        println!(
            "{:<16} {:>8} {:>8} {:>12}",
            "SampleGroup".bold(),
            "Positive".bold(),
            "Total".bold(),
            "PctPositive".bold()
        );
        for row in &result.summary {
            println!(
                "{:<16} {:>8} {:>8} {:>12.2}",
                row.group, row.positive, row.total, row.pct_positive
            );
        }
        println!();
    }

    for group in &result.groups_unmatched {
        println!(
            "{} No .csv files with \"{}\" prefix were found in this directory",
            "!".yellow(),
            group
        );
    }

    info!(
        "Process completed successfully — Files Processed: {}, Samples Detected: {}",
        format!("{}", result.files_processed).green(),
        format!("{}", result.groups.len()).green(),
    );
    if result.files_skipped > 0 {
        info!(
            "{} file(s) skipped, see warnings above",
            format!("{}", result.files_skipped).yellow()
        );
    }
}
