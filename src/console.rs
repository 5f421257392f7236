//! Console implementations of the progress and confirmation collaborators.

use crate::interact::{Interaction, ReplaceChoice};
use crate::progress::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::sync::Mutex;

/// CLI progress reporter using an indicatif progress bar sized from the scan
/// phase's flat file count.
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn finish_bar(&self) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }
    }
}

impl Default for CliReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for CliReporter {
    fn on_ingest_start(&self, total_files: usize) {
        let pb = ProgressBar::new(total_files as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "  {spinner:.cyan} Combining [{bar:30.cyan/dim}] {pos}/{len} files",
            )
            .unwrap()
            .progress_chars("━╸─")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        let mut guard = self.bar.lock().unwrap();
        *guard = Some(pb);
    }

    fn on_file_done(&self, processed: usize, _total: usize) {
        let guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.as_ref() {
            pb.set_position(processed as u64);
        }
    }

    fn on_file_skipped(&self, file: &str, reason: &str) {
        let guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.as_ref() {
            pb.println(format!("  \x1b[33m!\x1b[0m Skipped {}: {}", file, reason));
        }
    }

    fn on_write_complete(&self, groups_written: usize, output_dir: Option<&str>) {
        self.finish_bar();
        match output_dir {
            Some(dir) => eprintln!(
                "  \x1b[32m✓\x1b[0m Wrote {} combined result file(s) to {}",
                groups_written, dir
            ),
            None => eprintln!("  \x1b[33m!\x1b[0m No combined result files written"),
        }
    }
}

/// Stdin-backed confirmations.
pub struct ConsoleInteraction;

impl Interaction for ConsoleInteraction {
    fn confirm_sample_groups(&self, groups: &[String]) -> bool {
        println!("Detected sample groups:");
        for group in groups {
            println!("  {}", group);
        }
        prompt_confirm("Confirm detected sample groups?", Some(true)).unwrap_or(false)
    }

    fn replace_choice(&self, folder_name: &str) -> ReplaceChoice {
        println!(
            "Old CombinedResults found in this directory:\n\n  ({})\n",
            folder_name
        );
        match prompt_yes_no_cancel("Would you like to replace it?") {
            Ok(Some(true)) => ReplaceChoice::Replace,
            Ok(Some(false)) => ReplaceChoice::Keep,
            _ => ReplaceChoice::Abort,
        }
    }

    fn confirm_delete(&self, folder_name: &str) -> bool {
        prompt_confirm(
            &format!(
                "Are you sure you want to delete and replace {}?",
                folder_name
            ),
            Some(false),
        )
        .unwrap_or(false)
    }
}

pub fn prompt_confirm(prompt: &str, default: Option<bool>) -> io::Result<bool> {
    let mut input = String::new();

    loop {
        input.clear();

        match default {
            Some(true) => print!("{} (Y/n): ", prompt),
            Some(false) | None => print!("{} (y/N): ", prompt),
        }
        io::stdout().flush()?; // Make sure the prompt is immediately displayed

        io::stdin().read_line(&mut input)?;

        match input.trim().to_uppercase().as_str() {
            "Y" => return Ok(true),
            "N" => return Ok(false),
            "" => match default {
                Some(default) => return Ok(default),
                None => continue,
            },
            _ => continue,
        }
    }
}

/// Three-way prompt: `Some(true)` yes, `Some(false)` no, `None` cancel.
fn prompt_yes_no_cancel(prompt: &str) -> io::Result<Option<bool>> {
    let mut input = String::new();

    loop {
        input.clear();
        print!("{} (y/n/c): ", prompt);
        io::stdout().flush()?;

        io::stdin().read_line(&mut input)?;

        match input.trim().to_uppercase().as_str() {
            "Y" => return Ok(Some(true)),
            "N" => return Ok(Some(false)),
            "C" => return Ok(None),
            _ => continue,
        }
    }
}
