//! Confirmation collaborators, kept behind a trait so the pipeline runs
//! against in-memory fakes in tests and against stdin prompts in the CLI.

/// Outcome of the first confirmation over a pre-existing output folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceChoice {
    /// Delete and replace, pending a second confirmation.
    Replace,
    /// Leave the folder untouched and continue.
    Keep,
    /// Terminate the run.
    Abort,
}

pub trait Interaction {
    /// Present the detected sample groups; `false` aborts the run.
    fn confirm_sample_groups(&self, groups: &[String]) -> bool;
    /// First confirmation for a pre-existing output folder.
    fn replace_choice(&self, folder_name: &str) -> ReplaceChoice;
    /// Second confirmation before the recursive delete; `false` aborts.
    fn confirm_delete(&self, folder_name: &str) -> bool;
}

/// Accepts everything, including deletion of old output folders. Backs the
/// `--yes` flag.
pub struct AssumeYes;

impl Interaction for AssumeYes {
    fn confirm_sample_groups(&self, _groups: &[String]) -> bool {
        true
    }

    fn replace_choice(&self, _folder_name: &str) -> ReplaceChoice {
        ReplaceChoice::Replace
    }

    fn confirm_delete(&self, _folder_name: &str) -> bool {
        true
    }
}
