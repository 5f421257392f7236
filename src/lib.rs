pub mod aggregate;
pub mod cli;
pub mod config;
pub mod console;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod interact;
pub mod logging;
pub mod naming;
pub mod output;
pub mod plot;
pub mod progress;
pub mod scanner;
pub mod summary;

pub use aggregate::Table;
pub use config::AppConfig;
pub use engine::{CombineEngine, CombineResult};
pub use error::{Error, IngestError};
pub use interact::{AssumeYes, Interaction, ReplaceChoice};
pub use progress::{ProgressReporter, SilentReporter};
pub use summary::SummaryRow;
