//! CLI module - argument parsing, conversion runner and interactive form

mod args;
pub mod interactive;
mod prompts;
pub mod run;

pub use args::{default_output_dir, Cli};
pub use interactive::run_interactive;
pub use prompts::*;
pub use run::{run_cli, ConversionJob, JobMode, JobOutcome};
