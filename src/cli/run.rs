//! Conversion jobs shared by the CLI and the interactive form

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};

use super::args::Cli;
use crate::convert::{
    BatchOutcome, BatchResult, ConversionResult, ConversionService, IconSizes, NO_IMAGES_MESSAGE,
};
use crate::report::{export_report, ConversionReport, ConversionSummary, ReportParams};
use crate::utils::{
    create_progress_bar, create_spinner, finish_with_success, finish_with_warning, print_banner,
    print_completion, print_config, print_info, print_result, print_warning,
};

/// Whether a job converts one file or a whole folder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobMode {
    File,
    Folder,
}

/// Everything needed to run one conversion, whichever front-end collected it
#[derive(Debug, Clone)]
pub struct ConversionJob {
    pub mode: JobMode,
    pub input: PathBuf,
    pub format: String,
    pub output_dir: PathBuf,
    pub icon_sizes: Option<IconSizes>,
}

/// What a job produced
#[derive(Debug)]
pub enum JobOutcome {
    Single(ConversionResult),
    Batch(BatchResult),
}

impl JobOutcome {
    pub fn results(&self) -> &[ConversionResult] {
        match self {
            JobOutcome::Single(result) => std::slice::from_ref(result),
            JobOutcome::Batch(batch) => &batch.results,
        }
    }

    /// Messages that do not belong to any file, e.g. "No images found".
    pub fn notes(&self) -> Vec<String> {
        match self {
            JobOutcome::Single(_) => Vec::new(),
            JobOutcome::Batch(batch) => batch
                .messages
                .iter()
                .skip(batch.results.len())
                .cloned()
                .collect(),
        }
    }
}

impl ConversionJob {
    /// Icon sizes as shown to the user, only when they apply.
    pub fn icon_sizes_label(&self) -> Option<String> {
        if !self.format.trim().trim_start_matches('.').eq_ignore_ascii_case("ico") {
            return None;
        }
        Some(self.icon_sizes.clone().unwrap_or_default().to_string())
    }

    /// Run the job, printing per-file lines and, for folders, a summary.
    pub fn execute(&self, service: &ConversionService, show_progress: bool) -> JobOutcome {
        match self.mode {
            JobMode::File => JobOutcome::Single(self.execute_file(service, show_progress)),
            JobMode::Folder => JobOutcome::Batch(self.execute_folder(service, show_progress)),
        }
    }

    fn execute_file(&self, service: &ConversionService, show_progress: bool) -> ConversionResult {
        let spinner = show_progress.then(|| {
            create_spinner(&format!("Converting {}...", file_label(&self.input)))
        });

        let result = service.convert_file(
            &self.input,
            &self.format,
            &self.output_dir,
            self.icon_sizes.as_ref(),
        );

        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        print_result(&result);
        result
    }

    fn execute_folder(&self, service: &ConversionService, show_progress: bool) -> BatchResult {
        print_banner(env!("CARGO_PKG_VERSION"));
        print_config(
            &self.input,
            &self.format,
            &self.output_dir,
            self.icon_sizes_label().as_deref(),
        );

        let start = Instant::now();
        let mut pb = None;
        let batch = service.convert_folder_with(
            &self.input,
            &self.format,
            &self.output_dir,
            self.icon_sizes.as_ref(),
            |_, total, result| {
                let bar = pb.get_or_insert_with(|| {
                    create_progress_bar(total as u64, "Converting", !show_progress)
                });
                bar.suspend(|| print_result(result));
                bar.inc(1);
            },
        );

        if let Some(bar) = &pb {
            if batch.failed == 0 {
                finish_with_success(bar, "All images converted");
            } else {
                finish_with_warning(bar, &format!("{} image(s) failed", batch.failed));
            }
        }

        if batch.total() == 0 {
            for note in &batch.messages {
                if note == NO_IMAGES_MESSAGE {
                    print_info(note);
                } else {
                    print_warning(note);
                }
            }
            return batch;
        }

        ConversionSummary::new(&self.format, &batch, start.elapsed()).display();

        match batch.outcome() {
            BatchOutcome::AllSucceeded => print_completion(),
            BatchOutcome::PartialFailure => {
                println!();
                print_warning("Conversion finished with errors");
            }
            BatchOutcome::NothingConverted => {
                println!();
                print_warning("No image could be converted");
            }
        }

        batch
    }

    /// Write the JSON report for `outcome` to `path`.
    pub fn write_report(&self, outcome: &JobOutcome, path: &Path) -> Result<()> {
        let report = ConversionReport::new(
            ReportParams {
                input: &self.input,
                target_format: &self.format,
                output_dir: &self.output_dir,
                icon_sizes: self.icon_sizes_label(),
            },
            outcome.results(),
            outcome.notes(),
        );
        export_report(&report, path)?;
        log::info!("Report written to {}", path.display());
        Ok(())
    }
}

/// Run the argument-driven conversion.
///
/// Conversion failures are printed, never returned: the process exits 0 whatever
/// the outcome. Only failures outside a conversion (e.g. writing `--report`)
/// propagate.
pub fn run_cli(cli: &Cli) -> Result<()> {
    let input = cli
        .input
        .as_deref()
        .context("Input path is required. Usage: imgconv <INPUT> <FORMAT> [OUTPUT_DIR]")?;
    let format = cli
        .format
        .as_deref()
        .context("Output format is required. Usage: imgconv <INPUT> <FORMAT> [OUTPUT_DIR]")?;

    // Already checked by clap; kept for callers building Cli by hand.
    let icon_sizes = match cli.icon_sizes() {
        Ok(sizes) => sizes,
        Err(e) => {
            print_warning(&format!("ERROR: {}", e));
            return Ok(());
        }
    };

    let job = ConversionJob {
        mode: if input.is_dir() {
            JobMode::Folder
        } else {
            JobMode::File
        },
        input: input.to_path_buf(),
        format: format.to_string(),
        output_dir: cli.output_dir_for(input),
        icon_sizes,
    };
    log::debug!("Running {:?}", job);

    let service = ConversionService::new(cli.options());
    let outcome = job.execute(&service, !cli.no_progress);

    if let Some(report_path) = &cli.report {
        job.write_report(&outcome, report_path)?;
    }

    Ok(())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
