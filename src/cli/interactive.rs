//! Interactive conversion form using dialoguer
//!
//! Collects the same inputs as the command line (mode, source, output format,
//! output folder and, for ICO, the icon sizes), then runs the conversion through
//! the shared [`ConversionJob`].

use std::path::{Path, PathBuf};

use anyhow::Result;
use dialoguer::{Input, Select};

use super::args::{default_output_dir, Cli};
use super::prompts::{confirm_overwrite, confirm_step};
use super::run::{ConversionJob, JobMode};
use crate::convert::{
    parse_icon_sizes, ConversionRequest, ConversionService, ConvertError, IconSizes,
    FORM_FORMATS,
};
use crate::utils::{print_banner, print_config};

/// Run the prompt-driven form. Returns without converting if the user cancels.
pub fn run_interactive(cli: &Cli) -> Result<()> {
    print_banner(env!("CARGO_PKG_VERSION"));

    let mode = match Select::new()
        .with_prompt("Conversion mode")
        .items(&["Single file", "Whole folder"])
        .default(0)
        .interact()?
    {
        0 => JobMode::File,
        _ => JobMode::Folder,
    };

    let input = prompt_input_path(mode)?;

    let format_index = Select::new()
        .with_prompt("Output format")
        .items(&FORM_FORMATS)
        .default(0)
        .interact()?;
    let format = FORM_FORMATS[format_index].to_string();

    let output: String = Input::new()
        .with_prompt("Output folder")
        .default(default_output_dir(&input).display().to_string())
        .interact_text()?;
    let output_dir = PathBuf::from(output.trim());

    let icon_sizes = if format == "ico" {
        prompt_icon_sizes(&icon_sizes_default(cli)?)?
    } else {
        None
    };

    let job = ConversionJob {
        mode,
        input,
        format,
        output_dir,
        icon_sizes,
    };

    println!();
    print_config(
        &job.input,
        &job.format,
        &job.output_dir,
        job.icon_sizes_label().as_deref(),
    );

    if !confirm_step("Start conversion?")? {
        println!("Cancelled by user.");
        return Ok(());
    }

    if job.mode == JobMode::File {
        if let Ok(request) = ConversionRequest::new(
            &job.input,
            &job.format,
            &job.output_dir,
            job.icon_sizes.as_ref(),
        ) {
            let destination = request.destination_path();
            if destination.exists() && !confirm_overwrite(&destination)? {
                println!("Cancelled by user.");
                return Ok(());
            }
        }
    }

    let service = ConversionService::new(cli.options());
    let outcome = job.execute(&service, !cli.no_progress);

    if let Some(report_path) = &cli.report {
        job.write_report(&outcome, report_path)?;
    }

    Ok(())
}

fn prompt_input_path(mode: JobMode) -> Result<PathBuf> {
    let prompt = match mode {
        JobMode::File => "Input image",
        JobMode::Folder => "Input folder",
    };

    let text: String = Input::new()
        .with_prompt(prompt)
        .validate_with(move |value: &String| -> Result<(), String> {
            check_input_path(mode, Path::new(value.trim()))
        })
        .interact_text()?;

    Ok(PathBuf::from(text.trim()))
}

fn prompt_icon_sizes(default: &str) -> Result<Option<IconSizes>> {
    let text: String = Input::new()
        .with_prompt("Icon sizes (comma-separated)")
        .default(default.to_string())
        .allow_empty(true)
        .validate_with(|value: &String| -> Result<(), String> {
            parse_icon_sizes(value)
                .map(|_| ())
                .map_err(|e| format!("{} (example: 16,32,64,128)", e))
        })
        .interact_text()?;

    Ok(parse_icon_sizes(&text)?)
}

/// Prefilled icon sizes: `--ico-sizes` when given, else the default set
pub fn icon_sizes_default(cli: &Cli) -> Result<String, ConvertError> {
    Ok(cli.icon_sizes()?.unwrap_or_default().to_string())
}

/// Form-level check of the source path for the chosen mode
pub fn check_input_path(mode: JobMode, path: &Path) -> Result<(), String> {
    if path.as_os_str().is_empty() {
        return Err("Please enter a path".to_string());
    }
    match mode {
        JobMode::File if !path.is_file() => Err(format!("File not found: {}", path.display())),
        JobMode::Folder if !path.is_dir() => {
            Err(format!("Folder not found: {}", path.display()))
        }
        _ => Ok(()),
    }
}
