//! Command-line argument definitions using clap

use clap::Parser;
use std::path::{Path, PathBuf};

use crate::convert::{
    parse_icon_sizes, ConversionOptions, ConvertError, IconSizes, DEFAULT_JPEG_QUALITY,
};

/// imgconv - Convert images between PNG, JPEG, WEBP, BMP, TIFF and ICO
#[derive(Parser, Debug)]
#[command(name = "imgconv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input image, or a folder to convert every image directly inside it
    #[arg(required_unless_present = "interactive")]
    pub input: Option<PathBuf>,

    /// Output format: png, jpg, jpeg, webp, bmp, tif, tiff or ico
    #[arg(required_unless_present = "interactive")]
    pub format: Option<String>,

    /// Output folder, created if missing.
    /// Defaults to the input file's folder, or to the input folder itself.
    pub output_dir: Option<PathBuf>,

    /// Icon sizes for ICO output (comma-separated, e.g. "16,32,64").
    /// Defaults to 16,32,48,64,128,256.
    #[arg(long, value_parser = validate_icon_sizes)]
    pub ico_sizes: Option<String>,

    /// JPEG quality (1-100)
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY, value_parser = validate_quality)]
    pub quality: u8,

    /// Hide progress bars and spinners
    #[arg(long, default_value = "false")]
    pub no_progress: bool,

    /// Diagnostic log level (written to stderr). RUST_LOG overrides it.
    #[arg(long, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Write a JSON report of the run to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Fill in the conversion through interactive prompts
    #[arg(short = 'I', long, default_value = "false", conflicts_with_all = ["input", "format", "output_dir"])]
    pub interactive: bool,
}

impl Cli {
    /// Output folder for `input`: the explicit one, else the default.
    pub fn output_dir_for(&self, input: &Path) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(input))
    }

    /// Parsed `--ico-sizes`; `None` means the default sizes.
    pub fn icon_sizes(&self) -> Result<Option<IconSizes>, ConvertError> {
        match self.ico_sizes.as_deref() {
            Some(text) => parse_icon_sizes(text),
            None => Ok(None),
        }
    }

    pub fn options(&self) -> ConversionOptions {
        ConversionOptions {
            jpeg_quality: self.quality,
            ..Default::default()
        }
    }
}

/// A folder converts in place; a file converts next to itself.
pub fn default_output_dir(input: &Path) -> PathBuf {
    if input.is_dir() {
        return input.to_path_buf();
    }
    input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf()
}

/// Validator for the quality parameter
fn validate_quality(s: &str) -> Result<u8, String> {
    let value: u8 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid quality", s))?;

    if !(1..=100).contains(&value) {
        Err(format!("quality must be between 1 and 100, got {}", value))
    } else {
        Ok(value)
    }
}

/// Validator for the ico_sizes parameter
fn validate_icon_sizes(s: &str) -> Result<String, String> {
    parse_icon_sizes(s)
        .map(|_| s.to_string())
        .map_err(|e| e.to_string())
}
