//! The conversion service shared by every front-end

use std::path::Path;

use image::imageops::FilterType;

use super::batch::{convert_folder_with, BatchResult};
use super::file::{convert_file, ConversionResult};
use super::IconSizes;

pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Encoder settings fixed for the lifetime of a run
#[derive(Debug, Clone, Copy)]
pub struct ConversionOptions {
    /// JPEG quality, 1..=100
    pub jpeg_quality: u8,
    /// Filter used to scale ICO renditions
    pub icon_filter: FilterType,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            icon_filter: FilterType::Lanczos3,
        }
    }
}

/// Converts files and folders with a fixed set of [`ConversionOptions`].
///
/// Both the CLI and the interactive form drive conversions through this type.
/// All work happens synchronously on the calling thread.
#[derive(Debug, Clone, Default)]
pub struct ConversionService {
    options: ConversionOptions,
}

impl ConversionService {
    pub fn new(options: ConversionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Convert a single image into `destination_dir/<stem>.<target_format>`.
    ///
    /// `icon_sizes` only matters for ICO output; `None` selects the default sizes.
    pub fn convert_file(
        &self,
        source: &Path,
        target_format: &str,
        destination_dir: &Path,
        icon_sizes: Option<&IconSizes>,
    ) -> ConversionResult {
        convert_file(source, target_format, destination_dir, icon_sizes, &self.options)
    }

    /// Convert every recognized image directly inside `source_dir`.
    pub fn convert_folder(
        &self,
        source_dir: &Path,
        target_format: &str,
        destination_dir: &Path,
        icon_sizes: Option<&IconSizes>,
    ) -> BatchResult {
        self.convert_folder_with(source_dir, target_format, destination_dir, icon_sizes, |_, _, _| {})
    }

    /// Like [`convert_folder`](Self::convert_folder), reporting each file as it finishes.
    pub fn convert_folder_with<F>(
        &self,
        source_dir: &Path,
        target_format: &str,
        destination_dir: &Path,
        icon_sizes: Option<&IconSizes>,
        on_file: F,
    ) -> BatchResult
    where
        F: FnMut(usize, usize, &ConversionResult),
    {
        convert_folder_with(
            source_dir,
            target_format,
            destination_dir,
            icon_sizes,
            &self.options,
            on_file,
        )
    }
}
