//! Folder conversion: discover images in a directory and convert each one

use std::fs;
use std::path::{Path, PathBuf};

use super::file::convert_file;
use super::format::has_image_extension;
use super::{ConversionOptions, ConversionResult, ConvertError, IconSizes};

/// How many trailing log lines [`BatchResult::report`] shows.
pub const REPORT_TAIL: usize = 10;

pub const NO_IMAGES_MESSAGE: &str = "No images found in the folder.";

/// Aggregate outcome of a folder conversion
#[derive(Debug, Default)]
pub struct BatchResult {
    pub succeeded: usize,
    pub failed: usize,
    /// One line per converted file, in enumeration order, plus any informational notes
    pub messages: Vec<String>,
    pub results: Vec<ConversionResult>,
}

/// Coarse classification used to pick how a batch is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    AllSucceeded,
    PartialFailure,
    NothingConverted,
}

impl BatchResult {
    fn with_message(message: String) -> Self {
        Self {
            messages: vec![message],
            ..Default::default()
        }
    }

    fn record(&mut self, result: ConversionResult) {
        if result.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        self.messages.push(result.message());
        self.results.push(result);
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn outcome(&self) -> BatchOutcome {
        match (self.succeeded, self.failed) {
            (0, _) => BatchOutcome::NothingConverted,
            (_, 0) => BatchOutcome::AllSucceeded,
            _ => BatchOutcome::PartialFailure,
        }
    }

    /// Last [`REPORT_TAIL`] messages followed by the success/error counts.
    pub fn report(&self) -> String {
        let start = self.messages.len().saturating_sub(REPORT_TAIL);
        format!(
            "{}\n\nFiles OK: {}\nErrors: {}",
            self.messages[start..].join("\n"),
            self.succeeded,
            self.failed
        )
    }
}

/// List the regular files directly inside `dir` that carry an image extension.
///
/// Non-recursive; order is whatever the filesystem yields.
pub fn collect_images(dir: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    let entries = fs::read_dir(dir).map_err(|source| ConvertError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut images = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                log::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };
        if path.is_file() && has_image_extension(&path) {
            images.push(path);
        }
    }

    Ok(images)
}

/// Convert every image in `source_dir`, calling `on_file(index, total, result)`
/// after each file. A failing file never stops the rest.
pub(crate) fn convert_folder_with<F>(
    source_dir: &Path,
    target_format: &str,
    destination_dir: &Path,
    icon_sizes: Option<&IconSizes>,
    options: &ConversionOptions,
    mut on_file: F,
) -> BatchResult
where
    F: FnMut(usize, usize, &ConversionResult),
{
    if !source_dir.is_dir() {
        log::warn!("Input folder does not exist: {}", source_dir.display());
        return BatchResult::with_message(format!(
            "Input folder does not exist: {}",
            source_dir.display()
        ));
    }

    if let Err(source) = fs::create_dir_all(destination_dir) {
        let error = ConvertError::Io {
            path: destination_dir.to_path_buf(),
            source,
        };
        return BatchResult::with_message(format!("ERROR: {}", error));
    }

    // Collect first so outputs written into source_dir are never picked up.
    let images = match collect_images(source_dir) {
        Ok(images) => images,
        Err(error) => return BatchResult::with_message(format!("ERROR: {}", error)),
    };
    log::info!(
        "Found {} image(s) in {}",
        images.len(),
        source_dir.display()
    );

    let mut batch = BatchResult::default();
    let total = images.len();
    for (index, image) in images.iter().enumerate() {
        let result = convert_file(image, target_format, destination_dir, icon_sizes, options);
        on_file(index, total, &result);
        batch.record(result);
    }

    if batch.total() == 0 {
        batch.messages.push(NO_IMAGES_MESSAGE.to_string());
    }

    batch
}
