//! Output format parsing and the set of recognized image extensions

use std::fmt;
use std::path::Path;

use image::ImageFormat;

use super::ConvertError;

/// Extensions (lowercase, with leading dot) that folder conversion picks up.
pub const ALLOWED_EXTENSIONS: [&str; 8] = [
    ".png", ".jpg", ".jpeg", ".webp", ".bmp", ".tif", ".tiff", ".ico",
];

/// Output formats offered by the interactive form, in display order.
pub const FORM_FORMATS: [&str; 7] = ["webp", "png", "jpg", "jpeg", "ico", "bmp", "tiff"];

/// Encoder family an output is written with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Png,
    Jpeg,
    WebP,
    Bmp,
    Tiff,
    Ico,
}

impl OutputKind {
    pub fn image_format(self) -> ImageFormat {
        match self {
            OutputKind::Png => ImageFormat::Png,
            OutputKind::Jpeg => ImageFormat::Jpeg,
            OutputKind::WebP => ImageFormat::WebP,
            OutputKind::Bmp => ImageFormat::Bmp,
            OutputKind::Tiff => ImageFormat::Tiff,
            OutputKind::Ico => ImageFormat::Ico,
        }
    }
}

/// A validated target format.
///
/// Keeps the normalized extension the user asked for (`jpeg` stays `jpeg`,
/// `tif` stays `tif`) so output files are named exactly `<stem>.<extension>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFormat {
    kind: OutputKind,
    extension: String,
}

impl TargetFormat {
    /// Parse a user-supplied format such as `"PNG"`, `".webp"` or `" jpg "`.
    pub fn parse(raw: &str) -> Result<Self, ConvertError> {
        let extension = normalize_format(raw);
        if extension.is_empty() {
            return Err(ConvertError::invalid_option("output format is empty"));
        }

        let kind = match extension.as_str() {
            "png" => OutputKind::Png,
            "jpg" | "jpeg" => OutputKind::Jpeg,
            "webp" => OutputKind::WebP,
            "bmp" => OutputKind::Bmp,
            "tif" | "tiff" => OutputKind::Tiff,
            "ico" => OutputKind::Ico,
            other => {
                return Err(ConvertError::invalid_option(format!(
                    "unsupported output format '{}'. Supported formats: png, jpg, jpeg, webp, bmp, tif, tiff, ico",
                    other
                )))
            }
        };

        Ok(Self { kind, extension })
    }

    pub fn kind(&self) -> OutputKind {
        self.kind
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn is_ico(&self) -> bool {
        self.kind == OutputKind::Ico
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension)
    }
}

/// Lowercase, trim and drop a leading dot.
pub fn normalize_format(raw: &str) -> String {
    raw.trim().trim_start_matches('.').to_lowercase()
}

/// Whether `path` has one of the [`ALLOWED_EXTENSIONS`] (case-insensitive).
pub fn has_image_extension(path: &Path) -> bool {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    !extension.is_empty()
        && ALLOWED_EXTENSIONS
            .iter()
            .any(|allowed| allowed.trim_start_matches('.') == extension)
}
