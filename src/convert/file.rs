//! Single-file conversion: decode, adjust, re-encode

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage, ImageError, ImageReader, ImageResult};
use tempfile::NamedTempFile;

use super::icon::encode_ico;
use super::{ConversionOptions, ConvertError, IconSizes, OutputKind, TargetFormat};

/// A validated conversion of one source file.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub source: PathBuf,
    pub format: TargetFormat,
    pub destination_dir: PathBuf,
    /// Only set for ICO output; holds the explicit or default size list.
    pub icon_sizes: Option<IconSizes>,
}

impl ConversionRequest {
    /// Validate the format and icon sizes without touching the filesystem.
    pub fn new(
        source: &Path,
        target_format: &str,
        destination_dir: &Path,
        icon_sizes: Option<&IconSizes>,
    ) -> Result<Self, ConvertError> {
        let format = TargetFormat::parse(target_format)?;

        let icon_sizes = if format.is_ico() {
            let sizes = icon_sizes.cloned().unwrap_or_default();
            sizes.validate_for_ico()?;
            Some(sizes)
        } else {
            None
        };

        Ok(Self {
            source: source.to_path_buf(),
            format,
            destination_dir: destination_dir.to_path_buf(),
            icon_sizes,
        })
    }

    /// `<destination_dir>/<source stem>.<format>`
    pub fn destination_path(&self) -> PathBuf {
        self.destination_dir
            .join(format!("{}.{}", source_stem(&self.source), self.format.extension()))
    }

    fn execute(&self, options: &ConversionOptions) -> Result<PathBuf, ConvertError> {
        fs::create_dir_all(&self.destination_dir).map_err(|source| ConvertError::Io {
            path: self.destination_dir.clone(),
            source,
        })?;

        let destination = self.destination_path();
        let file = source_file_name(&self.source);

        log::debug!("Decoding {}", self.source.display());
        let img = decode(&self.source).map_err(|source| ConvertError::Image {
            file: file.clone(),
            source,
        })?;
        log::debug!(
            "Decoded {}x{} {:?}, encoding as {}",
            img.width(),
            img.height(),
            img.color(),
            self.format
        );

        // Staged in the destination folder; replaces the destination only after a complete encode.
        let staged = NamedTempFile::new_in(&self.destination_dir).map_err(|source| {
            ConvertError::Io {
                path: self.destination_dir.clone(),
                source,
            }
        })?;
        self.encode(img, staged.path(), options)
            .map_err(|source| ConvertError::Image { file, source })?;
        staged
            .persist(&destination)
            .map_err(|err| ConvertError::Io {
                path: destination.clone(),
                source: err.error,
            })?;

        Ok(destination)
    }

    fn encode(
        &self,
        img: DynamicImage,
        destination: &Path,
        options: &ConversionOptions,
    ) -> ImageResult<()> {
        match self.format.kind() {
            OutputKind::Ico => {
                let sizes = self.icon_sizes.clone().unwrap_or_default();
                let mut writer = BufWriter::new(File::create(destination)?);
                encode_ico(&img, &sizes, options.icon_filter, &mut writer)?;
                writer.flush()?;
                Ok(())
            }
            OutputKind::Jpeg => {
                let img = flatten_for_jpeg(img);
                let mut writer = BufWriter::new(File::create(destination)?);
                img.write_with_encoder(JpegEncoder::new_with_quality(
                    &mut writer,
                    options.jpeg_quality,
                ))?;
                writer.flush()?;
                Ok(())
            }
            OutputKind::Tiff => {
                widen_for_tiff(img).save_with_format(destination, image::ImageFormat::Tiff)
            }
            kind => img.save_with_format(destination, kind.image_format()),
        }
    }
}

/// Outcome of converting one file. Created once, never mutated.
#[derive(Debug)]
pub enum ConversionResult {
    Converted {
        source: PathBuf,
        destination: PathBuf,
    },
    Failed {
        source: PathBuf,
        error: ConvertError,
    },
}

impl ConversionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ConversionResult::Converted { .. })
    }

    pub fn source(&self) -> &Path {
        match self {
            ConversionResult::Converted { source, .. } | ConversionResult::Failed { source, .. } => {
                source.as_path()
            }
        }
    }

    pub fn destination(&self) -> Option<&Path> {
        match self {
            ConversionResult::Converted { destination, .. } => Some(destination.as_path()),
            ConversionResult::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ConvertError> {
        match self {
            ConversionResult::Converted { .. } => None,
            ConversionResult::Failed { error, .. } => Some(error),
        }
    }

    /// Human-readable line for display and logs.
    pub fn message(&self) -> String {
        match self {
            ConversionResult::Converted {
                source,
                destination,
            } => format!("OK: {} -> {}", source.display(), destination.display()),
            ConversionResult::Failed {
                error: error @ ConvertError::Image { .. },
                ..
            } => format!("ERROR in {}", error),
            ConversionResult::Failed { error, .. } => format!("ERROR: {}", error),
        }
    }
}

/// Convert one file. Never panics or propagates: every failure becomes
/// [`ConversionResult::Failed`].
pub(crate) fn convert_file(
    source: &Path,
    target_format: &str,
    destination_dir: &Path,
    icon_sizes: Option<&IconSizes>,
    options: &ConversionOptions,
) -> ConversionResult {
    let outcome = if source.is_file() {
        ConversionRequest::new(source, target_format, destination_dir, icon_sizes)
            .and_then(|request| request.execute(options))
    } else {
        Err(ConvertError::NotFound {
            path: source.to_path_buf(),
        })
    };

    match outcome {
        Ok(destination) => {
            log::info!("Converted {} -> {}", source.display(), destination.display());
            ConversionResult::Converted {
                source: source.to_path_buf(),
                destination,
            }
        }
        Err(error) => {
            log::warn!("Failed to convert {}: {}", source.display(), error);
            ConversionResult::Failed {
                source: source.to_path_buf(),
                error,
            }
        }
    }
}

/// JPEG holds 8-bit gray or RGB only: drop alpha and narrow deep images.
pub fn flatten_for_jpeg(img: DynamicImage) -> DynamicImage {
    match img.color() {
        ColorType::L8 | ColorType::Rgb8 => img,
        ColorType::L16 => DynamicImage::ImageLuma8(img.to_luma8()),
        _ => DynamicImage::ImageRgb8(img.to_rgb8()),
    }
}

/// The TIFF encoder has no gray+alpha layout: widen it to RGBA at the same depth.
pub fn widen_for_tiff(img: DynamicImage) -> DynamicImage {
    match img.color() {
        ColorType::La8 => DynamicImage::ImageRgba8(img.to_rgba8()),
        ColorType::La16 => DynamicImage::ImageRgba16(img.to_rgba16()),
        _ => img,
    }
}

fn decode(path: &Path) -> ImageResult<DynamicImage> {
    ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(ImageError::IoError)?
        .decode()
}

fn source_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string())
}

fn source_file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{LumaA, Rgb, Rgba, RgbImage, RgbaImage};

    #[test]
    fn test_destination_path_uses_stem_and_requested_extension() {
        let request = ConversionRequest::new(
            Path::new("/in/photo.final.png"),
            ".JPEG",
            Path::new("/out"),
            None,
        )
        .unwrap();
        assert_eq!(
            request.destination_path(),
            PathBuf::from("/out/photo.final.jpeg")
        );
        assert!(request.icon_sizes.is_none());
    }

    #[test]
    fn test_ico_request_defaults_icon_sizes() {
        let request =
            ConversionRequest::new(Path::new("logo.png"), "ico", Path::new("out"), None).unwrap();
        assert_eq!(request.icon_sizes, Some(IconSizes::default()));
    }

    #[test]
    fn test_ico_request_rejects_oversize_entry() {
        let sizes = IconSizes::squares(&[16, 512]);
        let err = ConversionRequest::new(Path::new("logo.png"), "ico", Path::new("out"), Some(&sizes))
            .unwrap_err();
        assert!(matches!(err, ConvertError::InvalidOption(_)));
    }

    #[test]
    fn test_flatten_for_jpeg_drops_alpha() {
        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 4])));
        assert_eq!(flatten_for_jpeg(rgba).color(), ColorType::Rgb8);

        let la = DynamicImage::ImageLumaA8(image::ImageBuffer::from_pixel(2, 2, LumaA([9, 0])));
        assert!(!flatten_for_jpeg(la).color().has_alpha());
    }

    #[test]
    fn test_widen_for_tiff_turns_gray_alpha_into_rgba() {
        let la8 = DynamicImage::ImageLumaA8(image::ImageBuffer::from_pixel(2, 2, LumaA([9, 128])));
        assert_eq!(widen_for_tiff(la8).color(), ColorType::Rgba8);

        let la16 =
            DynamicImage::ImageLumaA16(image::ImageBuffer::from_pixel(2, 2, LumaA([900u16, 7])));
        assert_eq!(widen_for_tiff(la16).color(), ColorType::Rgba16);

        let rgb = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([1, 2, 3])));
        assert_eq!(widen_for_tiff(rgb).color(), ColorType::Rgb8);
    }

    #[test]
    fn test_flatten_for_jpeg_keeps_rgb() {
        let rgb = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([1, 2, 3])));
        assert_eq!(flatten_for_jpeg(rgb).color(), ColorType::Rgb8);
    }

    #[test]
    fn test_failed_message_names_the_file() {
        let result = ConversionResult::Failed {
            source: PathBuf::from("dir/broken.png"),
            error: ConvertError::Image {
                file: "broken.png".to_string(),
                source: ImageError::IoError(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "truncated",
                )),
            },
        };
        assert!(!result.is_success());
        assert!(result.message().starts_with("ERROR in broken.png"));
        assert!(result.message().contains("truncated"));
    }
}
