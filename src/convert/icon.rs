//! Icon size lists and multi-resolution ICO encoding

use std::fmt;
use std::io::Write;

use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageResult};

use super::ConvertError;

/// Square sizes written into an ICO when the caller does not pick any.
pub const DEFAULT_ICON_SIZES: [u32; 6] = [16, 32, 48, 64, 128, 256];

/// Largest edge an ICO directory entry can describe.
pub const MAX_ICON_SIZE: u32 = 256;

/// Ordered list of (width, height) renditions to pack into an ICO file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSizes(Vec<(u32, u32)>);

impl IconSizes {
    /// Build a set of square sizes, e.g. `[16, 32]` -> `[(16, 16), (32, 32)]`.
    pub fn squares(sizes: &[u32]) -> Self {
        Self(sizes.iter().map(|&n| (n, n)).collect())
    }

    pub fn as_slice(&self) -> &[(u32, u32)] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every entry must fit an ICO directory entry (1..=256 px per edge).
    pub fn validate_for_ico(&self) -> Result<(), ConvertError> {
        if self.0.is_empty() {
            return Err(ConvertError::invalid_option("icon size list is empty"));
        }
        if let Some((w, h)) = self
            .0
            .iter()
            .find(|(w, h)| *w == 0 || *h == 0 || *w > MAX_ICON_SIZE || *h > MAX_ICON_SIZE)
        {
            return Err(ConvertError::invalid_option(format!(
                "icon size {}x{} is outside 1..={} pixels",
                w, h, MAX_ICON_SIZE
            )));
        }
        Ok(())
    }
}

impl Default for IconSizes {
    fn default() -> Self {
        Self::squares(&DEFAULT_ICON_SIZES)
    }
}

impl fmt::Display for IconSizes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|(w, h)| {
                if w == h {
                    w.to_string()
                } else {
                    format!("{}x{}", w, h)
                }
            })
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&joined)
    }
}

/// Parse a comma-separated icon size list such as `"16, 32,64"`.
///
/// Returns `Ok(None)` when the text holds no sizes at all (empty, whitespace,
/// or only separators), meaning the default sizes apply. Any segment that is not
/// a positive integer rejects the whole list.
pub fn parse_icon_sizes(text: &str) -> Result<Option<IconSizes>, ConvertError> {
    let mut sizes = Vec::new();

    for segment in text.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let value: i64 = segment.parse().map_err(|_| {
            ConvertError::invalid_option(format!("'{}' is not a valid icon size", segment))
        })?;
        if value <= 0 {
            return Err(ConvertError::invalid_option(format!(
                "icon size must be positive, got {}",
                value
            )));
        }
        let value = u32::try_from(value).map_err(|_| {
            ConvertError::invalid_option(format!("icon size {} is too large", value))
        })?;
        sizes.push(value);
    }

    if sizes.is_empty() {
        Ok(None)
    } else {
        Ok(Some(IconSizes::squares(&sizes)))
    }
}

/// Resize `img` to every entry of `sizes` and write all renditions as one ICO.
///
/// Frames are stored PNG-compressed in the order given.
pub fn encode_ico<W: Write>(
    img: &DynamicImage,
    sizes: &IconSizes,
    filter: FilterType,
    writer: W,
) -> ImageResult<()> {
    let mut frames = Vec::with_capacity(sizes.len());
    for &(width, height) in sizes.as_slice() {
        log::debug!("Rendering {}x{} icon frame", width, height);
        let rendition = img.resize_exact(width, height, filter).to_rgba8();
        frames.push(IcoFrame::as_png(
            rendition.as_raw(),
            width,
            height,
            ExtendedColorType::Rgba8,
        )?);
    }

    IcoEncoder::new(writer).encode_images(&frames)
}
