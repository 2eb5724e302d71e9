//! Convert module - decoding, format-specific adjustments and re-encoding

pub mod batch;
pub mod error;
pub mod file;
pub mod format;
pub mod icon;
pub mod service;

pub use batch::{collect_images, BatchOutcome, BatchResult, NO_IMAGES_MESSAGE};
pub use error::ConvertError;
pub use file::{flatten_for_jpeg, widen_for_tiff, ConversionRequest, ConversionResult};
pub use format::{has_image_extension, OutputKind, TargetFormat, ALLOWED_EXTENSIONS, FORM_FORMATS};
pub use icon::{parse_icon_sizes, IconSizes, DEFAULT_ICON_SIZES};
pub use service::{ConversionOptions, ConversionService, DEFAULT_JPEG_QUALITY};
