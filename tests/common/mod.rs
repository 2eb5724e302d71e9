//! Shared test utilities and fixture generators

#![allow(dead_code)]

use image::{
    DynamicImage, ImageBuffer, ImageFormat, ImageReader, Luma, LumaA, Rgb, RgbImage, Rgba,
    RgbaImage,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create an opaque RGB gradient and save it as `name` (format from extension)
pub fn write_rgb_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 4) as u8, (y * 4) as u8, ((x + y) * 2) as u8])
    });
    let path = dir.join(name);
    img.save(&path).unwrap();
    path
}

/// Create a half-transparent RGBA image and save it as PNG
pub fn write_rgba_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([200, (x * 3) as u8, (y * 3) as u8, if x % 2 == 0 { 0 } else { 255 }])
    });
    let path = dir.join(name);
    img.save_with_format(&path, ImageFormat::Png).unwrap();
    path
}

/// Gray, gray+alpha and 16-bit sources, each 12x10, keyed by a short label
pub fn pixel_layout_images() -> Vec<(&'static str, DynamicImage)> {
    let (w, h) = (12, 10);
    vec![
        (
            "l8",
            DynamicImage::ImageLuma8(ImageBuffer::from_fn(w, h, |x, y| Luma([(x * 20 + y) as u8]))),
        ),
        (
            "la8",
            DynamicImage::ImageLumaA8(ImageBuffer::from_fn(w, h, |x, _| {
                LumaA([(x * 20) as u8, if x % 2 == 0 { 0 } else { 255 }])
            })),
        ),
        (
            "la16",
            DynamicImage::ImageLumaA16(ImageBuffer::from_fn(w, h, |x, y| {
                LumaA([(x * 5000) as u16, (y * 6000) as u16])
            })),
        ),
        (
            "rgb16",
            DynamicImage::ImageRgb16(ImageBuffer::from_fn(w, h, |x, y| {
                Rgb([(x * 5000) as u16, (y * 6000) as u16, 40000])
            })),
        ),
        (
            "rgba16",
            DynamicImage::ImageRgba16(ImageBuffer::from_fn(w, h, |x, y| {
                Rgba([(x * 5000) as u16, (y * 6000) as u16, 40000, 30000])
            })),
        ),
    ]
}

/// Save any in-memory image as PNG
pub fn write_png(dir: &Path, name: &str, img: &DynamicImage) -> PathBuf {
    let path = dir.join(name);
    img.save_with_format(&path, ImageFormat::Png).unwrap();
    path
}

/// Write arbitrary bytes to a file (non-images, corrupt images)
pub fn write_bytes(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Temporary directory holding a single 64x48 RGB PNG named `photo.png`
pub fn create_temp_png() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = write_rgb_image(temp_dir.path(), "photo.png", 64, 48);
    (temp_dir, path)
}

/// Detect an image's format from its content
pub fn sniff_format(path: &Path) -> Option<ImageFormat> {
    ImageReader::open(path)
        .unwrap()
        .with_guessed_format()
        .unwrap()
        .format()
}

/// Read the (width, height) of every entry in an ICO directory
pub fn ico_entry_sizes(path: &Path) -> Vec<(u32, u32)> {
    let bytes = std::fs::read(path).unwrap();
    assert!(bytes.len() >= 6, "ICO file too short");
    assert_eq!(&bytes[0..4], &[0, 0, 1, 0], "Not an ICO header");

    let count = u16::from_le_bytes([bytes[4], bytes[5]]) as usize;
    let dim = |b: u8| if b == 0 { 256 } else { b as u32 };
    (0..count)
        .map(|i| {
            let entry = &bytes[6 + i * 16..6 + (i + 1) * 16];
            (dim(entry[0]), dim(entry[1]))
        })
        .collect()
}

/// Sorted file names in a directory
pub fn list_file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
