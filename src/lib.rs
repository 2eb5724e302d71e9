//! imgconv: Image Conversion Library
//!
//! Converts raster images between PNG, JPEG, WEBP, BMP, TIFF and ICO,
//! one file at a time or for every image in a folder.

pub mod cli;
pub mod convert;
pub mod report;
pub mod utils;
