//! Tests for single-file conversion

mod common;

use image::{ColorType, GenericImageView, GrayImage, ImageFormat, Luma};
use imgconv::convert::{ConversionResult, ConversionService, ConvertError, IconSizes};
use tempfile::TempDir;

#[test]
fn test_rgb_source_converts_to_every_non_ico_format() {
    let (temp_dir, source) = common::create_temp_png();
    let service = ConversionService::default();
    let out_dir = temp_dir.path().join("out");

    let cases = [
        ("png", ImageFormat::Png),
        ("jpg", ImageFormat::Jpeg),
        ("jpeg", ImageFormat::Jpeg),
        ("webp", ImageFormat::WebP),
        ("bmp", ImageFormat::Bmp),
        ("tif", ImageFormat::Tiff),
        ("tiff", ImageFormat::Tiff),
    ];

    for (format, expected) in cases {
        let result = service.convert_file(&source, format, &out_dir, None);
        assert!(result.is_success(), "{} failed: {}", format, result.message());

        let destination = result.destination().unwrap().to_path_buf();
        assert_eq!(destination, out_dir.join(format!("photo.{}", format)));
        assert_eq!(
            common::sniff_format(&destination),
            Some(expected),
            "Encoded format mismatch for {}",
            format
        );

        let decoded = image::open(&destination).unwrap();
        assert_eq!(decoded.dimensions(), (64, 48));
    }
}

#[test]
fn test_format_is_normalized() {
    let (temp_dir, source) = common::create_temp_png();
    let service = ConversionService::default();

    let result = service.convert_file(&source, " .WEBP ", temp_dir.path(), None);

    assert!(result.is_success(), "{}", result.message());
    assert!(temp_dir.path().join("photo.webp").exists());
}

#[test]
fn test_rgba_source_to_jpg_is_flattened() {
    let temp_dir = TempDir::new().unwrap();
    let source = common::write_rgba_png(temp_dir.path(), "logo.png", 32, 32);
    let service = ConversionService::default();

    let result = service.convert_file(&source, "jpg", temp_dir.path(), None);

    assert!(result.is_success(), "{}", result.message());
    let output = image::open(temp_dir.path().join("logo.jpg")).unwrap();
    assert!(!output.color().has_alpha(), "JPEG output must not carry alpha");
}

#[test]
fn test_rgba_source_keeps_alpha_for_png() {
    let temp_dir = TempDir::new().unwrap();
    let source = common::write_rgba_png(temp_dir.path(), "logo.png", 16, 16);
    let out_dir = temp_dir.path().join("out");

    let result = ConversionService::default().convert_file(&source, "png", &out_dir, None);

    assert!(result.is_success());
    let output = image::open(out_dir.join("logo.png")).unwrap();
    assert!(output.color().has_alpha());
}

#[test]
fn test_ico_default_sizes() {
    let (temp_dir, source) = common::create_temp_png();

    let result = ConversionService::default().convert_file(&source, "ico", temp_dir.path(), None);

    assert!(result.is_success(), "{}", result.message());
    let sizes = common::ico_entry_sizes(&temp_dir.path().join("photo.ico"));
    assert_eq!(
        sizes,
        vec![(16, 16), (32, 32), (48, 48), (64, 64), (128, 128), (256, 256)]
    );
}

#[test]
fn test_ico_explicit_sizes() {
    let (temp_dir, source) = common::create_temp_png();
    let sizes = IconSizes::squares(&[16, 32]);

    let result =
        ConversionService::default().convert_file(&source, "ico", temp_dir.path(), Some(&sizes));

    assert!(result.is_success(), "{}", result.message());
    let entries = common::ico_entry_sizes(&temp_dir.path().join("photo.ico"));
    assert_eq!(entries, vec![(16, 16), (32, 32)]);
}

#[test]
fn test_ico_output_is_decodable() {
    let (temp_dir, source) = common::create_temp_png();
    let sizes = IconSizes::squares(&[48]);

    ConversionService::default().convert_file(&source, "ico", temp_dir.path(), Some(&sizes));

    let ico_path = temp_dir.path().join("photo.ico");
    assert_eq!(common::sniff_format(&ico_path), Some(ImageFormat::Ico));
    let decoded = image::open(&ico_path).unwrap();
    assert_eq!(decoded.dimensions(), (48, 48));
}

#[test]
fn test_missing_source_fails_without_creating_destination() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.png");
    let out_dir = temp_dir.path().join("never").join("created");

    let result = ConversionService::default().convert_file(&missing, "webp", &out_dir, None);

    assert!(!result.is_success());
    assert!(matches!(result.error(), Some(ConvertError::NotFound { .. })));
    assert!(result.message().contains("nope.png"));
    assert!(!out_dir.exists(), "Destination must not be created for a missing source");
}

#[test]
fn test_directory_as_source_is_not_found() {
    let temp_dir = TempDir::new().unwrap();

    let result =
        ConversionService::default().convert_file(temp_dir.path(), "png", temp_dir.path(), None);

    assert!(matches!(result.error(), Some(ConvertError::NotFound { .. })));
}

#[test]
fn test_unsupported_format_is_invalid_option() {
    let (temp_dir, source) = common::create_temp_png();
    let out_dir = temp_dir.path().join("out");

    let result = ConversionService::default().convert_file(&source, "gif", &out_dir, None);

    assert!(matches!(result.error(), Some(ConvertError::InvalidOption(_))));
    assert!(!out_dir.exists());
}

#[test]
fn test_oversize_icon_is_invalid_option() {
    let (temp_dir, source) = common::create_temp_png();
    let sizes = IconSizes::squares(&[16, 1024]);

    let result =
        ConversionService::default().convert_file(&source, "ico", temp_dir.path(), Some(&sizes));

    assert!(matches!(result.error(), Some(ConvertError::InvalidOption(_))));
    assert!(!temp_dir.path().join("photo.ico").exists());
}

#[test]
fn test_corrupt_image_reports_file_name() {
    let temp_dir = TempDir::new().unwrap();
    let source = common::write_bytes(temp_dir.path(), "broken.png", b"definitely not a png");
    let out_dir = temp_dir.path().join("out");

    let result = ConversionService::default().convert_file(&source, "webp", &out_dir, None);

    match &result {
        ConversionResult::Failed {
            error: ConvertError::Image { file, .. },
            ..
        } => assert_eq!(file, "broken.png"),
        other => panic!("Expected an image error, got {:?}", other),
    }
    assert!(result.message().starts_with("ERROR in broken.png"));
    assert!(!out_dir.join("broken.webp").exists());
}

#[test]
fn test_destination_parents_are_created() {
    let (temp_dir, source) = common::create_temp_png();
    let out_dir = temp_dir.path().join("a").join("b").join("c");

    let result = ConversionService::default().convert_file(&source, "bmp", &out_dir, None);

    assert!(result.is_success(), "{}", result.message());
    assert!(out_dir.join("photo.bmp").exists());
}

#[test]
fn test_content_is_sniffed_over_extension() {
    let temp_dir = TempDir::new().unwrap();
    // PNG bytes behind a .jpg extension
    let png = common::write_rgb_image(temp_dir.path(), "real.png", 8, 8);
    let mislabeled = temp_dir.path().join("mislabeled.jpg");
    std::fs::rename(&png, &mislabeled).unwrap();

    let result = ConversionService::default().convert_file(&mislabeled, "bmp", temp_dir.path(), None);

    assert!(result.is_success(), "{}", result.message());
}

#[test]
fn test_success_message_names_both_paths() {
    let (temp_dir, source) = common::create_temp_png();

    let result = ConversionService::default().convert_file(&source, "png", &temp_dir.path().join("o"), None);

    let message = result.message();
    assert!(message.starts_with("OK: "));
    assert!(message.contains("photo.png ->"));
}

#[test]
fn test_gray_alpha_source_to_tiff_keeps_alpha() {
    let temp_dir = TempDir::new().unwrap();
    let layouts = common::pixel_layout_images();
    let (_, la8) = layouts.iter().find(|(label, _)| *label == "la8").unwrap();
    let source = common::write_png(temp_dir.path(), "mask.png", la8);

    let result = ConversionService::default().convert_file(&source, "tiff", temp_dir.path(), None);

    assert!(result.is_success(), "{}", result.message());
    let decoded = image::open(temp_dir.path().join("mask.tiff")).unwrap();
    assert_eq!(decoded.dimensions(), (12, 10));
    assert_eq!(decoded.color(), ColorType::Rgba8);

    let rgba = decoded.to_rgba8();
    assert_eq!(rgba.get_pixel(0, 0)[3], 0);
    assert_eq!(rgba.get_pixel(1, 0).0, [20, 20, 20, 255]);
}

#[test]
fn test_every_pixel_layout_converts_to_every_target() {
    let temp_dir = TempDir::new().unwrap();
    let service = ConversionService::default();
    let out_dir = temp_dir.path().join("out");
    let icon_sizes = IconSizes::squares(&[16, 32]);

    for (label, img) in common::pixel_layout_images() {
        let source = common::write_png(temp_dir.path(), &format!("{}.png", label), &img);

        for format in ["webp", "bmp", "tif", "tiff", "png", "jpg", "ico"] {
            let result = service.convert_file(&source, format, &out_dir, Some(&icon_sizes));
            assert!(
                result.is_success(),
                "{} -> {} failed: {}",
                label,
                format,
                result.message()
            );

            let destination = out_dir.join(format!("{}.{}", label, format));
            if format == "ico" {
                assert_eq!(common::ico_entry_sizes(&destination), vec![(16, 16), (32, 32)]);
            } else {
                let decoded = image::open(&destination).unwrap();
                assert_eq!(decoded.dimensions(), (12, 10), "{} -> {}", label, format);
            }
        }
    }
}

#[test]
fn test_failed_encode_keeps_existing_destination() {
    let temp_dir = TempDir::new().unwrap();
    // Wider than a WebP bitstream can describe
    let wide = GrayImage::from_pixel(16_385, 1, Luma([128]));
    wide.save_with_format(temp_dir.path().join("wide.png"), ImageFormat::Png)
        .unwrap();
    let existing = common::write_bytes(temp_dir.path(), "wide.webp", b"keep me");

    let result = ConversionService::default().convert_file(
        &temp_dir.path().join("wide.png"),
        "webp",
        temp_dir.path(),
        None,
    );

    assert!(!result.is_success());
    assert!(matches!(result.error(), Some(ConvertError::Image { .. })));
    assert_eq!(std::fs::read(&existing).unwrap(), b"keep me");
    assert_eq!(
        common::list_file_names(temp_dir.path()),
        vec!["wide.png", "wide.webp"],
        "No staged output should be left behind"
    );
}
