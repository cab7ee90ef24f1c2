//! Decoding of synthetic QR photos.

use std::io::Cursor;

use image::{ImageFormat, Luma};
use qrcode::{Color, QrCode};
use rstest::rstest;

use super::*;

const MODULE_PX: u32 = 8;
const QUIET_MODULES: u32 = 4;

/// Rasterise `payload` as a dark-on-light symbol with a quiet zone, placed
/// at module offset `margin` inside a light canvas.
fn symbol_image(payload: &str, margin: u32) -> GrayImage {
    let code = QrCode::new(payload.as_bytes()).expect("payload encodes");
    let modules = u32::try_from(code.width()).expect("width fits");
    let colours = code.to_colors();
    let offset = margin + QUIET_MODULES;
    let side = (modules + 2 * offset) * MODULE_PX;

    GrayImage::from_fn(side, side, |x, y| {
        let (mx, my) = (x / MODULE_PX, y / MODULE_PX);
        let inside = (offset..offset + modules).contains(&mx)
            && (offset..offset + modules).contains(&my);
        if !inside {
            return Luma([255]);
        }
        let index = usize::try_from((my - offset) * modules + (mx - offset)).expect("index fits");
        match colours[index] {
            Color::Dark => Luma([0]),
            Color::Light => Luma([255]),
        }
    })
}

fn png(image: &GrayImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("png encodes");
    bytes
}

#[rstest]
fn decodes_plain_symbol_without_inversion() {
    let bytes = png(&symbol_image("ZK8X2Q1B", 0));

    let symbol = RqrrQrDecoder::new().decode(&bytes).expect("decodes");

    assert_eq!(symbol.payload, "ZK8X2Q1B");
    assert_eq!(symbol.strategy, DecodeStrategy::NoInvert);
}

#[rstest]
fn decodes_light_on_dark_symbol_by_inverting() {
    let bytes = png(&inverted(&symbol_image("ZK8X2Q1B", 0)));

    let symbol = RqrrQrDecoder::new().decode(&bytes).expect("decodes");

    assert_eq!(symbol.payload, "ZK8X2Q1B");
}

#[rstest]
fn url_payloads_are_returned_verbatim() {
    let payload = "https://coupons.example/redeem/ZK8X2Q1B";
    let bytes = png(&symbol_image(payload, 0));

    let symbol = RqrrQrDecoder::new().decode(&bytes).expect("decodes");

    assert_eq!(symbol.payload, payload);
}

#[rstest]
fn blank_image_has_no_symbol() {
    let bytes = png(&GrayImage::from_pixel(240, 240, Luma([255])));

    let err = RqrrQrDecoder::new().decode(&bytes).expect_err("nothing to find");

    assert_eq!(err, QrDecodeError::no_symbol_found());
}

#[rstest]
fn non_image_bytes_are_unreadable() {
    let err = RqrrQrDecoder::new()
        .decode(b"definitely not a photo")
        .expect_err("not an image");

    assert!(matches!(err, QrDecodeError::UnreadableImage { .. }));
}

#[rstest]
#[case(100, 400, false)]
#[case(400, 100, false)]
#[case(101, 101, true)]
fn centre_crop_needs_both_dimensions_over_threshold(
    #[case] width: u32,
    #[case] height: u32,
    #[case] cropped: bool,
) {
    let image = GrayImage::new(width, height);
    assert_eq!(centre_crop(&image).is_some(), cropped);
}

#[rstest]
fn centre_crop_keeps_middle_half() {
    let image = GrayImage::new(400, 200);
    let crop = centre_crop(&image).expect("large enough");
    assert_eq!(crop.dimensions(), (200, 100));
}

#[rstest]
fn small_images_skip_the_crop_passes() {
    let image = GrayImage::new(80, 80);
    assert!(passes(DecodeStrategy::CenterCrop, &image).is_empty());
    assert_eq!(passes(DecodeStrategy::Both, &image).len(), 2);
}
