//! `rqrr`-backed implementation of the `QrDecoder` port.

use image::GrayImage;
use image::imageops;
use tracing::debug;

use crate::domain::ports::{DecodeStrategy, DecodedSymbol, QrDecodeError, QrDecoder};

/// Both dimensions must exceed this before the centre crop is attempted.
const CROP_THRESHOLD_PX: u32 = 100;

/// Decoder that runs every [`DecodeStrategy`] in order over a greyscale copy
/// of the upload.
#[derive(Debug, Default, Clone, Copy)]
pub struct RqrrQrDecoder;

impl RqrrQrDecoder {
    pub fn new() -> Self {
        Self
    }
}

fn inverted(image: &GrayImage) -> GrayImage {
    let mut copy = image.clone();
    imageops::invert(&mut copy);
    copy
}

fn centre_crop(image: &GrayImage) -> Option<GrayImage> {
    let (width, height) = image.dimensions();
    if width <= CROP_THRESHOLD_PX || height <= CROP_THRESHOLD_PX {
        return None;
    }
    let cropped = imageops::crop_imm(image, width / 4, height / 4, width / 2, height / 2);
    Some(cropped.to_image())
}

/// Greyscale passes one strategy attempts, in order.
fn passes(strategy: DecodeStrategy, image: &GrayImage) -> Vec<GrayImage> {
    match strategy {
        DecodeStrategy::NoInvert => vec![image.clone()],
        DecodeStrategy::OnlyInvert => vec![inverted(image)],
        DecodeStrategy::Both => vec![image.clone(), inverted(image)],
        DecodeStrategy::CenterCrop => centre_crop(image)
            .map(|crop| {
                let flipped = inverted(&crop);
                vec![crop, flipped]
            })
            .unwrap_or_default(),
    }
}

fn scan(image: &GrayImage) -> Option<String> {
    let (width, height) = image.dimensions();
    let (Ok(width), Ok(height)) = (usize::try_from(width), usize::try_from(height)) else {
        return None;
    };
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(width, height, |x, y| {
        // Coordinates come from the bounds above, so they fit in u32.
        let x = u32::try_from(x).unwrap_or(u32::MAX);
        let y = u32::try_from(y).unwrap_or(u32::MAX);
        image.get_pixel_checked(x, y).map_or(u8::MAX, |pixel| pixel.0[0])
    });
    prepared
        .detect_grids()
        .into_iter()
        .find_map(|grid| grid.decode().ok().map(|(_, content)| content))
}

impl QrDecoder for RqrrQrDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedSymbol, QrDecodeError> {
        let image = image::load_from_memory(bytes)
            .map_err(|err| QrDecodeError::unreadable_image(err.to_string()))?
            .to_luma8();

        for strategy in DecodeStrategy::ORDERED {
            for pass in passes(strategy, &image) {
                if let Some(payload) = scan(&pass) {
                    debug!(%strategy, "decoded QR symbol");
                    return Ok(DecodedSymbol { payload, strategy });
                }
            }
        }
        Err(QrDecodeError::no_symbol_found())
    }
}

#[cfg(test)]
#[path = "rqrr_decoder_tests.rs"]
mod tests;
