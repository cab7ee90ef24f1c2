//! `qrcode`-backed implementation of the `QrRenderer` port.

use qrcode::QrCode;
use qrcode::render::svg;

use crate::domain::CouponCode;
use crate::domain::ports::{QrRenderError, QrRenderer};

/// Smallest edge of the rendered symbol, quiet zone included.
const MIN_DIMENSION_PX: u32 = 200;

/// Renders the bare code so any phone camera reads it back verbatim.
#[derive(Debug, Default, Clone, Copy)]
pub struct QrCodeSvgRenderer;

impl QrCodeSvgRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl QrRenderer for QrCodeSvgRenderer {
    fn render_svg(&self, code: &CouponCode) -> Result<String, QrRenderError> {
        let symbol = QrCode::new(code.as_str().as_bytes())
            .map_err(|err| QrRenderError::encoding(err.to_string()))?;
        Ok(symbol
            .render::<svg::Color<'_>>()
            .min_dimensions(MIN_DIMENSION_PX, MIN_DIMENSION_PX)
            .build())
    }
}
