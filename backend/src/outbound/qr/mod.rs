//! QR outbound adapters.
//!
//! `rqrr` reads symbols out of uploaded photos and `qrcode` draws the SVG a
//! visitor keeps after issuance.

mod rqrr_decoder;
mod svg_renderer;

pub use rqrr_decoder::RqrrQrDecoder;
pub use svg_renderer::QrCodeSvgRenderer;
