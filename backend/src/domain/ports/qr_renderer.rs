//! Port for rendering a coupon code as a scannable QR symbol.

use crate::domain::CouponCode;

use super::define_port_error;

define_port_error! {
    /// Errors raised by QR renderer adapters.
    pub enum QrRenderError {
        /// The payload could not be encoded.
        Encoding { message: String } =>
            "coupon code could not be encoded: {message}",
    }
}

/// Port for producing an SVG document that encodes the bare code.
#[cfg_attr(test, mockall::automock)]
pub trait QrRenderer: Send + Sync {
    fn render_svg(&self, code: &CouponCode) -> Result<String, QrRenderError>;
}
