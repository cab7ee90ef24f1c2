//! Scan-and-redeem: decode a photographed QR symbol and redeem its code.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    CouponRedemption, QrDecodeError, QrDecoder, RedeemCouponRequest, ScanRedemption,
    ScanRedemptionRequest, ScanRedemptionResponse,
};
use crate::domain::{Error, TraceId, extract_code_candidate, looks_like_code};

/// Default upload limit: 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

fn map_decode_error(error: QrDecodeError) -> Error {
    match error {
        QrDecodeError::UnreadableImage { message } => {
            debug!(%message, "uploaded image could not be read");
            Error::invalid_request("image could not be read")
        }
        QrDecodeError::NoSymbolFound => {
            Error::invalid_request("no QR code found, retry with a clearer image")
        }
    }
}

/// Domain service implementing [`ScanRedemption`].
#[derive(Clone)]
pub struct RedemptionGateway<D, R> {
    decoder: Arc<D>,
    redemption: Arc<R>,
    max_upload_bytes: usize,
}

impl<D, R> RedemptionGateway<D, R> {
    pub fn new(decoder: Arc<D>, redemption: Arc<R>, max_upload_bytes: usize) -> Self {
        Self {
            decoder,
            redemption,
            max_upload_bytes,
        }
    }

    fn check_upload(&self, request: &ScanRedemptionRequest) -> Result<(), Error> {
        let is_image = request
            .content_type
            .as_deref()
            .is_some_and(|value| value.trim().to_ascii_lowercase().starts_with("image/"));
        if !is_image {
            return Err(Error::invalid_request("upload must be an image"));
        }
        if request.image.is_empty() {
            return Err(Error::invalid_request("image must not be empty"));
        }
        if request.image.len() > self.max_upload_bytes {
            return Err(Error::invalid_request(format!(
                "image exceeds the {} byte upload limit",
                self.max_upload_bytes
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl<D, R> ScanRedemption for RedemptionGateway<D, R>
where
    D: QrDecoder + 'static,
    R: CouponRedemption,
{
    async fn scan_and_redeem(
        &self,
        request: ScanRedemptionRequest,
    ) -> Result<ScanRedemptionResponse, Error> {
        self.check_upload(&request)?;

        let ScanRedemptionRequest {
            store_slug, image, ..
        } = request;
        let decoder = Arc::clone(&self.decoder);
        let decode = TraceId::propagate_blocking(move || decoder.decode(&image));
        let symbol = tokio::task::spawn_blocking(decode)
            .await
            .map_err(|err| Error::internal(format!("QR decode task failed: {err}")))?
            .map_err(map_decode_error)?;

        let decoded = extract_code_candidate(&symbol.payload);
        if looks_like_code(&decoded) {
            info!(strategy = %symbol.strategy, code = %decoded, "QR code decoded");
        } else {
            warn!(strategy = %symbol.strategy, candidate = %decoded, "decoded QR payload is not a coupon code");
        }

        let outcome = self
            .redemption
            .redeem(RedeemCouponRequest {
                store_slug,
                code: decoded.clone(),
            })
            .await?;

        Ok(ScanRedemptionResponse {
            decoded,
            strategy: symbol.strategy,
            outcome,
        })
    }
}

#[cfg(test)]
#[path = "redemption_gateway_tests.rs"]
mod tests;
