//! Driving port for redeeming a coupon from a photo of its QR symbol.

use async_trait::async_trait;

use crate::domain::Error;

use super::{DecodeStrategy, RedemptionOutcome};

/// Uploaded photo to decode and redeem at a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRedemptionRequest {
    pub store_slug: String,
    pub content_type: Option<String>,
    pub image: Vec<u8>,
}

/// What the photo contained and what redeeming it did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRedemptionResponse {
    /// Candidate code extracted from the payload.
    pub decoded: String,
    pub strategy: DecodeStrategy,
    pub outcome: RedemptionOutcome,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScanRedemption: Send + Sync {
    async fn scan_and_redeem(
        &self,
        request: ScanRedemptionRequest,
    ) -> Result<ScanRedemptionResponse, Error>;
}
