//! Tests for scan-and-redeem.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{
    DecodeStrategy, DecodedSymbol, FixtureQrDecoder, InvalidReason, MockCouponRedemption,
    MockQrDecoder, RedemptionOutcome,
};

fn upload(content_type: Option<&str>, image: Vec<u8>) -> ScanRedemptionRequest {
    ScanRedemptionRequest {
        store_slug: "store-cafe-gangnam".to_owned(),
        content_type: content_type.map(str::to_owned),
        image,
    }
}

fn invalid(code: &str) -> RedemptionOutcome {
    RedemptionOutcome::Invalid {
        code: code.to_owned(),
        reason: InvalidReason::NotIssuedHere,
    }
}

#[rstest]
#[case(None)]
#[case(Some("application/pdf"))]
#[case(Some("text/plain"))]
#[tokio::test]
async fn non_image_uploads_are_rejected(#[case] content_type: Option<&str>) {
    let mut decoder = MockQrDecoder::new();
    decoder.expect_decode().times(0);
    let gateway = RedemptionGateway::new(
        Arc::new(decoder),
        Arc::new(MockCouponRedemption::new()),
        DEFAULT_MAX_UPLOAD_BYTES,
    );

    let error = gateway
        .scan_and_redeem(upload(content_type, vec![1, 2, 3]))
        .await
        .expect_err("not an image");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn oversized_uploads_are_rejected() {
    let mut decoder = MockQrDecoder::new();
    decoder.expect_decode().times(0);
    let gateway = RedemptionGateway::new(
        Arc::new(decoder),
        Arc::new(MockCouponRedemption::new()),
        4,
    );

    let error = gateway
        .scan_and_redeem(upload(Some("image/png"), vec![0; 5]))
        .await
        .expect_err("too large");

    assert!(error.message().contains("upload limit"));
}

#[rstest]
#[tokio::test]
async fn decoded_url_payload_is_redeemed_as_code() {
    let decoder = FixtureQrDecoder {
        payload: "https://coupons.example/c/zk8x2q1b?utm=print".to_owned(),
    };
    let mut redemption = MockCouponRedemption::new();
    redemption
        .expect_redeem()
        .withf(|request| request.code == "ZK8X2Q1B" && request.store_slug == "store-cafe-gangnam")
        .times(1)
        .return_once(|_| Ok(invalid("ZK8X2Q1B")));
    let gateway = RedemptionGateway::new(
        Arc::new(decoder),
        Arc::new(redemption),
        DEFAULT_MAX_UPLOAD_BYTES,
    );

    let response = gateway
        .scan_and_redeem(upload(Some("image/jpeg"), vec![0xff, 0xd8]))
        .await
        .expect("scan succeeds");

    assert_eq!(response.decoded, "ZK8X2Q1B");
    assert_eq!(response.strategy, DecodeStrategy::NoInvert);
}

#[rstest]
#[tokio::test]
async fn odd_payloads_still_reach_redemption() {
    let mut decoder = MockQrDecoder::new();
    decoder.expect_decode().times(1).return_once(|_| {
        Ok(DecodedSymbol {
            payload: "hello".to_owned(),
            strategy: DecodeStrategy::CenterCrop,
        })
    });
    let mut redemption = MockCouponRedemption::new();
    redemption
        .expect_redeem()
        .withf(|request| request.code == "HELLO")
        .times(1)
        .return_once(|_| {
            Ok(RedemptionOutcome::Invalid {
                code: "HELLO".to_owned(),
                reason: InvalidReason::Malformed,
            })
        });
    let gateway = RedemptionGateway::new(
        Arc::new(decoder),
        Arc::new(redemption),
        DEFAULT_MAX_UPLOAD_BYTES,
    );

    let response = gateway
        .scan_and_redeem(upload(Some("image/png"), vec![1]))
        .await
        .expect("scan succeeds");

    assert!(!response.outcome.is_valid());
}

#[rstest]
#[case(QrDecodeError::no_symbol_found(), "no QR code found")]
#[case(QrDecodeError::unreadable_image("bad magic"), "could not be read")]
#[tokio::test]
async fn decode_failures_are_user_facing(
    #[case] failure: QrDecodeError,
    #[case] expected: &str,
) {
    let mut decoder = MockQrDecoder::new();
    decoder
        .expect_decode()
        .times(1)
        .return_once(move |_| Err(failure));
    let mut redemption = MockCouponRedemption::new();
    redemption.expect_redeem().times(0);
    let gateway = RedemptionGateway::new(
        Arc::new(decoder),
        Arc::new(redemption),
        DEFAULT_MAX_UPLOAD_BYTES,
    );

    let error = gateway
        .scan_and_redeem(upload(Some("image/png"), vec![1]))
        .await
        .expect_err("decode fails");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert!(error.message().contains(expected));
}
