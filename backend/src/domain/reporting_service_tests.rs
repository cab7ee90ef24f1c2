//! Tests for coupon statistics and ledger lookups.

use std::sync::Arc;

use chrono::Duration;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    LocationTally, MockCouponRepository, MockLocationRepository, MockStoreRepository, StoreTally,
};
use crate::domain::service_test_helpers::{
    fixture_clock, fixture_timestamp, sample_coupon, sample_location, sample_store,
};
use crate::domain::{ErrorCode, Redemption};

struct Catalogue {
    gangnam: Location,
    jongno: Location,
    cafe: Store,
    bakery: Store,
}

#[fixture]
fn catalogue() -> Catalogue {
    let gangnam = sample_location("loc-gangnam", "Gangnam");
    let jongno = sample_location("loc-jongno", "Jongno");
    let cafe = sample_store("store-cafe-gangnam", "Cafe Gangnam", &gangnam);
    let bakery = sample_store("store-bakery-jongno", "Bakery Jongno", &jongno);
    Catalogue {
        gangnam,
        jongno,
        cafe,
        bakery,
    }
}

/// Three Gangnam coupons (one redeemed today, one issued yesterday) and one
/// unused Jongno coupon.
fn ledger(catalogue: &Catalogue) -> Vec<Coupon> {
    let yesterday = fixture_timestamp() - Duration::days(1);
    let mut redeemed = sample_coupon("AAAA1111", &catalogue.gangnam);
    redeemed.redeem(Redemption::at_store(catalogue.cafe.id, fixture_timestamp()));
    vec![
        redeemed,
        sample_coupon("BBBB2222", &catalogue.gangnam),
        Coupon::issue(
            CouponCode::parse("CCCC3333").expect("valid code"),
            catalogue.gangnam.id,
            yesterday,
        ),
        sample_coupon("DDDD4444", &catalogue.jongno),
    ]
}

fn counting_repo(coupons: Vec<Coupon>) -> MockCouponRepository {
    let mut repo = MockCouponRepository::new();
    repo.expect_count().returning(move |filter| {
        Ok(coupons.iter().filter(|coupon| filter.matches(coupon)).count() as u64)
    });
    repo
}

fn service(
    coupons: MockCouponRepository,
    locations: MockLocationRepository,
    stores: MockStoreRepository,
) -> CouponReportingService<MockCouponRepository, MockLocationRepository, MockStoreRepository>
{
    CouponReportingService::new(
        Arc::new(coupons),
        Arc::new(locations),
        Arc::new(stores),
        fixture_clock(),
    )
}

#[rstest]
fn start_of_day_truncates_to_utc_midnight() {
    let midnight = start_of_day(fixture_timestamp());
    assert_eq!(midnight.to_rfc3339(), "2026-03-01T00:00:00+00:00");
}

#[rstest]
#[tokio::test]
async fn system_stats_counts_everything(catalogue: Catalogue) {
    let mut locations = MockLocationRepository::new();
    locations.expect_count_active().returning(|| Ok(2));
    let mut stores = MockStoreRepository::new();
    stores.expect_count_active().returning(|| Ok(2));
    let service = service(counting_repo(ledger(&catalogue)), locations, stores);

    let stats = service.system_stats().await.expect("stats read");

    assert_eq!(
        stats,
        SystemStats {
            total_coupons: 4,
            used_coupons: 1,
            unused_coupons: 3,
            usage_rate: 25,
            active_locations: 2,
            active_stores: 2,
            today_issued: 3,
            today_used: 1,
        }
    );
}

#[rstest]
#[tokio::test]
async fn stats_are_stable_without_writes(catalogue: Catalogue) {
    let mut locations = MockLocationRepository::new();
    locations.expect_count_active().returning(|| Ok(2));
    let mut stores = MockStoreRepository::new();
    stores.expect_count_active().returning(|| Ok(2));
    let service = service(counting_repo(ledger(&catalogue)), locations, stores);

    let first = service.system_stats().await.expect("first read");
    let second = service.system_stats().await.expect("second read");

    assert_eq!(first, second);
}

#[rstest]
#[tokio::test]
async fn location_stats_scope_to_location(catalogue: Catalogue) {
    let mut locations = MockLocationRepository::new();
    let gangnam = catalogue.gangnam.clone();
    locations
        .expect_find_by_slug()
        .times(1)
        .return_once(move |_| Ok(Some(gangnam)));
    let service = service(
        counting_repo(ledger(&catalogue)),
        locations,
        MockStoreRepository::new(),
    );

    let stats = service
        .location_stats("loc-gangnam")
        .await
        .expect("stats read");

    assert_eq!((stats.total, stats.used, stats.unused), (3, 1, 2));
}

#[rstest]
#[tokio::test]
async fn store_stats_count_redemptions(catalogue: Catalogue) {
    let mut stores = MockStoreRepository::new();
    let cafe = catalogue.cafe.clone();
    stores
        .expect_find_by_slug()
        .times(1)
        .return_once(move |_| Ok(Some(cafe)));
    let service = service(
        counting_repo(ledger(&catalogue)),
        MockLocationRepository::new(),
        stores,
    );

    let stats = service
        .store_stats("store-cafe-gangnam")
        .await
        .expect("stats read");

    assert_eq!(stats.validated, 1);
}

#[rstest]
#[tokio::test]
async fn unknown_location_stats_are_not_found() {
    let mut locations = MockLocationRepository::new();
    locations
        .expect_find_by_slug()
        .times(1)
        .return_once(|_| Ok(None));
    let service = service(
        MockCouponRepository::new(),
        locations,
        MockStoreRepository::new(),
    );

    let error = service
        .location_stats("loc-nowhere")
        .await
        .expect_err("unknown location");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn usage_ranking_orders_by_rate(catalogue: Catalogue) {
    let mut coupons = MockCouponRepository::new();
    let (gangnam_id, jongno_id) = (catalogue.gangnam.id, catalogue.jongno.id);
    coupons.expect_tally_by_location().return_once(move || {
        Ok(vec![
            LocationTally {
                location_id: gangnam_id,
                total: 3,
                used: 1,
            },
            LocationTally {
                location_id: jongno_id,
                total: 2,
                used: 2,
            },
        ])
    });
    let mut locations = MockLocationRepository::new();
    let listed = vec![catalogue.gangnam.clone(), catalogue.jongno.clone()];
    locations
        .expect_list()
        .withf(|active_only| *active_only)
        .return_once(move |_| Ok(listed));
    let service = service(coupons, locations, MockStoreRepository::new());

    let ranking = service
        .location_usage_ranking()
        .await
        .expect("ranking read");

    let names: Vec<_> = ranking.iter().map(|row| row.location_name.as_str()).collect();
    assert_eq!(names, ["Jongno", "Gangnam"]);
    assert_eq!(ranking[0].usage_rate, 100);
    assert_eq!(ranking[1].usage_rate, 33);
}

#[rstest]
#[tokio::test]
async fn validation_ranking_includes_idle_stores(catalogue: Catalogue) {
    let mut coupons = MockCouponRepository::new();
    let cafe_id = catalogue.cafe.id;
    coupons.expect_tally_by_store().return_once(move || {
        Ok(vec![StoreTally {
            store_id: cafe_id,
            validated: 4,
        }])
    });
    let mut stores = MockStoreRepository::new();
    let listed = vec![catalogue.bakery.clone(), catalogue.cafe.clone()];
    stores.expect_list().return_once(move |_| Ok(listed));
    let service = service(coupons, MockLocationRepository::new(), stores);

    let ranking = service
        .store_validation_ranking()
        .await
        .expect("ranking read");

    let counts: Vec<_> = ranking
        .iter()
        .map(|row| (row.store_name.as_str(), row.validated))
        .collect();
    assert_eq!(counts, [("Cafe Gangnam", 4), ("Bakery Jongno", 0)]);
}

#[rstest]
#[tokio::test]
async fn coupon_details_resolve_location_and_store(catalogue: Catalogue) {
    let redeemed = ledger(&catalogue).remove(0);
    let mut coupons = MockCouponRepository::new();
    coupons
        .expect_find_by_code()
        .times(1)
        .return_once(move |_| Ok(Some(redeemed)));
    let mut locations = MockLocationRepository::new();
    let gangnam = catalogue.gangnam.clone();
    locations
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(gangnam)));
    let mut stores = MockStoreRepository::new();
    let cafe = catalogue.cafe.clone();
    stores
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(cafe)));
    let service = service(coupons, locations, stores);

    let details = service
        .coupon_details("aaaa1111")
        .await
        .expect("details read");

    assert_eq!(details.location.map(|l| l.slug), Some("loc-gangnam".to_owned()));
    assert_eq!(
        details.redeemed_by.map(|s| s.slug),
        Some("store-cafe-gangnam".to_owned())
    );
}

#[rstest]
#[tokio::test]
async fn recent_coupons_clamp_the_limit(catalogue: Catalogue) {
    let mut coupons = MockCouponRepository::new();
    let recent = ledger(&catalogue);
    coupons
        .expect_list_recent()
        .withf(|limit| *limit == 500)
        .times(1)
        .return_once(move |_| Ok(recent));
    let mut locations = MockLocationRepository::new();
    let listed = vec![catalogue.gangnam.clone(), catalogue.jongno.clone()];
    locations.expect_list().return_once(move |_| Ok(listed));
    let mut stores = MockStoreRepository::new();
    let listed = vec![catalogue.cafe.clone(), catalogue.bakery.clone()];
    stores.expect_list().return_once(move |_| Ok(listed));
    let service = service(coupons, locations, stores);

    let details = service
        .recent_coupons(10_000)
        .await
        .expect("recent coupons read");

    assert_eq!(details.len(), 4);
    assert_eq!(
        details[0].redeemed_by.as_ref().map(|s| s.id),
        Some(catalogue.cafe.id)
    );
    assert!(details[1].redeemed_by.is_none());
}
