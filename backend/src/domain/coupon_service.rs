//! Coupon issuance and redemption service.
//!
//! Redemption is a single conditional update on the coupon row. Concurrent
//! redeemers of one code race on that update; exactly one sees the row
//! change and the rest report the coupon as already used.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{
    CouponIssuance, CouponRedemption, CouponRepository, CouponRepositoryError, GeneratedCode,
    InvalidReason, IssueCouponRequest, IssuedCoupon, LocationRepository, LocationRepositoryError,
    RedeemCouponRequest, RedemptionOutcome, StoreRepository, StoreRepositoryError,
};
use crate::domain::{
    CodeGenerationError, CodeGenerator, Coupon, CouponCode, Error, Location, Redemption, Store,
    normalize_code_input,
};

pub(super) fn map_coupon_error(error: CouponRepositoryError) -> Error {
    match error {
        CouponRepositoryError::Connection { message } => {
            error!(%message, "coupon repository unavailable");
            Error::service_unavailable("coupon storage is unavailable")
        }
        CouponRepositoryError::Query { message } => {
            Error::internal(format!("coupon repository error: {message}"))
        }
        CouponRepositoryError::DuplicateCode { code } => {
            Error::conflict(format!("coupon code {code} has already been issued"))
        }
    }
}

pub(super) fn map_location_error(error: LocationRepositoryError) -> Error {
    match error {
        LocationRepositoryError::Connection { message } => {
            error!(%message, "location repository unavailable");
            Error::service_unavailable("location storage is unavailable")
        }
        LocationRepositoryError::Query { message } => {
            Error::internal(format!("location repository error: {message}"))
        }
        LocationRepositoryError::DuplicateSlug { slug } => {
            Error::conflict(format!("location slug {slug} is already taken"))
        }
    }
}

pub(super) fn map_store_error(error: StoreRepositoryError) -> Error {
    match error {
        StoreRepositoryError::Connection { message } => {
            error!(%message, "store repository unavailable");
            Error::service_unavailable("store storage is unavailable")
        }
        StoreRepositoryError::Query { message } => {
            Error::internal(format!("store repository error: {message}"))
        }
        StoreRepositoryError::DuplicateSlug { slug } => {
            Error::conflict(format!("store slug {slug} is already taken"))
        }
    }
}

fn map_generation_error(error: CodeGenerationError) -> Error {
    match error {
        CodeGenerationError::Repository(inner) => map_coupon_error(inner),
        CodeGenerationError::Exhausted { attempts } => {
            error!(attempts, "coupon code space exhausted");
            Error::service_unavailable("could not generate a unique coupon code, try again")
        }
    }
}

/// Domain service implementing [`CouponIssuance`] and [`CouponRedemption`].
#[derive(Clone)]
pub struct CouponService<C, L, S> {
    coupons: Arc<C>,
    locations: Arc<L>,
    stores: Arc<S>,
    generator: CodeGenerator,
    clock: Arc<dyn Clock>,
}

impl<C, L, S> CouponService<C, L, S> {
    pub fn new(
        coupons: Arc<C>,
        locations: Arc<L>,
        stores: Arc<S>,
        generator: CodeGenerator,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            coupons,
            locations,
            stores,
            generator,
            clock,
        }
    }
}

impl<C, L, S> CouponService<C, L, S>
where
    C: CouponRepository,
    L: LocationRepository,
    S: StoreRepository,
{
    async fn active_location(&self, slug: &str) -> Result<Location, Error> {
        self.locations
            .find_by_slug(slug.trim())
            .await
            .map_err(map_location_error)?
            .filter(|location| location.is_active)
            .ok_or_else(|| Error::not_found(format!("location {} not found", slug.trim())))
    }

    async fn active_store(&self, slug: &str) -> Result<Store, Error> {
        self.stores
            .find_by_slug(slug.trim())
            .await
            .map_err(map_store_error)?
            .filter(|store| store.is_active)
            .ok_or_else(|| Error::not_found(format!("store {} not found", slug.trim())))
    }

    async fn store_coupon(
        &self,
        location: Location,
        code: CouponCode,
    ) -> Result<IssuedCoupon, Error> {
        let coupon = Coupon::issue(code, location.id, self.clock.utc());
        self.coupons
            .insert(&coupon)
            .await
            .map_err(map_coupon_error)?;
        info!(code = %coupon.code(), location = %location.slug, "coupon issued");
        Ok(IssuedCoupon { coupon, location })
    }

    async fn already_used(
        &self,
        coupon: Coupon,
        redemption: Redemption,
    ) -> Result<RedemptionOutcome, Error> {
        let redeemed_by = self
            .stores
            .find_by_id(&redemption.store_id)
            .await
            .map_err(map_store_error)?;
        debug!(code = %coupon.code(), "coupon already used");
        Ok(RedemptionOutcome::AlreadyUsed {
            coupon,
            redeemed_by,
        })
    }
}

#[async_trait]
impl<C, L, S> CouponIssuance for CouponService<C, L, S>
where
    C: CouponRepository,
    L: LocationRepository,
    S: StoreRepository,
{
    async fn generate_code(&self, location_slug: &str) -> Result<GeneratedCode, Error> {
        let location = self.active_location(location_slug).await?;
        let code = self
            .generator
            .generate(self.coupons.as_ref())
            .await
            .map_err(map_generation_error)?;
        Ok(GeneratedCode { code, location })
    }

    async fn issue(&self, request: IssueCouponRequest) -> Result<IssuedCoupon, Error> {
        let code = CouponCode::parse(&request.code)
            .map_err(|err| Error::invalid_request(format!("invalid coupon code: {err}")))?;
        let location = self.active_location(&request.location_slug).await?;
        self.store_coupon(location, code).await
    }

    async fn issue_new(&self, location_slug: &str) -> Result<IssuedCoupon, Error> {
        let GeneratedCode { code, location } = self.generate_code(location_slug).await?;
        self.store_coupon(location, code).await
    }
}

#[async_trait]
impl<C, L, S> CouponRedemption for CouponService<C, L, S>
where
    C: CouponRepository,
    L: LocationRepository,
    S: StoreRepository,
{
    async fn redeem(&self, request: RedeemCouponRequest) -> Result<RedemptionOutcome, Error> {
        let normalised = normalize_code_input(&request.code);
        if normalised.is_empty() {
            return Err(Error::invalid_request("coupon code must not be empty"));
        }
        let Ok(code) = CouponCode::parse(&normalised) else {
            return Ok(RedemptionOutcome::Invalid {
                code: normalised,
                reason: InvalidReason::Malformed,
            });
        };

        let store = self.active_store(&request.store_slug).await?;
        let Some(coupon) = self
            .coupons
            .find_in_location(&code, &store.location_id)
            .await
            .map_err(map_coupon_error)?
        else {
            debug!(%code, store = %store.slug, "coupon not issued for store location");
            return Ok(RedemptionOutcome::Invalid {
                code: code.to_string(),
                reason: InvalidReason::NotIssuedHere,
            });
        };

        if let Some(redemption) = coupon.redemption() {
            return self.already_used(coupon, redemption).await;
        }

        let location = self
            .locations
            .find_by_id(&store.location_id)
            .await
            .map_err(map_location_error)?
            .ok_or_else(|| {
                Error::internal(format!("store {} references a missing location", store.slug))
            })?;

        let redemption = Redemption::at_store(store.id, self.clock.utc());
        let won = self
            .coupons
            .redeem_if_unused(&code, &store.location_id, &redemption)
            .await
            .map_err(map_coupon_error)?;

        if won {
            let mut coupon = coupon;
            coupon.redeem(redemption);
            info!(%code, store = %store.slug, "coupon redeemed");
            return Ok(RedemptionOutcome::Redeemed {
                coupon,
                location,
                store,
            });
        }

        warn!(%code, store = %store.slug, "lost redemption race");
        let latest = self
            .coupons
            .find_in_location(&code, &store.location_id)
            .await
            .map_err(map_coupon_error)?
            .unwrap_or(coupon);
        match latest.redemption() {
            Some(winner) => self.already_used(latest, winner).await,
            None => Ok(RedemptionOutcome::AlreadyUsed {
                coupon: latest,
                redeemed_by: None,
            }),
        }
    }
}

#[cfg(test)]
#[path = "coupon_service_tests.rs"]
mod tests;
