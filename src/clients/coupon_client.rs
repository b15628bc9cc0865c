use chrono::{DateTime, Utc};
use tracing::{debug, error, info, instrument};
use crate::domain::{normalize_code, Coupon};
use crate::coupon_actor::{CouponAction, CouponActionResult, CouponCreate, CouponError, CouponPatch};
use crate::actor_framework::{FrameworkError, ResourceClient};

/// Client for the Coupon actor. Codes are normalized before every lookup.
#[derive(Clone)]
pub struct CouponClient {
    inner: ResourceClient<Coupon>,
}

impl_basic_client!(CouponClient, Coupon, CouponError, coupon);

impl CouponClient {
    #[instrument(fields(code = %payload.code), skip(self, payload))]
    pub async fn create_coupon(&self, payload: CouponCreate) -> Result<String, CouponError> {
        debug!("Sending request");
        let code = self.inner.create(payload).await.map_err(FrameworkError::into_entity_error)?;
        info!(code = %code, "Coupon created");
        Ok(code)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_coupon(&self, code: String, patch: CouponPatch) -> Result<Coupon, CouponError> {
        debug!("Sending request");
        self.inner
            .update(normalize_code(&code), patch)
            .await
            .map_err(FrameworkError::into_entity_error)
    }

    /// Looks up `code` and checks it is redeemable at `now`. Does not consume a use.
    #[instrument(skip(self))]
    pub async fn validate(&self, code: String, now: DateTime<Utc>) -> Result<Coupon, CouponError> {
        let code = normalize_code(&code);
        let coupon = self
            .get_coupon(code.clone())
            .await?
            .ok_or_else(|| CouponError::NotFoundOrExpired(code))?;
        if let Err(e) = coupon.check_redeemable(now) {
            info!(reason = %e, "Coupon rejected");
            return Err(e);
        }
        info!(usage_count = coupon.usage_count, "Coupon valid");
        Ok(coupon)
    }

    /// Consumes one use of `code` if it is still redeemable at `now`.
    #[instrument(skip(self))]
    pub async fn redeem(&self, code: String, now: DateTime<Utc>) -> Result<u32, CouponError> {
        debug!("Sending request");
        match self.inner.perform_action(normalize_code(&code), CouponAction::Redeem { at: now }).await {
            Ok(CouponActionResult::Redeemed { usage_count }) => {
                info!(usage_count, "Coupon redeemed");
                Ok(usage_count)
            }
            Ok(other) => Err(CouponError::ActorCommunicationError(format!("Unexpected result: {other:?}"))),
            Err(e) => {
                let e = e.into_entity_error();
                error!(error = %e, "Coupon redemption failed");
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn restore(&self, code: String) -> Result<u32, CouponError> {
        debug!("Sending request");
        match self.inner.perform_action(normalize_code(&code), CouponAction::Restore).await {
            Ok(CouponActionResult::Restored { usage_count }) => Ok(usage_count),
            Ok(other) => Err(CouponError::ActorCommunicationError(format!("Unexpected result: {other:?}"))),
            Err(e) => Err(e.into_entity_error()),
        }
    }
}
