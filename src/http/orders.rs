use std::sync::Arc;

use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Path, Query, State},
    http::header::CACHE_CONTROL,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::instrument;

use crate::clients::Quote;
use crate::coupon_actor::{CouponCreate, CouponError, CouponPatch};
use crate::domain::dashboard::DashboardSummary;
use crate::domain::tracker::Timeline;
use crate::domain::{CartItem, Coupon, Order, OrderStatusUpdate};
use crate::order_actor::{Checkout, OrderError};

use super::{ApiError, AppState, Envelope};

type ApiResult<T> = Result<Envelope<T>, ApiError>;

const DEFAULT_DASHBOARD_DAYS: i64 = 30;
const MAX_DASHBOARD_DAYS: i64 = 365;

#[derive(Debug, Deserialize)]
pub struct CouponLookup {
    code: Option<String>,
}

async fn validate_coupon(state: &AppState, lookup: CouponLookup) -> ApiResult<Coupon> {
    let code = lookup
        .code
        .filter(|code| !code.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("Coupon code is required".to_string()))?;
    Ok(Envelope::ok(state.coupons.validate(code, Utc::now()).await?))
}

/// Validation results must never be cached: usage counts move.
pub async fn validate_coupon_handler(
    State(state): State<Arc<AppState>>,
    lookup: Result<Query<CouponLookup>, QueryRejection>,
) -> impl IntoResponse {
    let result = match lookup {
        Ok(Query(lookup)) => validate_coupon(&state, lookup).await,
        Err(e) => Err(e.into()),
    };
    ([(CACHE_CONTROL, "no-store")], result)
}

#[instrument(skip_all)]
pub async fn create_coupon_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CouponCreate>, JsonRejection>,
) -> ApiResult<Coupon> {
    let Json(payload) = payload?;
    let code = state.coupons.create_coupon(payload).await?;
    let coupon = state
        .coupons
        .get_coupon(code.clone())
        .await?
        .ok_or(CouponError::NotFoundOrExpired(code))?;
    Ok(Envelope::created(coupon))
}

#[instrument(skip(state, patch))]
pub async fn update_coupon_handler(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    patch: Result<Json<CouponPatch>, JsonRejection>,
) -> ApiResult<Coupon> {
    let Json(patch) = patch?;
    Ok(Envelope::ok(state.coupons.update_coupon(code, patch).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    items: Vec<CartItem>,
    coupon_code: Option<String>,
}

#[instrument(skip_all)]
pub async fn quote_handler(
    State(state): State<Arc<AppState>>,
    request: Result<Json<QuoteRequest>, JsonRejection>,
) -> ApiResult<Quote> {
    let Json(request) = request?;
    let quote = state
        .orders
        .quote(&request.items, request.coupon_code, Utc::now())
        .await?;
    Ok(Envelope::ok(quote))
}

pub async fn list_orders_handler(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Order>> {
    Ok(Envelope::ok(state.orders.recent_orders().await?))
}

#[instrument(skip_all)]
pub async fn checkout_handler(
    State(state): State<Arc<AppState>>,
    checkout: Result<Json<Checkout>, JsonRejection>,
) -> ApiResult<Order> {
    let Json(checkout) = checkout?;
    Ok(Envelope::created(state.orders.create_order(checkout, Utc::now()).await?))
}

pub async fn get_order_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Order> {
    let order = state
        .orders
        .get_order(id.clone())
        .await?
        .ok_or(OrderError::NotFound(id))?;
    Ok(Envelope::ok(order))
}

#[instrument(skip(state, update))]
pub async fn update_order_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    update: Result<Json<OrderStatusUpdate>, JsonRejection>,
) -> ApiResult<Order> {
    let Json(update) = update?;
    Ok(Envelope::ok(state.orders.update_order_status(id, update, Utc::now()).await?))
}

pub async fn timeline_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Timeline> {
    Ok(Envelope::ok(state.orders.timeline(id).await?))
}

#[derive(Debug, Deserialize)]
pub struct DashboardWindow {
    days: Option<i64>,
}

pub async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    window: Result<Query<DashboardWindow>, QueryRejection>,
) -> ApiResult<DashboardSummary> {
    let Query(window) = window?;
    let days = window.days.unwrap_or(DEFAULT_DASHBOARD_DAYS);
    if !(1..=MAX_DASHBOARD_DAYS).contains(&days) {
        return Err(ApiError::Validation(format!("days must be between 1 and {MAX_DASHBOARD_DAYS}")));
    }
    Ok(Envelope::ok(state.orders.dashboard(Utc::now(), days).await?))
}
