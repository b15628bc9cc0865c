use std::sync::Arc;

use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::instrument;

use crate::domain::WishlistItem;

use super::{ApiError, AppState, Envelope};

type ApiResult<T> = Result<Envelope<T>, ApiError>;

/// `userId`/`productId` pair, taken from the query string or a JSON body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistParams {
    user_id: Option<String>,
    product_id: Option<String>,
}

fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::Validation(format!("{name} is required")))
}

pub async fn list_wishlist_handler(
    State(state): State<Arc<AppState>>,
    params: Result<Query<WishlistParams>, QueryRejection>,
) -> ApiResult<Vec<WishlistItem>> {
    let Query(params) = params?;
    let user_id = required(params.user_id, "userId")?;
    Ok(Envelope::ok(state.wishlist.items_for_user(user_id).await?))
}

#[instrument(skip_all)]
pub async fn add_wishlist_handler(
    State(state): State<Arc<AppState>>,
    params: Result<Json<WishlistParams>, JsonRejection>,
) -> ApiResult<WishlistItem> {
    let Json(params) = params?;
    let user_id = required(params.user_id, "userId")?;
    let product_id = required(params.product_id, "productId")?;
    Ok(Envelope::created(state.wishlist.add(user_id, product_id).await?))
}

#[instrument(skip_all)]
pub async fn remove_wishlist_handler(
    State(state): State<Arc<AppState>>,
    params: Result<Query<WishlistParams>, QueryRejection>,
) -> ApiResult<()> {
    let Query(params) = params?;
    let user_id = required(params.user_id, "userId")?;
    let product_id = required(params.product_id, "productId")?;
    state.wishlist.remove(user_id, product_id).await?;
    Ok(Envelope::ok(()))
}
