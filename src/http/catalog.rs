use std::sync::Arc;

use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::instrument;

use crate::domain::search::SearchQuery;
use crate::domain::{Product, Review};
use crate::product_actor::{ProductCreate, ProductError, ProductPatch};
use crate::review_actor::ReviewCreate;

use super::{ApiError, AppState, Envelope};

type ApiResult<T> = Result<Envelope<T>, ApiError>;

pub async fn list_products_handler(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Product>> {
    Ok(Envelope::ok(state.products.list_active_products().await?))
}

#[instrument(skip_all)]
pub async fn create_product_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ProductCreate>, JsonRejection>,
) -> ApiResult<Product> {
    let Json(payload) = payload?;
    let id = state.products.create_product(payload).await?;
    let product = state
        .products
        .get_product(id.clone())
        .await?
        .ok_or(ProductError::NotFound(id))?;
    Ok(Envelope::created(product))
}

pub async fn get_product_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Product> {
    let product = state
        .products
        .get_product(id.clone())
        .await?
        .ok_or(ProductError::NotFound(id))?;
    Ok(Envelope::ok(product))
}

#[instrument(skip(state, patch))]
pub async fn update_product_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    patch: Result<Json<ProductPatch>, JsonRejection>,
) -> ApiResult<Product> {
    let Json(patch) = patch?;
    Ok(Envelope::ok(state.products.update_product(id, patch).await?))
}

#[instrument(skip(state))]
pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Vec<Product>> {
    let Query(query) = query?;
    Ok(Envelope::page(state.products.search_products(query).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewFilter {
    product_id: Option<String>,
}

pub async fn list_reviews_handler(
    State(state): State<Arc<AppState>>,
    filter: Result<Query<ReviewFilter>, QueryRejection>,
) -> ApiResult<Vec<Review>> {
    let Query(filter) = filter?;
    let product_id = filter
        .product_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("productId is required".to_string()))?;
    Ok(Envelope::ok(state.reviews.reviews_for_product(product_id).await?))
}

#[instrument(skip_all)]
pub async fn add_review_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ReviewCreate>, JsonRejection>,
) -> ApiResult<Review> {
    let Json(payload) = payload?;
    Ok(Envelope::created(state.reviews.add_review(payload).await?))
}
