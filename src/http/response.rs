use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::search::{Page, Pagination};

/// `{ "success": true, "data": ..., "pagination"?: ... }`
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pagination: Option<Pagination>,
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data, pagination: None, status: StatusCode::OK }
    }

    pub fn created(data: T) -> Self {
        Self { status: StatusCode::CREATED, ..Self::ok(data) }
    }
}

impl<T: Serialize> Envelope<Vec<T>> {
    pub fn page(page: Page<T>) -> Self {
        Self { pagination: Some(page.pagination), ..Self::ok(page.items) }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
