//! JSON API over the store clients.
//!
//! Handlers are stateless; every request goes through the actor clients held
//! in [`AppState`]. Responses use the `{ success, data, pagination? }`
//! envelope and failures the `{ error }` body of [`ApiError`].

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, patch, post},
    Router,
};
use tokio::{net::TcpListener, signal::ctrl_c};
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

mod catalog;
mod error;
mod orders;
mod response;
mod wishlist;

pub use error::ApiError;
pub use response::Envelope;

use crate::app_system::{StoreSystem, SystemError};
use crate::clients::{CouponClient, OrderClient, ProductClient, ReviewClient, WishlistClient};
use catalog::*;
use orders::*;
use wishlist::*;

pub struct AppState {
    pub products: ProductClient,
    pub coupons: CouponClient,
    pub orders: OrderClient,
    pub reviews: ReviewClient,
    pub wishlist: WishlistClient,
}

impl AppState {
    pub fn new(system: &StoreSystem) -> Arc<Self> {
        Arc::new(Self {
            products: system.product_client.clone(),
            coupons: system.coupon_client.clone(),
            orders: system.order_client.clone(),
            reviews: system.review_client.clone(),
            wishlist: system.wishlist_client.clone(),
        })
    }
}

async fn health_handler() -> Envelope<&'static str> {
    Envelope::ok("ok")
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/products", get(list_products_handler).post(create_product_handler))
        .route("/api/products/:id", get(get_product_handler).patch(update_product_handler))
        .route("/api/search", get(search_handler))
        .route("/api/reviews", get(list_reviews_handler).post(add_review_handler))
        .route("/api/coupons", get(validate_coupon_handler).post(create_coupon_handler))
        .route("/api/coupons/:code", patch(update_coupon_handler))
        .route("/api/cart/quote", post(quote_handler))
        .route("/api/orders", get(list_orders_handler).post(checkout_handler))
        .route("/api/orders/:id", get(get_order_handler).patch(update_order_handler))
        .route("/api/orders/:id/timeline", get(timeline_handler))
        .route("/api/dashboard", get(dashboard_handler))
        .route(
            "/api/wishlist",
            get(list_wishlist_handler)
                .post(add_wishlist_handler)
                .delete(remove_wishlist_handler),
        )
        .layer(cors)
        .with_state(state)
}

/// Serves until Ctrl+C or SIGTERM. The router, and with it every client
/// clone in the state, is dropped before this returns.
pub async fn serve(state: Arc<AppState>, port: u16) -> Result<(), SystemError> {
    let app = build_router(state);

    let address = format!("0.0.0.0:{port}");
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| SystemError::Bind { address: address.clone(), source })?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(SystemError::Serve)?;

    info!("Server shutting down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests;
