use std::net::SocketAddr;

use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use super::*;
use crate::app_system::Config;

async fn spawn_app() -> SocketAddr {
    let system = StoreSystem::new(&Config::default());
    let app = build_router(AppState::new(&system));
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

/// Sends one request over a fresh connection and returns the status, the raw
/// header block (lowercased) and the decoded JSON body.
async fn call(addr: SocketAddr, method: &str, path: &str, body: Option<Value>) -> (u16, String, Value) {
    let mut stream = tokio::net::TcpStream::connect(addr).await.expect("connect server");
    let payload = body.map(|b| b.to_string()).unwrap_or_default();
    let req = format!(
        "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\
         Content-Type: application/json\r\nContent-Length: {}\r\n\r\n{payload}",
        payload.len()
    );
    stream.write_all(req.as_bytes()).await.expect("write request");
    let mut response = String::new();
    stream.read_to_string(&mut response).await.expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response must have separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("http status");
    let value = if body.is_empty() { Value::Null } else { serde_json::from_str(body).expect("json body") };
    (status, head.to_ascii_lowercase(), value)
}

fn no_store(head: &str) -> bool {
    head.lines().any(|line| line.trim() == "cache-control: no-store")
}

async fn create_drone(addr: SocketAddr, name: &str, price: u64, stock: u32) -> String {
    let (status, _, body) = call(
        addr,
        "POST",
        "/api/products",
        Some(json!({ "name": name, "category": "Survey", "price": price, "stock": stock })),
    )
    .await;
    assert_eq!(status, 201, "{body}");
    body["data"]["id"].as_str().unwrap().to_string()
}

async fn create_save10(addr: SocketAddr, usage_limit: Option<u32>) {
    let now = Utc::now();
    let (status, _, body) = call(
        addr,
        "POST",
        "/api/coupons",
        Some(json!({
            "code": "save10",
            "discountType": "percentage",
            "discountValue": 10,
            "minOrderAmount": 50_000,
            "maxDiscount": 15_000,
            "usageLimit": usage_limit,
            "validFrom": (now - Duration::days(1)).to_rfc3339(),
            "validUntil": (now + Duration::days(30)).to_rfc3339(),
        })),
    )
    .await;
    assert_eq!(status, 201, "{body}");
    assert_eq!(body["data"]["code"], "SAVE10");
}

fn checkout_body(product_id: &str, price: u64, quantity: u32, coupon: Option<&str>) -> Value {
    json!({
        "customer": { "name": "Asha Rao", "email": "asha@example.com", "phone": "9800000000" },
        "shipping": { "address": "12 MG Road", "city": "Bengaluru", "state": "KA", "pincode": "560001" },
        "items": [{ "productId": product_id, "name": "Falcon X8", "price": price, "quantity": quantity }],
        "couponCode": coupon,
        "paymentMethod": "UPI",
    })
}

#[tokio::test]
async fn test_health() {
    let (status, _, body) = call(spawn_app().await, "GET", "/health", None).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "success": true, "data": "ok" }));
}

#[tokio::test]
async fn test_product_create_list_and_missing() {
    let addr = spawn_app().await;
    let id = create_drone(addr, "Falcon X8", 100_000, 5).await;

    let (status, _, body) = call(addr, "GET", "/api/products", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"][0]["id"], id.as_str());

    let (status, _, body) = call(addr, "GET", "/api/products/product_404", None).await;
    assert_eq!(status, 404);
    assert!(body["error"].as_str().unwrap().contains("product_404"));

    let (status, _, body) = call(addr, "POST", "/api/products", Some(json!({ "name": "No price" }))).await;
    assert_eq!(status, 400);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_coupon_validation_is_case_insensitive_and_uncached() {
    let addr = spawn_app().await;
    create_save10(addr, None).await;

    let (status, head, body) = call(addr, "GET", "/api/coupons?code=save10", None).await;
    assert_eq!(status, 200);
    assert!(no_store(&head), "{head}");
    assert_eq!(body["data"]["code"], "SAVE10");

    let (status, head, _) = call(addr, "GET", "/api/coupons?code=NOPE", None).await;
    assert_eq!(status, 404);
    assert!(no_store(&head), "{head}");

    let (status, _, _) = call(addr, "GET", "/api/coupons", None).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_deactivated_coupon_stops_validating() {
    let addr = spawn_app().await;
    create_save10(addr, None).await;

    let (status, _, body) = call(addr, "PATCH", "/api/coupons/save10", Some(json!({ "isActive": false }))).await;
    assert_eq!(status, 200, "{body}");
    assert_eq!(body["data"]["isActive"], false);

    let (status, _, _) = call(addr, "GET", "/api/coupons?code=SAVE10", None).await;
    assert_eq!(status, 404);

    let (status, _, _) = call(addr, "PATCH", "/api/coupons/NOPE", Some(json!({ "isActive": true }))).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_quote_applies_coupon_and_delivery() {
    let addr = spawn_app().await;
    let id = create_drone(addr, "Falcon X8", 100_000, 5).await;
    create_save10(addr, None).await;

    let (status, _, body) = call(
        addr,
        "POST",
        "/api/cart/quote",
        Some(json!({
            "items": [{ "productId": id, "name": "Falcon X8", "price": 100_000, "quantity": 2 }],
            "couponCode": "save10",
        })),
    )
    .await;
    assert_eq!(status, 200, "{body}");
    let totals = &body["data"]["totals"];
    assert_eq!(totals["subtotal"], 200_000);
    assert_eq!(totals["discount"], 15_000);
    assert_eq!(totals["deliveryCharge"], 0);
    assert_eq!(totals["total"], 185_000);
}

#[tokio::test]
async fn test_checkout_then_status_lifecycle() {
    let addr = spawn_app().await;
    let id = create_drone(addr, "Falcon X8", 100_000, 5).await;
    create_save10(addr, Some(1)).await;

    let (status, _, body) = call(addr, "POST", "/api/orders", Some(checkout_body(&id, 100_000, 2, Some("SAVE10")))).await;
    assert_eq!(status, 201, "{body}");
    let order_id = body["data"]["orderId"].as_str().unwrap().to_string();
    assert!(order_id.starts_with("ORD-"));
    assert_eq!(body["data"]["totalAmount"], 185_000);
    assert_eq!(body["data"]["orderStatus"], "Pending");

    // The single use is gone.
    let (status, _, body) = call(addr, "POST", "/api/orders", Some(checkout_body(&id, 100_000, 1, Some("SAVE10")))).await;
    assert_eq!(status, 400, "{body}");

    let uri = format!("/api/orders/{order_id}");
    let (status, _, _) = call(addr, "PATCH", &uri, Some(json!({ "orderStatus": "Delivered" }))).await;
    assert_eq!(status, 400);

    let (status, _, body) = call(addr, "PATCH", &uri, Some(json!({ "orderStatus": "Processing" }))).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["orderStatus"], "Processing");

    let (status, _, body) = call(addr, "GET", &format!("{uri}/timeline"), None).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["view"], "progress");
    assert_eq!(body["data"]["steps"][1]["current"], true);

    let (_, _, body) = call(addr, "GET", &format!("/api/products/{id}"), None).await;
    assert_eq!(body["data"]["stock"], 3);
}

#[tokio::test]
async fn test_checkout_rejects_stale_price() {
    let addr = spawn_app().await;
    let id = create_drone(addr, "Falcon X8", 100_000, 5).await;
    let (status, _, body) = call(addr, "POST", "/api/orders", Some(checkout_body(&id, 90_000, 1, None))).await;
    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("Price changed"));

    let (_, _, body) = call(addr, "GET", "/api/orders", None).await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_reviews_update_product_rating() {
    let addr = spawn_app().await;
    let id = create_drone(addr, "Falcon X8", 100_000, 5).await;
    for rating in [5, 4] {
        let (status, _, body) = call(
            addr,
            "POST",
            "/api/reviews",
            Some(json!({ "productId": id, "userName": "Ravi", "rating": rating, "comment": "Stable in wind" })),
        )
        .await;
        assert_eq!(status, 201, "{body}");
    }

    let (status, _, body) = call(addr, "GET", &format!("/api/reviews?productId={id}"), None).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (_, _, body) = call(addr, "GET", &format!("/api/products/{id}"), None).await;
    assert_eq!(body["data"]["rating"], 4.5);
    assert_eq!(body["data"]["reviews"], 2);

    let (status, _, _) = call(
        addr,
        "POST",
        "/api/reviews",
        Some(json!({ "productId": id, "userName": "Ravi", "rating": 6, "comment": "!" })),
    )
    .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_wishlist_add_duplicate_and_remove() {
    let addr = spawn_app().await;
    let id = create_drone(addr, "Falcon X8", 100_000, 5).await;
    let body = json!({ "userId": "u1", "productId": id });

    let (status, _, _) = call(addr, "POST", "/api/wishlist", Some(body.clone())).await;
    assert_eq!(status, 201);
    let (status, _, err) = call(addr, "POST", "/api/wishlist", Some(body)).await;
    assert_eq!(status, 400);
    assert!(err["error"].as_str().unwrap().contains("already in wishlist"));

    let (_, _, listed) = call(addr, "GET", "/api/wishlist?userId=u1", None).await;
    assert_eq!(listed["data"][0]["productName"], "Falcon X8");

    let uri = format!("/api/wishlist?userId=u1&productId={id}");
    let (status, _, _) = call(addr, "DELETE", &uri, None).await;
    assert_eq!(status, 200);
    let (status, _, _) = call(addr, "DELETE", &uri, None).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_search_paginates() {
    let addr = spawn_app().await;
    for n in 0..3 {
        create_drone(addr, &format!("Falcon {n}"), 100_000, 1).await;
    }
    let (status, _, body) = call(addr, "GET", "/api/search?q=falcon&limit=2&page=2", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["pagination"], json!({ "page": 2, "limit": 2, "total": 3, "pages": 2 }));
}

#[tokio::test]
async fn test_dashboard_window_bounds() {
    let addr = spawn_app().await;
    let (status, _, body) = call(addr, "GET", "/api/dashboard", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["windowDays"], 30);

    let (status, _, _) = call(addr, "GET", "/api/dashboard?days=0", None).await;
    assert_eq!(status, 400);
}
