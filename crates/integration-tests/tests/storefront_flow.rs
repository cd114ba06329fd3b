//! End-to-end storefront flows driven through the axum router in-process.
//!
//! Each test builds a fresh application around the embedded seed catalog,
//! with no notification webhook and no Gemini client configured, then issues
//! plain HTTP requests via `tower::ServiceExt::oneshot`.

#![allow(clippy::unwrap_used)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use batra_creation_storefront::{app, catalog, config::StorefrontConfig, state::AppState};

/// Fresh application with the embedded seed catalog.
fn test_app() -> Router {
    let config = StorefrontConfig::for_tests();
    let catalog = catalog::load(None).expect("embedded catalog");
    let state = AppState::new(config, catalog).expect("app state");
    app(state)
}

/// Send one request and return status plus parsed JSON body (Null if empty).
async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json_body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json_body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(body)).await
}

/// Log in with the demo profile used across the tests.
async fn login(app: &Router) -> Value {
    let (status, body) = post(
        app,
        "/auth/login",
        json!({
            "name": "Demo User",
            "email": "demo@example.com",
            "shop_name": "My Fashion Store",
            "shop_address": "Jaipur, Rajasthan"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

fn complete_shipping() -> Value {
    json!({
        "full_name": "Demo User",
        "shop_name": "My Fashion Store",
        "address_line1": "Ganj Road",
        "city": "Khairthal",
        "state": "Rajasthan",
        "pincode": "301404",
        "phone": "9680465146"
    })
}

// ============================================================================
// Catalog & Contact
// ============================================================================

#[tokio::test]
async fn health_is_ok() {
    let app = test_app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn catalog_listing_and_detail() {
    let app = test_app();

    let (status, products) = get(&app, "/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(products.as_array().unwrap().len(), 11);

    let (status, dress) = get(&app, "/products/p8").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dress["name"], "White Chiffon Midi Dress");
    assert_eq!(dress["price"]["amount"], 165);
    assert_eq!(dress["min_order_quantity"], 50);

    let (status, _) = get(&app, "/products/p99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn contact_info_is_served() {
    let app = test_app();
    let (status, contact) = get(&app, "/contact").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(contact["phone"], "9680465146");
    assert_eq!(contact["email"], "batracreation2003@gmail.com");
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn first_add_seeds_moq_second_add_steps_by_one() {
    let app = test_app();

    let (status, cart) = post(&app, "/cart/add", json!({"product_id": "p8"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"][0]["quantity"], 50);

    let (_, cart) = post(&app, "/cart/add", json!({"product_id": "p8"})).await;
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
    assert_eq!(cart["items"][0]["quantity"], 51);
    assert_eq!(cart["total"], 8415);
    assert_eq!(cart["total_display"], "₹8415");
}

#[tokio::test]
async fn adding_unknown_product_is_not_found() {
    let app = test_app();
    let (status, _) = post(&app, "/cart/add", json!({"product_id": "p99"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn underflowing_decrement_leaves_line_unchanged() {
    let app = test_app();
    post(&app, "/cart/add", json!({"product_id": "p8"})).await;
    post(&app, "/cart/add", json!({"product_id": "p8"})).await;

    // 51 - 100 <= 0: rejected outright, not clamped.
    let (status, cart) =
        post(&app, "/cart/update", json!({"product_id": "p8", "delta": -100})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"][0]["quantity"], 51);
    assert_eq!(cart["total"], 8415);
}

#[tokio::test]
async fn huge_wire_delta_leaves_line_unchanged() {
    let app = test_app();
    post(&app, "/cart/add", json!({"product_id": "p8"})).await;

    let (status, cart) =
        post(&app, "/cart/update", json!({"product_id": "p8", "delta": i64::MAX})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"][0]["quantity"], 50);

    let (_, cart) =
        post(&app, "/cart/update", json!({"product_id": "p8", "delta": i64::MIN})).await;
    assert_eq!(cart["items"][0]["quantity"], 50);
}

#[tokio::test]
async fn decrement_stops_silently_at_quantity_one() {
    let app = test_app();
    post(&app, "/cart/add", json!({"product_id": "p8"})).await;

    let (_, cart) = post(&app, "/cart/update", json!({"product_id": "p8", "delta": -49})).await;
    assert_eq!(cart["items"][0]["quantity"], 1);

    // 1 - 1 = 0 is not > 0: the line stays at quantity 1.
    let (_, cart) = post(&app, "/cart/update", json!({"product_id": "p8", "delta": -1})).await;
    assert_eq!(cart["items"][0]["quantity"], 1);
}

#[tokio::test]
async fn remove_deletes_line_regardless_of_quantity() {
    let app = test_app();
    post(&app, "/cart/add", json!({"product_id": "p8"})).await;
    post(&app, "/cart/add", json!({"product_id": "p2"})).await;

    let (status, cart) = post(&app, "/cart/remove", json!({"product_id": "p8"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
    assert_eq!(cart["items"][0]["id"], "p2");

    let (_, count) = get(&app, "/cart/count").await;
    assert_eq!(count["count"], 50);
}

// ============================================================================
// Checkout
// ============================================================================

#[tokio::test]
async fn checkout_without_identity_redirects_and_touches_nothing() {
    let app = test_app();
    post(&app, "/cart/add", json!({"product_id": "p8"})).await;

    let (status, body) = post(&app, "/checkout", json!({})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["redirect_to"], "/auth/login");

    // Cart and ledger untouched.
    let (_, cart) = get(&app, "/cart").await;
    assert_eq!(cart["total"], 165 * 50);
    let (_, orders) = get(&app, "/orders").await;
    assert!(orders.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn login_preseeds_shipping_from_profile() {
    let app = test_app();
    let body = login(&app).await;
    assert_eq!(body["shipping"]["full_name"], "Demo User");
    assert_eq!(body["shipping"]["shop_name"], "My Fashion Store");
    assert_eq!(body["shipping"]["address_line1"], "Jaipur, Rajasthan");
    assert_eq!(body["shipping"]["city"], "");
}

#[tokio::test]
async fn full_checkout_flow_commits_and_clears() {
    let app = test_app();
    login(&app).await;
    post(&app, "/cart/add", json!({"product_id": "p8"})).await;
    post(&app, "/cart/add", json!({"product_id": "p8"})).await;

    let (status, checkout) = post(&app, "/checkout", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(checkout["total"], 8415);
    assert_eq!(checkout["shipping"]["full_name"], "Demo User");
    let token = checkout["checkout_token"].clone();

    let (status, placed) = post(
        &app,
        "/checkout/place",
        json!({
            "checkout_token": token,
            "shipping": complete_shipping(),
            "payment_method": "UPI"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(placed["order"]["total"], 8415);
    assert_eq!(placed["order"]["status"], "Pending");
    assert_eq!(placed["order"]["payment_method"], "UPI");
    assert_eq!(placed["order"]["items"][0]["quantity"], 51);

    let upi_link = placed["upi_payment_link"].as_str().unwrap();
    assert!(upi_link.starts_with("upi://pay?"));
    assert!(upi_link.contains("am=8415"));
    assert!(upi_link.contains("cu=INR"));

    let mailto = placed["notification_mailto"].as_str().unwrap();
    assert!(mailto.starts_with("mailto:orders@example.com?subject="));

    // Cart cleared; ledger holds exactly the new order, first.
    let (_, cart) = get(&app, "/cart").await;
    assert_eq!(cart["total"], 0);
    assert!(cart["items"].as_array().unwrap().is_empty());

    let (_, orders) = get(&app, "/orders").await;
    assert_eq!(orders.as_array().unwrap().len(), 1);
    assert_eq!(orders[0]["id"], placed["order"]["id"]);
}

#[tokio::test]
async fn net_banking_order_has_no_upi_link() {
    let app = test_app();
    login(&app).await;
    post(&app, "/cart/add", json!({"product_id": "p2"})).await;

    let (_, checkout) = post(&app, "/checkout", json!({})).await;
    let (status, placed) = post(
        &app,
        "/checkout/place",
        json!({
            "checkout_token": checkout["checkout_token"],
            "shipping": complete_shipping(),
            "payment_method": "NetBanking"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(placed["order"]["payment_method"], "NetBanking");
    assert!(placed.get("upi_payment_link").is_none());
}

#[tokio::test]
async fn replayed_token_is_a_conflict() {
    let app = test_app();
    login(&app).await;
    post(&app, "/cart/add", json!({"product_id": "p8"})).await;

    let (_, checkout) = post(&app, "/checkout", json!({})).await;
    let token = checkout["checkout_token"].clone();
    let place_body = json!({
        "checkout_token": token,
        "shipping": complete_shipping(),
        "payment_method": "UPI"
    });

    let (status, _) = post(&app, "/checkout/place", place_body.clone()).await;
    assert_eq!(status, StatusCode::OK);

    // Refill the cart and replay the consumed token.
    post(&app, "/cart/add", json!({"product_id": "p8"})).await;
    let (status, _) = post(&app, "/checkout/place", place_body).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, orders) = get(&app, "/orders").await;
    assert_eq!(orders.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn incomplete_shipping_is_rejected_at_the_boundary() {
    let app = test_app();
    login(&app).await;
    post(&app, "/cart/add", json!({"product_id": "p8"})).await;

    let (_, checkout) = post(&app, "/checkout", json!({})).await;
    let mut shipping = complete_shipping();
    shipping["pincode"] = json!("");

    let (status, body) = post(
        &app,
        "/checkout/place",
        json!({
            "checkout_token": checkout["checkout_token"],
            "shipping": shipping,
            "payment_method": "UPI"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["missing_fields"], json!(["pincode"]));

    // Nothing committed, cart intact.
    let (_, orders) = get(&app, "/orders").await;
    assert!(orders.as_array().unwrap().is_empty());
    let (_, cart) = get(&app, "/cart").await;
    assert_eq!(cart["total"], 8250);
}

#[tokio::test]
async fn logout_keeps_order_history_but_blocks_checkout() {
    let app = test_app();
    login(&app).await;
    post(&app, "/cart/add", json!({"product_id": "p8"})).await;
    let (_, checkout) = post(&app, "/checkout", json!({})).await;
    post(
        &app,
        "/checkout/place",
        json!({
            "checkout_token": checkout["checkout_token"],
            "shipping": complete_shipping(),
            "payment_method": "UPI"
        }),
    )
    .await;

    let (status, _) = post(&app, "/auth/logout", json!({})).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, orders) = get(&app, "/orders").await;
    assert_eq!(orders.as_array().unwrap().len(), 1);

    let (status, _) = post(&app, "/checkout", json!({})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Analysis
// ============================================================================

#[tokio::test]
async fn analysis_without_api_key_is_unavailable() {
    let app = test_app();
    let (status, _) = post(&app, "/analysis", json!({"image_base64": "aGVsbG8="})).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn analysis_rejects_empty_image() {
    let app = test_app();
    let (status, _) = post(&app, "/analysis", json!({"image_base64": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
