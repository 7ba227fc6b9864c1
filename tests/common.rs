/// Common test utilities for Comanda integration tests
///
/// Shared setup and helpers for all integration tests: building a test
/// application over an in-memory database, issuing requests, and creating
/// the usual fixture rows through the API.
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use comanda::{create_app, db::init_pool};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::Service;
use uuid::Uuid;

/// Creates a test application with an in-memory SQLite database
///
/// Each call gets its own uniquely-named shared-cache database, so the
/// pool's connections all see the same data while tests stay isolated
/// from each other.
pub fn create_test_app() -> Router {
    let database_url = format!("file:test_{}?mode=memory&cache=shared", Uuid::new_v4());
    let pool = Arc::new(init_pool(&database_url));

    let conn = &mut pool.get().unwrap();
    comanda::run_migrations(conn);

    create_app(pool)
}

/// Sends a JSON request and returns the status plus the parsed body
pub async fn send_request(
    app: &mut Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().uri(uri).method(method);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.call(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Unwraps the `data` field of a successful response envelope
pub fn data(body: &Value) -> &Value {
    assert_eq!(body["success"], true, "expected success envelope: {body}");
    &body["data"]
}

/// Creates a menu item via the API and returns its `data` object
pub async fn create_menu_item(app: &mut Router, name: &str, price: f64, stock: i32) -> Value {
    let (status, body) = send_request(
        app,
        "POST",
        "/api/menu",
        Some(json!({
            "name": name,
            "description": "test dish",
            "price": price,
            "category": "entrante",
            "stock": stock,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    data(&body).clone()
}

/// Creates an order via the API and returns its `data` object
///
/// `items` pairs are `(menu_item_id, quantity)`.
pub async fn create_order(app: &mut Router, customer: &str, items: &[(i64, i64)]) -> Value {
    let items: Vec<Value> = items
        .iter()
        .map(|(id, quantity)| json!({"id": id, "quantity": quantity}))
        .collect();
    let (status, body) = send_request(
        app,
        "POST",
        "/api/orders",
        Some(json!({
            "customer_name": customer,
            "items": items,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create_order failed: {body}");
    data(&body).clone()
}

/// Creates a reservation via the API and returns its `data` object
pub async fn create_reservation(app: &mut Router, customer: &str, date: &str) -> Value {
    let (status, body) = send_request(
        app,
        "POST",
        "/api/reservations",
        Some(json!({
            "customer_name": customer,
            "phone": "600111222",
            "date": date,
            "time": "21:00",
            "guests": 2,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create_reservation failed: {body}");
    data(&body).clone()
}
