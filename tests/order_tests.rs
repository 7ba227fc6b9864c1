/// Integration tests for the order endpoints
mod common;

use axum::http::StatusCode;
use common::{create_menu_item, create_order, create_test_app, data, send_request};
use serde_json::json;

#[tokio::test]
async fn test_create_order_computes_total_from_stored_prices() {
    let mut app = create_test_app();

    let croquetas = create_menu_item(&mut app, "Croquetas", 7.5, 10).await;
    let gazpacho = create_menu_item(&mut app, "Gazpacho", 5.0, 10).await;

    // The client claims a bogus total; the server must ignore it
    let (status, body) = send_request(
        &mut app,
        "POST",
        "/api/orders",
        Some(json!({
            "customer_name": "Luis",
            "items": [
                {"id": croquetas["id"], "quantity": 2},
                {"id": gazpacho["id"], "quantity": 1},
            ],
            "total": 0.01,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let order = data(&body);
    assert_eq!(order["total"], 20.0);
    assert_eq!(order["status"], "pending");
    assert_eq!(order["customer_name"], "Luis");

    // Line snapshots carry the stored name and price
    let items = order["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "Croquetas");
    assert_eq!(items[0]["price"], 7.5);
    assert_eq!(items[0]["quantity"], 2);
}

#[tokio::test]
async fn test_create_order_decrements_stock() {
    let mut app = create_test_app();

    let croquetas = create_menu_item(&mut app, "Croquetas", 7.5, 10).await;
    let id = croquetas["id"].as_i64().unwrap();

    create_order(&mut app, "Luis", &[(id, 4)]).await;

    let (_, body) = send_request(&mut app, "GET", "/api/menu", None).await;
    let items = data(&body).as_array().unwrap();
    assert_eq!(items[0]["stock"], 6);
}

#[tokio::test]
async fn test_insufficient_stock_is_409_and_rolls_back() {
    let mut app = create_test_app();

    let croquetas = create_menu_item(&mut app, "Croquetas", 7.5, 3).await;
    let gazpacho = create_menu_item(&mut app, "Gazpacho", 5.0, 10).await;

    let (status, body) = send_request(
        &mut app,
        "POST",
        "/api/orders",
        Some(json!({
            "customer_name": "Luis",
            "items": [
                {"id": gazpacho["id"], "quantity": 2},
                {"id": croquetas["id"], "quantity": 5},
            ],
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    // The gazpacho decrement from earlier in the transaction was rolled back
    let (_, body) = send_request(&mut app, "GET", "/api/menu", None).await;
    let items = data(&body).as_array().unwrap();
    assert_eq!(items[0]["stock"], 3);
    assert_eq!(items[1]["stock"], 10);

    // And no order was recorded
    let (_, body) = send_request(&mut app, "GET", "/api/orders", None).await;
    assert!(data(&body).as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_menu_item_is_400() {
    let mut app = create_test_app();

    let (status, body) = send_request(
        &mut app,
        "POST",
        "/api/orders",
        Some(json!({
            "customer_name": "Luis",
            "items": [{"id": 999, "quantity": 1}],
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_empty_cart_is_400() {
    let mut app = create_test_app();

    let (status, _) = send_request(
        &mut app,
        "POST",
        "/api/orders",
        Some(json!({"customer_name": "Luis", "items": []})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_zero_quantity_is_400() {
    let mut app = create_test_app();

    let croquetas = create_menu_item(&mut app, "Croquetas", 7.5, 10).await;

    let (status, _) = send_request(
        &mut app,
        "POST",
        "/api/orders",
        Some(json!({
            "customer_name": "Luis",
            "items": [{"id": croquetas["id"], "quantity": 0}],
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_status_transitions() {
    let mut app = create_test_app();

    let croquetas = create_menu_item(&mut app, "Croquetas", 7.5, 10).await;
    let order = create_order(&mut app, "Luis", &[(croquetas["id"].as_i64().unwrap(), 1)]).await;
    let id = order["id"].as_i64().unwrap();

    for status_name in ["preparing", "ready", "delivered", "cancelled", "pending"] {
        let (status, body) = send_request(
            &mut app,
            "PATCH",
            &format!("/api/orders/{id}/status"),
            Some(json!({"status": status_name})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(data(&body)["status"], status_name);
    }
}

#[tokio::test]
async fn test_invalid_status_is_400() {
    let mut app = create_test_app();

    let croquetas = create_menu_item(&mut app, "Croquetas", 7.5, 10).await;
    let order = create_order(&mut app, "Luis", &[(croquetas["id"].as_i64().unwrap(), 1)]).await;
    let id = order["id"].as_i64().unwrap();

    let (status, body) = send_request(
        &mut app,
        "PATCH",
        &format!("/api/orders/{id}/status"),
        Some(json!({"status": "eaten"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_status_update_missing_order_is_404() {
    let mut app = create_test_app();

    let (status, _) = send_request(
        &mut app,
        "PATCH",
        "/api/orders/999/status",
        Some(json!({"status": "ready"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_orders_list_newest_first() {
    let mut app = create_test_app();

    let croquetas = create_menu_item(&mut app, "Croquetas", 7.5, 10).await;
    let id = croquetas["id"].as_i64().unwrap();

    create_order(&mut app, "Primero", &[(id, 1)]).await;
    create_order(&mut app, "Segundo", &[(id, 1)]).await;

    let (_, body) = send_request(&mut app, "GET", "/api/orders", None).await;
    let orders = data(&body).as_array().unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["customer_name"], "Segundo");
    assert_eq!(orders[1]["customer_name"], "Primero");
}

#[tokio::test]
async fn test_order_time_is_derived_from_creation() {
    let mut app = create_test_app();

    let croquetas = create_menu_item(&mut app, "Croquetas", 7.5, 10).await;
    let order = create_order(&mut app, "Luis", &[(croquetas["id"].as_i64().unwrap(), 1)]).await;

    let time = order["time"].as_str().unwrap();
    assert_eq!(time.len(), 5, "expected HH:MM, got {time}");
    let order_datetime = order["order_datetime"].as_str().unwrap();
    assert!(
        order_datetime.ends_with(time),
        "order_datetime '{order_datetime}' should agree with time '{time}'"
    );
}
