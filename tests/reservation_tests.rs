/// Integration tests for the reservation endpoints
mod common;

use axum::http::StatusCode;
use common::{create_reservation, create_test_app, data, send_request};
use serde_json::json;

#[tokio::test]
async fn test_create_reservation_defaults_to_confirmed() {
    let mut app = create_test_app();

    let reservation = create_reservation(&mut app, "Marta", "2026-09-12").await;

    assert_eq!(reservation["customer_name"], "Marta");
    assert_eq!(reservation["date"], "2026-09-12");
    assert_eq!(reservation["time"], "21:00");
    assert_eq!(reservation["guests"], 2);
    assert_eq!(reservation["status"], "confirmed");
}

#[tokio::test]
async fn test_list_filters_by_date() {
    let mut app = create_test_app();

    create_reservation(&mut app, "Marta", "2026-09-12").await;
    create_reservation(&mut app, "Luis", "2026-09-13").await;

    let (status, body) =
        send_request(&mut app, "GET", "/api/reservations?date=2026-09-12", None).await;
    assert_eq!(status, StatusCode::OK);
    let reservations = data(&body).as_array().unwrap();
    assert_eq!(reservations.len(), 1);
    assert_eq!(reservations[0]["customer_name"], "Marta");

    let (_, body) = send_request(&mut app, "GET", "/api/reservations", None).await;
    assert_eq!(data(&body).as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_capacity_cap_rejects_eleventh_confirmed() {
    let mut app = create_test_app();

    for i in 0..10 {
        create_reservation(&mut app, &format!("Cliente {i}"), "2026-09-12").await;
    }

    let (status, body) = send_request(
        &mut app,
        "POST",
        "/api/reservations",
        Some(json!({
            "customer_name": "Uno más",
            "phone": "600111222",
            "date": "2026-09-12",
            "time": "21:30",
            "guests": 2,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    // A different date is unaffected
    create_reservation(&mut app, "Otro día", "2026-09-13").await;
}

#[tokio::test]
async fn test_capacity_cap_ignores_pending() {
    let mut app = create_test_app();

    for i in 0..10 {
        create_reservation(&mut app, &format!("Cliente {i}"), "2026-09-12").await;
    }

    // A pending reservation does not count against the cap
    let (status, body) = send_request(
        &mut app,
        "POST",
        "/api/reservations",
        Some(json!({
            "customer_name": "Lista de espera",
            "phone": "600111222",
            "date": "2026-09-12",
            "time": "21:30",
            "guests": 2,
            "status": "pending",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&body)["status"], "pending");
}

#[tokio::test]
async fn test_availability_endpoint() {
    let mut app = create_test_app();

    create_reservation(&mut app, "Marta", "2026-09-12").await;
    create_reservation(&mut app, "Luis", "2026-09-12").await;

    let (status, body) = send_request(
        &mut app,
        "GET",
        "/api/reservations/availability?date=2026-09-12",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let availability = data(&body);
    assert_eq!(availability["date"], "2026-09-12");
    assert_eq!(availability["confirmed"], 2);
    assert_eq!(availability["capacity"], 10);
    assert_eq!(availability["available"], true);
}

#[tokio::test]
async fn test_availability_reports_full_day() {
    let mut app = create_test_app();

    for i in 0..10 {
        create_reservation(&mut app, &format!("Cliente {i}"), "2026-09-12").await;
    }

    let (_, body) = send_request(
        &mut app,
        "GET",
        "/api/reservations/availability?date=2026-09-12",
        None,
    )
    .await;

    let availability = data(&body);
    assert_eq!(availability["confirmed"], 10);
    assert_eq!(availability["available"], false);
}

#[tokio::test]
async fn test_reservation_status_update() {
    let mut app = create_test_app();

    let reservation = create_reservation(&mut app, "Marta", "2026-09-12").await;
    let id = reservation["id"].as_i64().unwrap();

    let (status, body) = send_request(
        &mut app,
        "PATCH",
        &format!("/api/reservations/{id}/status"),
        Some(json!({"status": "completed"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&body)["status"], "completed");
}

#[tokio::test]
async fn test_reservation_invalid_status_is_400() {
    let mut app = create_test_app();

    let reservation = create_reservation(&mut app, "Marta", "2026-09-12").await;
    let id = reservation["id"].as_i64().unwrap();

    let (status, _) = send_request(
        &mut app,
        "PATCH",
        &format!("/api/reservations/{id}/status"),
        Some(json!({"status": "no-show"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reservation_status_missing_is_404() {
    let mut app = create_test_app();

    let (status, _) = send_request(
        &mut app,
        "PATCH",
        "/api/reservations/999/status",
        Some(json!({"status": "cancelled"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_reservation() {
    let mut app = create_test_app();

    let reservation = create_reservation(&mut app, "Marta", "2026-09-12").await;
    let id = reservation["id"].as_i64().unwrap();

    let (status, body) =
        send_request(&mut app, "DELETE", &format!("/api/reservations/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, body) = send_request(&mut app, "GET", "/api/reservations", None).await;
    assert!(data(&body).as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_missing_reservation_is_404() {
    let mut app = create_test_app();

    let (status, _) = send_request(&mut app, "DELETE", "/api/reservations/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_rejects_invalid_time() {
    let mut app = create_test_app();

    let (status, _) = send_request(
        &mut app,
        "POST",
        "/api/reservations",
        Some(json!({
            "customer_name": "Marta",
            "phone": "600111222",
            "date": "2026-09-12",
            "time": "late evening",
            "guests": 2,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_rejects_zero_guests() {
    let mut app = create_test_app();

    let (status, _) = send_request(
        &mut app,
        "POST",
        "/api/reservations",
        Some(json!({
            "customer_name": "Marta",
            "phone": "600111222",
            "date": "2026-09-12",
            "time": "21:00",
            "guests": 0,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
