use axum::{
    Json,
    extract::{Path, State},
};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::db::DbPool;
use crate::dto::{ApiResponse, CreateOrderDto, StatusUpdate};
use crate::errors::ApiError;
use crate::models::{Order, OrderStatus};
use crate::repo;

/// Handler for `GET /api/orders`
#[instrument(skip(pool))]
pub async fn list_orders_handler(
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<ApiResponse<Vec<Order>>>, ApiError> {
    debug!("Listing orders");
    let orders = repo::list_orders(&pool)?;
    Ok(Json(ApiResponse::ok(orders)))
}

/// Handler for `POST /api/orders`
///
/// Validates the cart, resolves the status (default `pending`), and hands
/// off to the transactional create in the repository.
#[instrument(skip(pool, payload), fields(customer = %payload.customer_name))]
pub async fn create_order_handler(
    State(pool): State<Arc<DbPool>>,
    Json(payload): Json<CreateOrderDto>,
) -> Result<Json<ApiResponse<Order>>, ApiError> {
    payload.validate()?;
    let status = match payload.status.as_deref() {
        Some(raw) => OrderStatus::from_str(raw)?,
        None => OrderStatus::Pending,
    };

    let order = repo::create_order(&pool, &payload, status)?;
    info!("Created order with id: {}", order.id);
    Ok(Json(ApiResponse::ok(order)))
}

/// Handler for `PATCH /api/orders/{id}/status`
#[instrument(skip(pool, payload))]
pub async fn update_order_status_handler(
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
    Json(payload): Json<StatusUpdate>,
) -> Result<Json<ApiResponse<Order>>, ApiError> {
    let status = OrderStatus::from_str(&payload.status)?;
    let order = repo::update_order_status(&pool, id, status)?.ok_or(ApiError::NotFound("Order"))?;
    Ok(Json(ApiResponse::ok(order)))
}
