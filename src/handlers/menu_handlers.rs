use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::db::DbPool;
use crate::dto::{ApiResponse, MenuItemInput, StockUpdate};
use crate::errors::ApiError;
use crate::models::MenuItem;
use crate::repo;

/// Handler for `GET /api/menu`
#[instrument(skip(pool))]
pub async fn list_menu_handler(
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<ApiResponse<Vec<MenuItem>>>, ApiError> {
    debug!("Listing menu");
    let items = repo::list_menu_items(&pool)?;
    Ok(Json(ApiResponse::ok(items)))
}

/// Handler for `POST /api/menu`
#[instrument(skip(pool, payload), fields(name = %payload.name))]
pub async fn create_menu_item_handler(
    State(pool): State<Arc<DbPool>>,
    Json(payload): Json<MenuItemInput>,
) -> Result<Json<ApiResponse<MenuItem>>, ApiError> {
    payload.validate()?;
    let item = repo::create_menu_item(&pool, &payload)?;
    info!("Created menu item with id: {}", item.id);
    Ok(Json(ApiResponse::ok(item)))
}

/// Handler for `PUT /api/menu/{id}`
#[instrument(skip(pool, payload), fields(name = %payload.name))]
pub async fn update_menu_item_handler(
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
    Json(payload): Json<MenuItemInput>,
) -> Result<Json<ApiResponse<MenuItem>>, ApiError> {
    payload.validate()?;
    let item = repo::update_menu_item(&pool, id, &payload)?.ok_or(ApiError::NotFound("Menu item"))?;
    Ok(Json(ApiResponse::ok(item)))
}

/// Handler for `DELETE /api/menu/{id}`
#[instrument(skip(pool))]
pub async fn delete_menu_item_handler(
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    if !repo::delete_menu_item(&pool, id)? {
        return Err(ApiError::NotFound("Menu item"));
    }
    info!("Deleted menu item with id: {}", id);
    Ok(Json(ApiResponse::ok_empty()))
}

/// Handler for `PATCH /api/menu/{id}/stock`
///
/// The inline stock editor fires this on every change, so it validates the
/// bound the numeric input can't express: stock never goes negative.
#[instrument(skip(pool))]
pub async fn update_stock_handler(
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
    Json(payload): Json<StockUpdate>,
) -> Result<Json<ApiResponse<MenuItem>>, ApiError> {
    if payload.stock < 0 {
        return Err(ApiError::Validation("stock must not be negative".to_string()));
    }
    let item = repo::set_stock(&pool, id, payload.stock)?.ok_or(ApiError::NotFound("Menu item"))?;
    Ok(Json(ApiResponse::ok(item)))
}
