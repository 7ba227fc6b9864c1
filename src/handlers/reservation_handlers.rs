use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::db::DbPool;
use crate::dto::{
    ApiResponse, Availability, AvailabilityQuery, CreateReservationDto, ReservationListQuery,
    StatusUpdate,
};
use crate::errors::ApiError;
use crate::models::{Reservation, ReservationStatus};
use crate::repo;

/// Handler for `GET /api/reservations`
///
/// Accepts an optional `?date=YYYY-MM-DD` filter, the admin screen's
/// day selector.
#[instrument(skip(pool))]
pub async fn list_reservations_handler(
    State(pool): State<Arc<DbPool>>,
    Query(query): Query<ReservationListQuery>,
) -> Result<Json<ApiResponse<Vec<Reservation>>>, ApiError> {
    debug!("Listing reservations");
    let reservations = repo::list_reservations(&pool, query.date)?;
    Ok(Json(ApiResponse::ok(reservations)))
}

/// Handler for `POST /api/reservations`
///
/// Walk-in bookings default to `confirmed`, which is also the status the
/// capacity cap applies to.
#[instrument(skip(pool, payload), fields(customer = %payload.customer_name, date = %payload.date))]
pub async fn create_reservation_handler(
    State(pool): State<Arc<DbPool>>,
    Json(payload): Json<CreateReservationDto>,
) -> Result<Json<ApiResponse<Reservation>>, ApiError> {
    payload.validate()?;
    let status = match payload.status.as_deref() {
        Some(raw) => ReservationStatus::from_str(raw)?,
        None => ReservationStatus::Confirmed,
    };

    let reservation = repo::create_reservation(&pool, &payload, status)?;
    info!("Created reservation with id: {}", reservation.id);
    Ok(Json(ApiResponse::ok(reservation)))
}

/// Handler for `PATCH /api/reservations/{id}/status`
#[instrument(skip(pool, payload))]
pub async fn update_reservation_status_handler(
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
    Json(payload): Json<StatusUpdate>,
) -> Result<Json<ApiResponse<Reservation>>, ApiError> {
    let status = ReservationStatus::from_str(&payload.status)?;
    let reservation =
        repo::update_reservation_status(&pool, id, status)?.ok_or(ApiError::NotFound("Reservation"))?;
    Ok(Json(ApiResponse::ok(reservation)))
}

/// Handler for `DELETE /api/reservations/{id}`
#[instrument(skip(pool))]
pub async fn delete_reservation_handler(
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    if !repo::delete_reservation(&pool, id)? {
        return Err(ApiError::NotFound("Reservation"));
    }
    info!("Deleted reservation with id: {}", id);
    Ok(Json(ApiResponse::ok_empty()))
}

/// Handler for `GET /api/reservations/availability`
#[instrument(skip(pool))]
pub async fn availability_handler(
    State(pool): State<Arc<DbPool>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<ApiResponse<Availability>>, ApiError> {
    let availability = repo::availability(&pool, query.date)?;
    Ok(Json(ApiResponse::ok(availability)))
}
