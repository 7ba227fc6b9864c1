use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::InvalidStatus;

/// Errors surfaced by the REST layer
///
/// Infrastructure failures map to 500, missing resources to 404, rejected
/// input to 400, and invariant conflicts (stock, capacity) to 409. Every
/// error body uses the same envelope as success responses:
/// `{"success": false, "error": "..."}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    InvalidStatus(#[from] InvalidStatus),
    #[error("order references menu item {0}, which does not exist")]
    UnknownMenuItem(i32),
    #[error("insufficient stock for menu item {id}: requested {requested}, available {available}")]
    InsufficientStock {
        id: i32,
        requested: i32,
        available: i32,
    },
    #[error("no capacity left on {date}: {cap} confirmed reservations already exist")]
    CapacityFull { date: NaiveDate, cap: i64 },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::InvalidStatus(_) | ApiError::UnknownMenuItem(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::InsufficientStock { .. } | ApiError::CapacityFull { .. } => {
                StatusCode::CONFLICT
            }
        };

        let body = Json(serde_json::json!({
            "success": false,
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

// Let repository transactions use `?` on diesel and pool errors while keeping
// ApiError as the transaction error type.
impl From<diesel::result::Error> for ApiError {
    fn from(err: diesel::result::Error) -> Self {
        ApiError::Database(err.into())
    }
}

impl From<diesel::r2d2::PoolError> for ApiError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        ApiError::Database(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases: Vec<(ApiError, StatusCode)> = vec![
            (ApiError::NotFound("Order"), StatusCode::NOT_FOUND),
            (
                ApiError::Validation("price must not be negative".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::UnknownMenuItem(9), StatusCode::BAD_REQUEST),
            (
                ApiError::InsufficientStock { id: 1, requested: 3, available: 1 },
                StatusCode::CONFLICT,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(ApiError::NotFound("Reservation").to_string(), "Reservation not found");
    }
}
