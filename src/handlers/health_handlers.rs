use axum::{Json, extract::State};
use diesel::RunQueryDsl;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::db::DbPool;
use crate::dto::ApiResponse;
use crate::errors::ApiError;

/// Handler for `GET /api/health`
///
/// Liveness only; does not touch the database.
#[instrument]
pub async fn health_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::ok(serde_json::json!({ "status": "ok" })))
}

/// Handler for `GET /api/db-health`
///
/// Runs `SELECT 1` through the pool and reports which connection settings
/// the server was started with, mirroring what a reverse proxy health probe
/// wants to see.
#[instrument(skip(pool))]
pub async fn db_health_handler(
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let conn = &mut pool.get()?;
    diesel::sql_query("SELECT 1").execute(conn)?;
    debug!("Database reachable");

    Ok(Json(ApiResponse::ok(serde_json::json!({
        "status": "ok",
        "database_url_set": std::env::var("DATABASE_URL").is_ok(),
    }))))
}
