/// Comanda: Restaurant Back-Office Library
///
/// This library provides the core functionality for a restaurant
/// back-office service: menu management, kitchen orders, and table
/// reservations, persisted in SQLite and exposed over a REST API.
///
/// ### Modules
///
/// - `config`: Configuration loading (files, environment, CLI flags)
/// - `db`: Database connection management
/// - `dto`: Request payloads and the API response envelope
/// - `errors`: The `ApiError` type shared by handlers and repositories
/// - `handlers`: Axum request handlers
/// - `models`: Data structures for menu items, orders, and reservations
/// - `repo`: Repository layer for database operations
/// - `schema`: Database schema definitions
///
/// ### Web API
///
/// The library exposes a RESTful API using Axum with the following endpoints:
///
/// - `GET /api/health`: Liveness check
/// - `GET /api/db-health`: Database connectivity check
/// - `GET /api/menu` / `POST /api/menu`: List and create menu items
/// - `PUT /api/menu/{id}` / `DELETE /api/menu/{id}`: Update and delete a menu item
/// - `PATCH /api/menu/{id}/stock`: Set a menu item's stock level
/// - `GET /api/orders` / `POST /api/orders`: List and create orders
/// - `PATCH /api/orders/{id}/status`: Move an order through its lifecycle
/// - `GET /api/reservations` / `POST /api/reservations`: List and create reservations
/// - `GET /api/reservations/availability`: Remaining capacity for a date
/// - `PATCH /api/reservations/{id}/status` / `DELETE /api/reservations/{id}`
///
/// All responses use the `{ "success": bool, "data" | "error" }` envelope.

/// Configuration module
pub mod config;

/// Database connection module
pub mod db;

/// Request payloads and response envelope
pub mod dto;

/// API error type
pub mod errors;

/// Axum request handlers
pub mod handlers;

/// Data models module
pub mod models;

/// Repository module for database operations
pub mod repo;

/// Database schema module
pub mod schema;

use axum::{
    Router,
    routing::{delete, get, patch, put},
};
use std::sync::Arc;

use handlers::{
    availability_handler, create_menu_item_handler, create_order_handler,
    create_reservation_handler, db_health_handler, delete_menu_item_handler,
    delete_reservation_handler, health_handler, list_menu_handler, list_orders_handler,
    list_reservations_handler, update_menu_item_handler, update_order_status_handler,
    update_reservation_status_handler, update_stock_handler,
};

/// Creates the application router with all routes
///
/// ### Arguments
///
/// * `pool` - The database connection pool to be shared with all handlers
///
/// ### Returns
///
/// An Axum Router configured with all routes and the database pool as state
pub fn create_app(pool: Arc<db::DbPool>) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/db-health", get(db_health_handler))
        .route("/api/menu", get(list_menu_handler).post(create_menu_item_handler))
        .route(
            "/api/menu/{id}",
            put(update_menu_item_handler).delete(delete_menu_item_handler),
        )
        .route("/api/menu/{id}/stock", patch(update_stock_handler))
        .route("/api/orders", get(list_orders_handler).post(create_order_handler))
        .route("/api/orders/{id}/status", patch(update_order_status_handler))
        .route(
            "/api/reservations",
            get(list_reservations_handler).post(create_reservation_handler),
        )
        // Static segments take precedence over `{id}` in axum's router,
        // so this does not shadow the delete route below.
        .route("/api/reservations/availability", get(availability_handler))
        .route("/api/reservations/{id}", delete(delete_reservation_handler))
        .route(
            "/api/reservations/{id}/status",
            patch(update_reservation_status_handler),
        )
        .with_state(pool)
}

/// Runs the embedded migrations
///
/// Applies all pending database migrations. Called at server startup and
/// from test setup.
///
/// ### Panics
///
/// This function will panic if the migrations fail to run
pub fn run_migrations(conn: &mut diesel::SqliteConnection) {
    use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

    const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");
}
