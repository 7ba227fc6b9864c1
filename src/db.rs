use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::time::Duration;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Builds the connection pool used by the whole application.
///
/// The pool is bounded with fixed timeouts: at most 20 connections, a 30
/// second idle timeout, and a 2 second connection timeout.
pub fn init_pool(database_url: &str) -> DbPool {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(20)
        .idle_timeout(Some(Duration::from_secs(30)))
        .connection_timeout(Duration::from_secs(2))
        .build(manager)
        .expect("Failed to create pool.")
}
