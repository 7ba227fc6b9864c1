/// Repository module
///
/// The data access layer: one file per entity, functions that take the pool,
/// run Diesel queries against the legacy schema, and hand back the mapped
/// English models. Multi-statement invariants (stock decrement, the
/// reservation capacity cap) run inside transactions here.

mod menu_repo;
mod order_repo;
mod reservation_repo;

// Re-export all repository functions
pub use menu_repo::*;
pub use order_repo::*;
pub use reservation_repo::*;
