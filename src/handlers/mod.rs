/// Web API Handlers
///
/// One file per entity plus the health endpoints. Handlers stay thin:
/// extract, validate the payload, call the repository, wrap the result in
/// the response envelope.

mod health_handlers;
mod menu_handlers;
mod order_handlers;
mod reservation_handlers;

// Re-export all handlers
pub use health_handlers::*;
pub use menu_handlers::*;
pub use order_handlers::*;
pub use reservation_handlers::*;
