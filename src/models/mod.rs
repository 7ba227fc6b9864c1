/// Data models module
///
/// Each entity has two shapes: a row struct bound to the legacy Spanish
/// column names in `schema.rs`, and the English-named API model the REST
/// layer serves. The `From<Row>` impls between them are the one and only
/// field-name translation in the codebase.

mod money;
pub use money::Money;

mod line_items;
pub use line_items::{LineItems, OrderLine};

mod status;
pub use status::{InvalidStatus, OrderStatus, ReservationStatus};

mod menu_item;
pub use menu_item::{MenuItem, MenuItemRow, NewMenuItem, bool_to_flag, flag_to_bool};

mod order;
pub use order::{NewOrder, Order, OrderRow, normalize_time, order_datetime};

mod reservation;
pub use reservation::{NewReservation, Reservation, ReservationRow};
