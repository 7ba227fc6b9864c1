use chrono::Utc;
use diesel::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::db::DbPool;
use crate::dto::CreateOrderDto;
use crate::errors::ApiError;
use crate::models::{LineItems, NewOrder, Order, OrderLine, OrderRow, OrderStatus};
use crate::schema::{menu, orders};

/// Lists all orders, newest first
#[instrument(skip(pool))]
pub fn list_orders(pool: &DbPool) -> Result<Vec<Order>, ApiError> {
    let conn = &mut pool.get()?;
    let rows = orders::table
        .order((orders::created_at.desc(), orders::id.desc()))
        .load::<OrderRow>(conn)?;
    debug!("Loaded {} order rows", rows.len());
    Ok(rows.into_iter().map(Order::from).collect())
}

/// Creates an order inside one transaction
///
/// For every requested line the referenced menu row is loaded, its stock is
/// checked and decremented, and its current name and price are snapshotted
/// into the line item. The total is the sum of those stored prices; whatever
/// total the client computed is never trusted. Any failing line rolls back
/// the whole order, so stock can neither go negative nor leak on a rejected
/// order.
#[instrument(skip(pool, dto), fields(customer = %dto.customer_name, lines = dto.items.len()))]
pub fn create_order(
    pool: &DbPool,
    dto: &CreateOrderDto,
    status: OrderStatus,
) -> Result<Order, ApiError> {
    let conn = &mut pool.get()?;

    let row = conn.transaction::<OrderRow, ApiError, _>(|conn| {
        let now = Utc::now().naive_utc();
        let mut lines = Vec::with_capacity(dto.items.len());

        for requested in &dto.items {
            let item = menu::table
                .find(requested.id)
                .first::<crate::models::MenuItemRow>(conn)
                .optional()?
                .ok_or(ApiError::UnknownMenuItem(requested.id))?;

            if item.stock < requested.quantity {
                warn!(
                    "Rejecting order line: menu item {} has stock {}, requested {}",
                    item.id, item.stock, requested.quantity
                );
                return Err(ApiError::InsufficientStock {
                    id: item.id,
                    requested: requested.quantity,
                    available: item.stock,
                });
            }

            diesel::update(menu::table.find(item.id))
                .set((
                    menu::stock.eq(item.stock - requested.quantity),
                    menu::updated_at.eq(now),
                ))
                .execute(conn)?;

            lines.push(OrderLine {
                id: item.id,
                name: item.nombre,
                price: item.precio,
                quantity: requested.quantity,
            });
        }

        let new_order = NewOrder::new(
            dto.customer_name.clone(),
            dto.customer_phone.clone(),
            dto.customer_email.clone(),
            LineItems(lines),
            status,
            dto.notes.clone(),
        );

        let row: OrderRow = diesel::insert_into(orders::table)
            .values(new_order)
            .get_result(conn)?;
        Ok(row)
    })?;

    info!("Created order {} with total {}", row.id, row.total);
    Ok(row.into())
}

/// Updates an order's status
///
/// Returns `None` when no row with the given id exists.
#[instrument(skip(pool))]
pub fn update_order_status(
    pool: &DbPool,
    order_id: i32,
    status: OrderStatus,
) -> Result<Option<Order>, ApiError> {
    let conn = &mut pool.get()?;
    let row = diesel::update(orders::table.find(order_id))
        .set((
            orders::status.eq(status),
            orders::updated_at.eq(Utc::now().naive_utc()),
        ))
        .get_result::<OrderRow>(conn)
        .optional()?;
    if row.is_some() {
        info!("Order {} is now {}", order_id, status);
    }
    Ok(row.map(Order::from))
}
