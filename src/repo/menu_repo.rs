use chrono::Utc;
use diesel::prelude::*;
use tracing::{debug, info, instrument};

use crate::db::DbPool;
use crate::dto::MenuItemInput;
use crate::errors::ApiError;
use crate::models::{MenuItem, MenuItemRow, NewMenuItem};
use crate::schema::menu;

/// Lists all menu items, ordered by id
#[instrument(skip(pool))]
pub fn list_menu_items(pool: &DbPool) -> Result<Vec<MenuItem>, ApiError> {
    let conn = &mut pool.get()?;
    let rows = menu::table.order(menu::id.asc()).load::<MenuItemRow>(conn)?;
    debug!("Loaded {} menu rows", rows.len());
    Ok(rows.into_iter().map(MenuItem::from).collect())
}

/// Retrieves a single menu item by id
#[instrument(skip(pool))]
pub fn get_menu_item(pool: &DbPool, item_id: i32) -> Result<Option<MenuItem>, ApiError> {
    let conn = &mut pool.get()?;
    let row = menu::table
        .find(item_id)
        .first::<MenuItemRow>(conn)
        .optional()?;
    Ok(row.map(MenuItem::from))
}

/// Inserts a new menu item and returns the stored row, mapped
#[instrument(skip(pool, input), fields(name = %input.name))]
pub fn create_menu_item(pool: &DbPool, input: &MenuItemInput) -> Result<MenuItem, ApiError> {
    let conn = &mut pool.get()?;
    let row: MenuItemRow = diesel::insert_into(menu::table)
        .values(NewMenuItem::from_input(input))
        .get_result(conn)?;
    info!("Created menu item {} ({})", row.id, row.nombre);
    Ok(row.into())
}

/// Replaces a menu item's fields (PUT semantics)
///
/// Returns `None` when no row with the given id exists.
#[instrument(skip(pool, input), fields(name = %input.name))]
pub fn update_menu_item(
    pool: &DbPool,
    item_id: i32,
    input: &MenuItemInput,
) -> Result<Option<MenuItem>, ApiError> {
    let conn = &mut pool.get()?;
    let row = diesel::update(menu::table.find(item_id))
        .set(NewMenuItem::from_input(input))
        .get_result::<MenuItemRow>(conn)
        .optional()?;
    if row.is_some() {
        info!("Updated menu item {}", item_id);
    }
    Ok(row.map(MenuItem::from))
}

/// Deletes a menu item, reporting whether a row was removed
#[instrument(skip(pool))]
pub fn delete_menu_item(pool: &DbPool, item_id: i32) -> Result<bool, ApiError> {
    let conn = &mut pool.get()?;
    let deleted = diesel::delete(menu::table.find(item_id)).execute(conn)?;
    if deleted > 0 {
        info!("Deleted menu item {}", item_id);
    }
    Ok(deleted > 0)
}

/// Sets a menu item's stock (the inline stock editor's endpoint)
///
/// The caller has already rejected negative values; this only touches the
/// stock and `updated_at` columns.
#[instrument(skip(pool))]
pub fn set_stock(pool: &DbPool, item_id: i32, stock: i32) -> Result<Option<MenuItem>, ApiError> {
    let conn = &mut pool.get()?;
    let row = diesel::update(menu::table.find(item_id))
        .set((menu::stock.eq(stock), menu::updated_at.eq(Utc::now().naive_utc())))
        .get_result::<MenuItemRow>(conn)
        .optional()?;
    if row.is_some() {
        info!("Set stock of menu item {} to {}", item_id, stock);
    }
    Ok(row.map(MenuItem::from))
}
