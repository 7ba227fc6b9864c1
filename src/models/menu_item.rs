use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::Money;
use crate::dto::MenuItemInput;
use crate::schema::menu;

/// Converts a legacy yes/no column value to a boolean
///
/// The dietary flags are stored as `si` / `no` strings (occasionally with the
/// accented `sí`), so anything that isn't an affirmative counts as `false`.
pub fn flag_to_bool(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "si" | "sí" | "yes" | "true" | "1")
}

/// Converts a boolean back to the stored yes/no form
pub fn bool_to_flag(value: bool) -> &'static str {
    if value { "si" } else { "no" }
}

/// A row of the `menu` table, in its legacy Spanish column names
#[derive(Queryable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = menu)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MenuItemRow {
    pub id: i32,
    pub nombre: String,
    pub categoria: String,
    pub precio: Money,
    pub stock: i32,
    pub vegetariano: String,
    pub gluten: String,
    pub marisco: String,
    pub lactosa: String,
    pub vegano: String,
    pub ingredientes: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insert / update payload for the `menu` table
///
/// `created_at` is left to the table default; `updated_at` is always set
/// explicitly so PUT and PATCH writes bump it.
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = menu)]
pub struct NewMenuItem {
    pub nombre: String,
    pub categoria: String,
    pub precio: Money,
    pub stock: i32,
    pub vegetariano: String,
    pub gluten: String,
    pub marisco: String,
    pub lactosa: String,
    pub vegano: String,
    pub ingredientes: String,
    pub updated_at: NaiveDateTime,
}

impl NewMenuItem {
    /// Translates the English API input into the Spanish column layout
    pub fn from_input(input: &MenuItemInput) -> Self {
        let description = input
            .description
            .clone()
            .or_else(|| input.ingredients.clone())
            .unwrap_or_default();
        Self {
            nombre: input.name.clone(),
            categoria: input.category.clone(),
            precio: input.price,
            stock: input.stock,
            vegetariano: bool_to_flag(input.vegetarian).to_string(),
            gluten: bool_to_flag(input.gluten).to_string(),
            marisco: bool_to_flag(input.seafood).to_string(),
            lactosa: bool_to_flag(input.dairy).to_string(),
            vegano: bool_to_flag(input.vegan).to_string(),
            ingredientes: description,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

/// A menu item as exposed by the API, with English field names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub category: String,
    pub stock: i32,
    /// Derived, never stored: a menu item is available while stock remains
    pub available: bool,
    pub vegetarian: bool,
    pub gluten: bool,
    pub seafood: bool,
    pub dairy: bool,
    pub vegan: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// The single declarative mapping between the Spanish schema and the English
// API model. Every read path goes through this conversion.
impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        MenuItem {
            id: row.id,
            name: row.nombre,
            description: row.ingredientes,
            price: row.precio,
            category: row.categoria,
            stock: row.stock,
            available: row.stock > 0,
            vegetarian: flag_to_bool(&row.vegetariano),
            gluten: flag_to_bool(&row.gluten),
            seafood: flag_to_bool(&row.marisco),
            dairy: flag_to_bool(&row.lactosa),
            vegan: flag_to_bool(&row.vegano),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
