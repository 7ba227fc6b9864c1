use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::{LineItems, Money, OrderLine, OrderStatus};
use crate::schema::orders;

/// Normalizes a stored time-of-day string to `HH:MM`
///
/// Old rows carry several shapes in the `time` column: `H:MM`, `HH:MM`,
/// `HH:MM:SS`, and full ISO timestamps. Everything funnels through here;
/// unrecognized values yield `None`.
pub fn normalize_time(raw: &str) -> Option<String> {
    let trimmed = raw.trim();

    // Full timestamp ("YYYY-MM-DDTHH:MM:SS" or with a space): take HH:MM
    if trimmed.len() >= 16 && matches!(trimmed.as_bytes()[10], b'T' | b' ') {
        if let Some(clock) = trimmed.get(11..16) {
            if clock.as_bytes().get(2) == Some(&b':') {
                return normalize_time(clock);
            }
        }
    }

    let (hours, minutes) = trimmed.split_once(':')?;
    let minutes = minutes.get(..2)?;
    if hours.is_empty() || hours.len() > 2 || !hours.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !minutes.bytes().all(|b| b.is_ascii_digit()) || minutes.len() != 2 {
        return None;
    }
    let h: u32 = hours.parse().ok()?;
    let m: u32 = minutes.parse().ok()?;
    if h > 23 || m > 59 {
        return None;
    }
    Some(format!("{:02}:{:02}", h, m))
}

/// Combines a creation timestamp and an optional time-of-day into the display
/// string `YYYY-MM-DD HH:MM` used everywhere an order datetime is shown
pub fn order_datetime(created_at: NaiveDateTime, time: Option<&str>) -> String {
    match time.and_then(normalize_time) {
        Some(clock) => format!("{} {}", created_at.date(), clock),
        None => created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

/// A row of the `orders` table, in its legacy Spanish column names
#[derive(Queryable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OrderRow {
    pub id: i32,
    pub nombre: String,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub items: LineItems,
    pub total: Money,
    pub status: OrderStatus,
    pub notas: Option<String>,
    pub time: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insert payload for the `orders` table
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = orders)]
pub struct NewOrder {
    pub nombre: String,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub items: LineItems,
    pub total: Money,
    pub status: OrderStatus,
    pub notas: Option<String>,
    pub time: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl NewOrder {
    /// Builds an insertable order from already-validated parts
    ///
    /// `time` is derived from the creation timestamp, so the time-of-day and
    /// the date component of `created_at` agree by construction.
    pub fn new(
        customer_name: String,
        customer_phone: Option<String>,
        customer_email: Option<String>,
        items: LineItems,
        status: OrderStatus,
        notes: Option<String>,
    ) -> Self {
        let now = Utc::now().naive_utc();
        let total = items.total();
        Self {
            nombre: customer_name,
            telefono: customer_phone,
            email: customer_email,
            items,
            total,
            status,
            notas: notes,
            time: Some(now.format("%H:%M").to_string()),
            created_at: now,
            updated_at: now,
        }
    }
}

/// An order as exposed by the API, with English field names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i32,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub items: Vec<OrderLine>,
    pub total: Money,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    /// Normalized `HH:MM`, falling back to the creation timestamp's clock
    pub time: Option<String>,
    /// Derived display string: creation date + normalized time
    pub order_datetime: String,
    pub updated_at: NaiveDateTime,
}

// The single declarative mapping between the Spanish schema and the English
// API model; time normalization happens exactly once, here.
impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        let time = row
            .time
            .as_deref()
            .and_then(normalize_time)
            .or_else(|| Some(row.created_at.format("%H:%M").to_string()));
        let order_datetime = order_datetime(row.created_at, row.time.as_deref());
        Order {
            id: row.id,
            customer_name: row.nombre,
            customer_phone: row.telefono,
            customer_email: row.email,
            items: row.items.0,
            total: row.total,
            status: row.status,
            notes: row.notas,
            created_at: row.created_at,
            time,
            order_datetime,
            updated_at: row.updated_at,
        }
    }
}
