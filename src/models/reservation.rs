use chrono::{NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::ReservationStatus;
use crate::schema::reservations;

/// A row of the `reservations` table
///
/// This table predates the Spanish-named ones and mixes English names with
/// its own quirks: the party size lives in `people` and free-text notes in
/// `observations`.
#[derive(Queryable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = reservations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ReservationRow {
    pub id: i32,
    pub customer_name: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: String,
    pub people: i32,
    pub table_number: Option<i32>,
    pub status: ReservationStatus,
    pub google_event_id: Option<String>,
    pub observations: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insert payload for the `reservations` table
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = reservations)]
pub struct NewReservation {
    pub customer_name: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: String,
    pub people: i32,
    pub table_number: Option<i32>,
    pub status: ReservationStatus,
    pub google_event_id: Option<String>,
    pub observations: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl NewReservation {
    pub fn new(
        customer_name: String,
        phone: String,
        date: NaiveDate,
        time: String,
        guests: i32,
        table_number: Option<i32>,
        status: ReservationStatus,
        notes: Option<String>,
    ) -> Self {
        Self {
            customer_name,
            phone,
            date,
            time,
            people: guests,
            table_number,
            status,
            google_event_id: None,
            observations: notes,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

/// A reservation as exposed by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i32,
    pub customer_name: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: String,
    pub guests: i32,
    pub table_number: Option<i32>,
    pub status: ReservationStatus,
    pub google_event_id: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// The declarative mapping for the reservation quirks: `people` → `guests`,
// `observations` → `notes`. Time is normalized to HH:MM on the way out.
impl From<ReservationRow> for Reservation {
    fn from(row: ReservationRow) -> Self {
        let time = super::normalize_time(&row.time).unwrap_or(row.time);
        Reservation {
            id: row.id,
            customer_name: row.customer_name,
            phone: row.phone,
            date: row.date,
            time,
            guests: row.people,
            table_number: row.table_number,
            status: row.status,
            google_event_id: row.google_event_id,
            notes: row.observations,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
