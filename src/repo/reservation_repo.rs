use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use tracing::{debug, info, instrument};

use crate::db::DbPool;
use crate::dto::{Availability, CreateReservationDto};
use crate::errors::ApiError;
use crate::models::{NewReservation, Reservation, ReservationRow, ReservationStatus, normalize_time};
use crate::schema::reservations;

/// How many confirmed reservations a single date can hold
pub const MAX_CONFIRMED_PER_DAY: i64 = 10;

/// Lists reservations, optionally restricted to one date
///
/// Ordered by date and time descending, the order the admin screen shows.
#[instrument(skip(pool))]
pub fn list_reservations(
    pool: &DbPool,
    date: Option<NaiveDate>,
) -> Result<Vec<Reservation>, ApiError> {
    let conn = &mut pool.get()?;
    let mut query = reservations::table.into_boxed();
    if let Some(date) = date {
        query = query.filter(reservations::date.eq(date));
    }
    let rows = query
        .order((reservations::date.desc(), reservations::time.desc()))
        .load::<ReservationRow>(conn)?;
    debug!("Loaded {} reservation rows", rows.len());
    Ok(rows.into_iter().map(Reservation::from).collect())
}

fn confirmed_count(conn: &mut SqliteConnection, date: NaiveDate) -> Result<i64, diesel::result::Error> {
    reservations::table
        .filter(reservations::date.eq(date))
        .filter(reservations::status.eq(ReservationStatus::Confirmed))
        .count()
        .get_result(conn)
}

/// Creates a reservation, enforcing the per-date capacity cap
///
/// The count-and-insert runs in one transaction so two concurrent confirmed
/// bookings cannot both squeeze under the cap.
#[instrument(skip(pool, dto), fields(customer = %dto.customer_name, date = %dto.date))]
pub fn create_reservation(
    pool: &DbPool,
    dto: &CreateReservationDto,
    status: ReservationStatus,
) -> Result<Reservation, ApiError> {
    let conn = &mut pool.get()?;

    let row = conn.transaction::<ReservationRow, ApiError, _>(|conn| {
        if status == ReservationStatus::Confirmed {
            let confirmed = confirmed_count(conn, dto.date)?;
            if confirmed >= MAX_CONFIRMED_PER_DAY {
                return Err(ApiError::CapacityFull {
                    date: dto.date,
                    cap: MAX_CONFIRMED_PER_DAY,
                });
            }
        }

        let time = normalize_time(&dto.time).unwrap_or_else(|| dto.time.clone());
        let new_reservation = NewReservation::new(
            dto.customer_name.clone(),
            dto.phone.clone(),
            dto.date,
            time,
            dto.guests,
            dto.table_number,
            status,
            dto.notes.clone(),
        );

        let row: ReservationRow = diesel::insert_into(reservations::table)
            .values(new_reservation)
            .get_result(conn)?;
        Ok(row)
    })?;

    info!("Created reservation {} on {} at {}", row.id, row.date, row.time);
    Ok(row.into())
}

/// Updates a reservation's status
///
/// Returns `None` when no row with the given id exists.
#[instrument(skip(pool))]
pub fn update_reservation_status(
    pool: &DbPool,
    reservation_id: i32,
    status: ReservationStatus,
) -> Result<Option<Reservation>, ApiError> {
    let conn = &mut pool.get()?;
    let row = diesel::update(reservations::table.find(reservation_id))
        .set((
            reservations::status.eq(status),
            reservations::updated_at.eq(Utc::now().naive_utc()),
        ))
        .get_result::<ReservationRow>(conn)
        .optional()?;
    if row.is_some() {
        info!("Reservation {} is now {}", reservation_id, status);
    }
    Ok(row.map(Reservation::from))
}

/// Deletes a reservation, reporting whether a row was removed
#[instrument(skip(pool))]
pub fn delete_reservation(pool: &DbPool, reservation_id: i32) -> Result<bool, ApiError> {
    let conn = &mut pool.get()?;
    let deleted = diesel::delete(reservations::table.find(reservation_id)).execute(conn)?;
    if deleted > 0 {
        info!("Deleted reservation {}", reservation_id);
    }
    Ok(deleted > 0)
}

/// Reports how much confirmed capacity remains on a date
#[instrument(skip(pool))]
pub fn availability(pool: &DbPool, date: NaiveDate) -> Result<Availability, ApiError> {
    let conn = &mut pool.get()?;
    let confirmed = confirmed_count(conn, date).map_err(ApiError::from)?;
    Ok(Availability {
        date,
        confirmed,
        capacity: MAX_CONFIRMED_PER_DAY,
        available: confirmed < MAX_CONFIRMED_PER_DAY,
    })
}
