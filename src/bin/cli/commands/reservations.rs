use chrono::{Local, NaiveDate};
use clap::Subcommand;
use comanda::dto::CreateReservationDto;
use std::time::Duration;

use crate::client::ComandaClient;
use crate::fetch_guard::{FetchGuard, Resource};
use crate::output::{self, OutputConfig};

/// Reservation management commands
#[derive(Subcommand, Debug)]
pub enum ReservationCommands {
    /// List reservations (today's by default)
    List {
        /// Only reservations on this date (YYYY-MM-DD)
        #[clap(long, conflicts_with = "all")]
        date: Option<NaiveDate>,
        /// List every reservation regardless of date
        #[clap(long)]
        all: bool,
        /// Refresh every N seconds instead of exiting
        #[clap(long, value_name = "SECONDS")]
        watch: Option<u64>,
    },
    /// Create a new reservation
    Create {
        /// Customer name
        #[clap(long)]
        customer: String,
        /// Customer phone number
        #[clap(long)]
        phone: String,
        /// Reservation date (YYYY-MM-DD)
        #[clap(long)]
        date: NaiveDate,
        /// Reservation time (HH:MM)
        #[clap(long)]
        time: String,
        /// Party size
        #[clap(long)]
        guests: i32,
        /// Table number, if already assigned
        #[clap(long)]
        table: Option<i32>,
        /// Notes for the staff
        #[clap(long)]
        notes: Option<String>,
    },
    /// Move a reservation to a new status
    Status {
        /// The reservation ID
        id: i32,
        /// One of: pending, confirmed, cancelled, completed
        status: String,
    },
    /// Delete a reservation
    Delete {
        /// The reservation ID
        id: i32,
    },
    /// Check remaining capacity for a date
    Availability {
        /// The date to check (defaults to today)
        date: Option<NaiveDate>,
    },
}

/// Executes a reservation command
pub async fn execute(
    client: &ComandaClient,
    cmd: ReservationCommands,
    config: &OutputConfig,
    guard: &mut FetchGuard,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ReservationCommands::List { date, all, watch } => {
            let filter = if all {
                None
            } else {
                Some(date.unwrap_or_else(|| Local::now().date_naive()))
            };
            match watch {
                Some(secs) => {
                    let mut ticker = tokio::time::interval(Duration::from_secs(secs.max(1)));
                    loop {
                        ticker.tick().await;
                        if guard.should_fetch(Resource::Reservations) {
                            let reservations = client.list_reservations(filter).await?;
                            output::print_reservations(&reservations, config);
                        }
                    }
                }
                None => {
                    let reservations = client.list_reservations(filter).await?;
                    output::print_reservations(&reservations, config);
                }
            }
        }
        ReservationCommands::Create {
            customer,
            phone,
            date,
            time,
            guests,
            table,
            notes,
        } => {
            let dto = CreateReservationDto {
                customer_name: customer,
                phone,
                date,
                time,
                guests,
                table_number: table,
                status: None,
                notes,
            };
            let reservation = client.create_reservation(&dto).await?;
            guard.invalidate(Resource::Reservations);
            output::print_reservation(&reservation, config);
        }
        ReservationCommands::Status { id, status } => {
            let reservation = client.update_reservation_status(id, &status).await?;
            guard.invalidate(Resource::Reservations);
            output::print_reservation(&reservation, config);
        }
        ReservationCommands::Delete { id } => {
            client.delete_reservation(id).await?;
            guard.invalidate(Resource::Reservations);
            if !config.quiet {
                println!("Deleted reservation {}", id);
            }
        }
        ReservationCommands::Availability { date } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let availability = client.availability(date).await?;
            output::print_availability(&availability, config);
        }
    }
    Ok(())
}
