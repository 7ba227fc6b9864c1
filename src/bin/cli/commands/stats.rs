use chrono::Local;
use clap::Args;
use comanda::models::ReservationStatus;

use crate::client::ComandaClient;
use crate::fetch_guard::{FetchGuard, Resource};
use crate::output::{self, MenuStats, OrderStats, OutputConfig, ReservationStats, StatsReport};

/// Arguments for the dashboard summary
#[derive(Args, Debug)]
pub struct StatsArgs {}

/// Executes the stats command
///
/// Each section is fetched independently so a failing endpoint degrades
/// that section instead of the whole summary.
pub async fn execute(
    client: &ComandaClient,
    _args: StatsArgs,
    config: &OutputConfig,
    guard: &mut FetchGuard,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut errors = Vec::new();
    let today = Local::now().date_naive();

    guard.should_fetch(Resource::Menu);
    let menu = match client.list_menu().await {
        Ok(items) => {
            let available = items.iter().filter(|i| i.available).count();
            Some(MenuStats {
                total: items.len(),
                available,
                out_of_stock: items.len() - available,
            })
        }
        Err(e) => {
            errors.push(format!("menu: {}", e));
            None
        }
    };

    guard.should_fetch(Resource::Orders);
    let orders = match client.list_orders().await {
        Ok(orders) => Some(OrderStats {
            total: orders.len(),
            active: orders.iter().filter(|o| o.status.is_active()).count(),
        }),
        Err(e) => {
            errors.push(format!("orders: {}", e));
            None
        }
    };

    guard.should_fetch(Resource::Reservations);
    let reservations = match client.list_reservations(Some(today)).await {
        Ok(reservations) => Some(ReservationStats {
            today_total: reservations.len(),
            today_confirmed: reservations
                .iter()
                .filter(|r| r.status == ReservationStatus::Confirmed)
                .count(),
        }),
        Err(e) => {
            errors.push(format!("reservations: {}", e));
            None
        }
    };

    let report = StatsReport {
        menu,
        orders,
        reservations,
        errors,
    };
    output::print_stats(&report, config);

    if report.menu.is_none() && report.orders.is_none() && report.reservations.is_none() {
        return Err("all sections failed".into());
    }
    Ok(())
}
