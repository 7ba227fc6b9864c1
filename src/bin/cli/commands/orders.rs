use clap::Subcommand;
use comanda::dto::{CreateOrderDto, OrderLineInput};
use std::time::Duration;

use crate::client::ComandaClient;
use crate::fetch_guard::{FetchGuard, Resource};
use crate::output::{self, OutputConfig};

/// Order management commands
#[derive(Subcommand, Debug)]
pub enum OrderCommands {
    /// List all orders, newest first
    List {
        /// Refresh every N seconds instead of exiting
        #[clap(long, value_name = "SECONDS")]
        watch: Option<u64>,
    },
    /// Create a new order
    Create {
        /// Customer name
        #[clap(long)]
        customer: String,
        /// Customer phone number
        #[clap(long)]
        phone: Option<String>,
        /// Customer email
        #[clap(long)]
        email: Option<String>,
        /// Order line as "menu_item_id:quantity", repeatable
        #[clap(long = "item", value_name = "ID:QTY", required = true)]
        items: Vec<String>,
        /// Kitchen notes
        #[clap(long)]
        notes: Option<String>,
    },
    /// Move an order to a new status
    Status {
        /// The order ID
        id: i32,
        /// One of: pending, preparing, ready, delivered, cancelled
        status: String,
    },
}

/// Parses an "id:quantity" order line argument
fn parse_line(raw: &str) -> Result<OrderLineInput, String> {
    let (id, quantity) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected ID:QTY, got '{}'", raw))?;
    let id = id
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("'{}' is not a valid menu item id", id))?;
    let quantity = quantity
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("'{}' is not a valid quantity", quantity))?;
    Ok(OrderLineInput {
        id,
        quantity,
        name: None,
        price: None,
    })
}

/// Executes an order command
pub async fn execute(
    client: &ComandaClient,
    cmd: OrderCommands,
    config: &OutputConfig,
    guard: &mut FetchGuard,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        OrderCommands::List { watch: Some(secs) } => {
            let mut ticker = tokio::time::interval(Duration::from_secs(secs.max(1)));
            loop {
                ticker.tick().await;
                if guard.should_fetch(Resource::Orders) {
                    let orders = client.list_orders().await?;
                    output::print_orders(&orders, config);
                }
            }
        }
        OrderCommands::List { watch: None } => {
            let orders = client.list_orders().await?;
            output::print_orders(&orders, config);
        }
        OrderCommands::Create {
            customer,
            phone,
            email,
            items,
            notes,
        } => {
            let items = items
                .iter()
                .map(|raw| parse_line(raw))
                .collect::<Result<Vec<_>, _>>()?;
            let dto = CreateOrderDto {
                customer_name: customer,
                customer_phone: phone,
                customer_email: email,
                items,
                total: None,
                status: None,
                notes,
            };
            let order = client.create_order(&dto).await?;
            guard.invalidate(Resource::Orders);
            // The kitchen reserved stock for this order
            guard.invalidate(Resource::Menu);
            output::print_order(&order, config);
        }
        OrderCommands::Status { id, status } => {
            let order = client.update_order_status(id, &status).await?;
            guard.invalidate(Resource::Orders);
            output::print_order(&order, config);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_valid() {
        let line = parse_line("3:2").unwrap();
        assert_eq!(line.id, 3);
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_parse_line_tolerates_spaces() {
        let line = parse_line(" 12 : 1 ").unwrap();
        assert_eq!(line.id, 12);
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn test_parse_line_rejects_missing_quantity() {
        assert!(parse_line("3").is_err());
        assert!(parse_line("3:").is_err());
        assert!(parse_line("a:b").is_err());
    }
}
