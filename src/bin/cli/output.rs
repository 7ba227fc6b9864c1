use clap::ValueEnum;
use comanda::dto::Availability;
use comanda::models::{MenuItem, Order, Reservation};
use serde::Serialize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Bundled output configuration passed to all print functions
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    /// The output format
    pub format: OutputFormat,
    /// When true, print minimal output (just IDs or counts)
    pub quiet: bool,
}

/// Maps the stored category slugs to their display headings
///
/// The database carries both singular and plural forms of each slug, so
/// both are accepted. Unknown categories fall back to "Otro".
pub fn category_label(category: &str) -> &'static str {
    match category.trim().to_lowercase().as_str() {
        "entrante" | "entrantes" => "Entrantes",
        "pescado" | "pescados" => "Pescados",
        "pasta" | "pastas" => "Pastas",
        "carne" | "carnes" => "Carnes",
        "postre" | "postres" => "Postres",
        _ => "Otro",
    }
}

/// Prints a list of menu items grouped by category
pub fn print_menu_items(items: &[MenuItem], config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if items.is_empty() {
                if !config.quiet {
                    println!("No menu items found.");
                }
                return;
            }
            if config.quiet {
                for item in items {
                    println!("{}", item.id);
                }
                return;
            }
            let labels = ["Entrantes", "Pescados", "Pastas", "Carnes", "Postres", "Otro"];
            for label in labels {
                let in_group: Vec<&MenuItem> = items
                    .iter()
                    .filter(|i| category_label(&i.category) == label)
                    .collect();
                if in_group.is_empty() {
                    continue;
                }
                println!("{}", label);
                for item in in_group {
                    let availability = if item.available {
                        format!("stock {}", item.stock)
                    } else {
                        "out of stock".to_string()
                    };
                    println!("  [{:>3}] {:<30} {:>8} €  ({})", item.id, item.name, item.price.to_string(), availability);
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(items).unwrap());
        }
    }
}

/// Prints a single menu item in the specified format
pub fn print_menu_item(item: &MenuItem, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", item.id);
                return;
            }
            println!("ID:          {}", item.id);
            println!("Name:        {}", item.name);
            println!("Category:    {}", category_label(&item.category));
            println!("Price:       {} €", item.price);
            println!("Stock:       {}", item.stock);
            println!("Available:   {}", if item.available { "yes" } else { "no" });
            println!("Description: {}", item.description);
            let mut flags = Vec::new();
            if item.vegetarian {
                flags.push("vegetarian");
            }
            if item.vegan {
                flags.push("vegan");
            }
            if item.gluten {
                flags.push("gluten");
            }
            if item.seafood {
                flags.push("seafood");
            }
            if item.dairy {
                flags.push("dairy");
            }
            println!("Flags:       {}", if flags.is_empty() { "-".to_string() } else { flags.join(", ") });
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(item).unwrap());
        }
    }
}

/// Prints a list of orders in the specified format
pub fn print_orders(orders: &[Order], config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if orders.is_empty() {
                if !config.quiet {
                    println!("No orders found.");
                }
                return;
            }
            if config.quiet {
                for order in orders {
                    println!("{}", order.id);
                }
                return;
            }
            let max_name = orders.iter().map(|o| o.customer_name.len()).max().unwrap_or(8);
            println!(
                "{:>4}  {:<name_w$}  {:>9}  {:<10}  WHEN",
                "ID",
                "CUSTOMER",
                "TOTAL",
                "STATUS",
                name_w = max_name,
            );
            for order in orders {
                println!(
                    "{:>4}  {:<name_w$}  {:>7} €  {:<10}  {}",
                    order.id,
                    order.customer_name,
                    order.total.to_string(),
                    order.status.to_string(),
                    order.order_datetime,
                    name_w = max_name,
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(orders).unwrap());
        }
    }
}

/// Prints a single order, including its lines
pub fn print_order(order: &Order, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", order.id);
                return;
            }
            println!("ID:       {}", order.id);
            println!("Customer: {}", order.customer_name);
            if let Some(phone) = &order.customer_phone {
                println!("Phone:    {}", phone);
            }
            if let Some(email) = &order.customer_email {
                println!("Email:    {}", email);
            }
            println!("Status:   {}", order.status);
            println!("When:     {}", order.order_datetime);
            if let Some(notes) = &order.notes {
                println!("Notes:    {}", notes);
            }
            println!("Items:");
            for line in &order.items {
                println!(
                    "  {:>2} x {:<30} {:>7} €  = {} €",
                    line.quantity,
                    line.name,
                    line.price.to_string(),
                    line.subtotal(),
                );
            }
            println!("Total:    {} €", order.total);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(order).unwrap());
        }
    }
}

/// Prints a list of reservations in the specified format
pub fn print_reservations(reservations: &[Reservation], config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if reservations.is_empty() {
                if !config.quiet {
                    println!("No reservations found.");
                }
                return;
            }
            if config.quiet {
                for reservation in reservations {
                    println!("{}", reservation.id);
                }
                return;
            }
            let max_name = reservations
                .iter()
                .map(|r| r.customer_name.len())
                .max()
                .unwrap_or(8);
            println!(
                "{:>4}  {:<name_w$}  {:<10}  {:<5}  {:>6}  {:<5}  STATUS",
                "ID",
                "CUSTOMER",
                "DATE",
                "TIME",
                "GUESTS",
                "TABLE",
                name_w = max_name,
            );
            for reservation in reservations {
                let table = reservation
                    .table_number
                    .map_or("-".to_string(), |t| t.to_string());
                println!(
                    "{:>4}  {:<name_w$}  {:<10}  {:<5}  {:>6}  {:<5}  {}",
                    reservation.id,
                    reservation.customer_name,
                    reservation.date,
                    reservation.time,
                    reservation.guests,
                    table,
                    reservation.status,
                    name_w = max_name,
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(reservations).unwrap());
        }
    }
}

/// Prints a single reservation in the specified format
pub fn print_reservation(reservation: &Reservation, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", reservation.id);
                return;
            }
            println!("ID:       {}", reservation.id);
            println!("Customer: {}", reservation.customer_name);
            println!("Phone:    {}", reservation.phone);
            println!("Date:     {}", reservation.date);
            println!("Time:     {}", reservation.time);
            println!("Guests:   {}", reservation.guests);
            if let Some(table) = reservation.table_number {
                println!("Table:    {}", table);
            }
            println!("Status:   {}", reservation.status);
            if let Some(notes) = &reservation.notes {
                println!("Notes:    {}", notes);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(reservation).unwrap());
        }
    }
}

/// Prints the availability check result
pub fn print_availability(availability: &Availability, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", availability.available);
                return;
            }
            println!(
                "{}: {}/{} confirmed, {}",
                availability.date,
                availability.confirmed,
                availability.capacity,
                if availability.available { "tables available" } else { "fully booked" },
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(availability).unwrap());
        }
    }
}

/// Menu section of the dashboard summary
#[derive(Debug, Serialize)]
pub struct MenuStats {
    pub total: usize,
    pub available: usize,
    pub out_of_stock: usize,
}

/// Order section of the dashboard summary
#[derive(Debug, Serialize)]
pub struct OrderStats {
    pub total: usize,
    pub active: usize,
}

/// Reservation section of the dashboard summary
#[derive(Debug, Serialize)]
pub struct ReservationStats {
    pub today_total: usize,
    pub today_confirmed: usize,
}

/// The dashboard summary across all three sections
///
/// Each section is filled independently; a failing endpoint leaves its
/// section as `None` and adds a line to `errors` instead of sinking the
/// whole summary.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub menu: Option<MenuStats>,
    pub orders: Option<OrderStats>,
    pub reservations: Option<ReservationStats>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Prints the dashboard summary in the specified format
pub fn print_stats(report: &StatsReport, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            match &report.menu {
                Some(menu) => println!(
                    "Menu:         {} items ({} available, {} out of stock)",
                    menu.total, menu.available, menu.out_of_stock
                ),
                None => println!("Menu:         unavailable"),
            }
            match &report.orders {
                Some(orders) => {
                    println!("Orders:       {} total ({} active)", orders.total, orders.active)
                }
                None => println!("Orders:       unavailable"),
            }
            match &report.reservations {
                Some(res) => println!(
                    "Reservations: {} today ({} confirmed)",
                    res.today_total, res.today_confirmed
                ),
                None => println!("Reservations: unavailable"),
            }
            for error in &report.errors {
                eprintln!("Warning: {}", error);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report).unwrap());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_label_known_slugs() {
        assert_eq!(category_label("entrante"), "Entrantes");
        assert_eq!(category_label("entrantes"), "Entrantes");
        assert_eq!(category_label("pescado"), "Pescados");
        assert_eq!(category_label("pasta"), "Pastas");
        assert_eq!(category_label("carnes"), "Carnes");
        assert_eq!(category_label("postre"), "Postres");
    }

    #[test]
    fn test_category_label_is_case_insensitive() {
        assert_eq!(category_label("Postres"), "Postres");
        assert_eq!(category_label(" ENTRANTE "), "Entrantes");
    }

    #[test]
    fn test_category_label_unknown_is_otro() {
        assert_eq!(category_label("bebida"), "Otro");
        assert_eq!(category_label(""), "Otro");
    }
}
