use clap::Subcommand;
use comanda::dto::MenuItemInput;
use comanda::models::Money;
use std::time::Duration;

use crate::client::ComandaClient;
use crate::fetch_guard::{FetchGuard, Resource};
use crate::output::{self, OutputConfig};

/// Menu management commands
#[derive(Subcommand, Debug)]
pub enum MenuCommands {
    /// List all menu items, grouped by category
    List {
        /// Refresh every N seconds instead of exiting
        #[clap(long, value_name = "SECONDS")]
        watch: Option<u64>,
    },
    /// Add a new menu item
    Add {
        /// Name of the dish
        #[clap(long)]
        name: String,
        /// Price, e.g. "12.50" (a comma decimal separator also works)
        #[clap(long)]
        price: String,
        /// Category slug (entrante, pescado, pasta, carne, postre)
        #[clap(long)]
        category: String,
        /// Description / ingredients
        #[clap(long)]
        description: Option<String>,
        /// Initial stock level
        #[clap(long, default_value_t = 0)]
        stock: i32,
        /// Mark as vegetarian
        #[clap(long)]
        vegetarian: bool,
        /// Contains gluten
        #[clap(long)]
        gluten: bool,
        /// Contains seafood
        #[clap(long)]
        seafood: bool,
        /// Contains dairy
        #[clap(long)]
        dairy: bool,
        /// Mark as vegan
        #[clap(long)]
        vegan: bool,
    },
    /// Replace an existing menu item
    Update {
        /// The menu item ID
        id: i32,
        #[clap(long)]
        name: String,
        #[clap(long)]
        price: String,
        #[clap(long)]
        category: String,
        #[clap(long)]
        description: Option<String>,
        #[clap(long, default_value_t = 0)]
        stock: i32,
        #[clap(long)]
        vegetarian: bool,
        #[clap(long)]
        gluten: bool,
        #[clap(long)]
        seafood: bool,
        #[clap(long)]
        dairy: bool,
        #[clap(long)]
        vegan: bool,
    },
    /// Delete a menu item
    Delete {
        /// The menu item ID
        id: i32,
    },
    /// Set a menu item's stock level
    Stock {
        /// The menu item ID
        id: i32,
        /// The new stock level
        stock: i32,
    },
}

#[allow(clippy::too_many_arguments)]
fn build_input(
    name: String,
    price: String,
    category: String,
    description: Option<String>,
    stock: i32,
    vegetarian: bool,
    gluten: bool,
    seafood: bool,
    dairy: bool,
    vegan: bool,
) -> Result<MenuItemInput, Box<dyn std::error::Error>> {
    let price = Money::parse(&price).map_err(|e| format!("invalid price '{}': {}", price, e))?;
    Ok(MenuItemInput {
        name,
        description,
        ingredients: None,
        price,
        category,
        stock,
        vegetarian,
        gluten,
        seafood,
        dairy,
        vegan,
    })
}

/// Executes a menu command
pub async fn execute(
    client: &ComandaClient,
    cmd: MenuCommands,
    config: &OutputConfig,
    guard: &mut FetchGuard,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        MenuCommands::List { watch: Some(secs) } => {
            let mut ticker = tokio::time::interval(Duration::from_secs(secs.max(1)));
            loop {
                ticker.tick().await;
                if guard.should_fetch(Resource::Menu) {
                    let items = client.list_menu().await?;
                    output::print_menu_items(&items, config);
                }
            }
        }
        MenuCommands::List { watch: None } => {
            let items = client.list_menu().await?;
            output::print_menu_items(&items, config);
        }
        MenuCommands::Add {
            name,
            price,
            category,
            description,
            stock,
            vegetarian,
            gluten,
            seafood,
            dairy,
            vegan,
        } => {
            let input = build_input(
                name, price, category, description, stock, vegetarian, gluten, seafood, dairy,
                vegan,
            )?;
            let item = client.create_menu_item(&input).await?;
            guard.invalidate(Resource::Menu);
            output::print_menu_item(&item, config);
        }
        MenuCommands::Update {
            id,
            name,
            price,
            category,
            description,
            stock,
            vegetarian,
            gluten,
            seafood,
            dairy,
            vegan,
        } => {
            let input = build_input(
                name, price, category, description, stock, vegetarian, gluten, seafood, dairy,
                vegan,
            )?;
            let item = client.update_menu_item(id, &input).await?;
            guard.invalidate(Resource::Menu);
            output::print_menu_item(&item, config);
        }
        MenuCommands::Delete { id } => {
            client.delete_menu_item(id).await?;
            guard.invalidate(Resource::Menu);
            if !config.quiet {
                println!("Deleted menu item {}", id);
            }
        }
        MenuCommands::Stock { id, stock } => {
            let item = client.set_stock(id, stock).await?;
            guard.invalidate(Resource::Menu);
            output::print_menu_item(&item, config);
        }
    }
    Ok(())
}
