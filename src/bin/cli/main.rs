mod client;
mod commands;
mod fetch_guard;
mod output;

use clap::{Parser, Subcommand};
use client::ComandaClient;
use comanda::config;
use output::{OutputConfig, OutputFormat};
use std::process;

/// CLI for the Comanda restaurant back-office
#[derive(Parser, Debug)]
#[clap(name = "comanda-cli", about = "CLI for the Comanda back-office")]
struct Cli {
    /// Server URL to connect to
    #[clap(long, env = "COMANDA_URL", global = true)]
    server_url: Option<String>,

    /// Output format
    #[clap(long, value_enum, default_value_t = OutputFormat::Human, global = true)]
    format: OutputFormat,

    /// Quiet mode: minimal output (just IDs or counts)
    #[clap(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage the menu
    #[command(subcommand)]
    Menu(commands::menu::MenuCommands),
    /// Manage kitchen orders
    #[command(subcommand)]
    Orders(commands::orders::OrderCommands),
    /// Manage table reservations
    #[command(subcommand)]
    Reservations(commands::reservations::ReservationCommands),
    /// Dashboard summary across all three sections
    Stats(commands::stats::StatsArgs),
}

/// Resolves the server URL from CLI args, config file, or defaults
///
/// Precedence: CLI flag / env var > config file > default
fn resolve_server_url(cli_url: Option<String>) -> String {
    if let Some(url) = cli_url {
        return url;
    }

    // Try reading from config file
    if let Some(dir) = config::get_config_dir_path() {
        let config_path = dir.join("config.toml");
        if let Ok(update) = config::config_from_file(Some(config_path)) {
            if let Some(url) = update.server_url {
                return url;
            }
        }
    }

    "http://localhost:3001".to_string()
}

/// Formats an error for human-readable stderr output
fn format_error(err: &dyn std::error::Error) -> String {
    let err_string = err.to_string();

    // ClientError::Request wraps reqwest errors - check for connection issues
    if err_string.contains("error sending request")
        || err_string.contains("connection refused")
        || err_string.contains("Connection refused")
        || err_string.contains("tcp connect error")
    {
        return format!(
            "Could not connect to server. Is comanda running?\n  {}",
            err_string
        );
    }

    // ClientError::Server already formats as "Server error (STATUS): message"
    // so we can return it directly
    err_string
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let server_url = resolve_server_url(cli.server_url);
    let client = ComandaClient::new(server_url);
    let output_config = OutputConfig {
        format: cli.format,
        quiet: cli.quiet,
    };
    let mut guard = fetch_guard::FetchGuard::default();

    let result = match cli.command {
        Commands::Menu(cmd) => {
            commands::menu::execute(&client, cmd, &output_config, &mut guard).await
        }
        Commands::Orders(cmd) => {
            commands::orders::execute(&client, cmd, &output_config, &mut guard).await
        }
        Commands::Reservations(cmd) => {
            commands::reservations::execute(&client, cmd, &output_config, &mut guard).await
        }
        Commands::Stats(args) => {
            commands::stats::execute(&client, args, &output_config, &mut guard).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", format_error(e.as_ref()));
        process::exit(1);
    }
}
