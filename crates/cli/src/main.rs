//! Shopping cart CLI - drive the cart widget from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List products for the configured query (or a custom one)
//! cart browse
//! cart browse --query notebook
//!
//! # Look up an item and add it to the cart
//! cart add MLB1234567890
//!
//! # Remove every line with a sku, or empty the cart
//! cart remove MLB1234567890
//! cart empty
//!
//! # Show the cart and its total
//! cart show
//! ```
//!
//! The cart is kept in `CART_STORAGE_DIR` between invocations. See
//! `shopping_cart_widget::config` for every environment variable.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use shopping_cart_core::Sku;
use shopping_cart_widget::WidgetConfig;
use shopping_cart_widget::telemetry::init_tracing;

mod commands;

#[derive(Parser)]
#[command(name = "cart")]
#[command(author, version, about = "Shopping cart widget CLI")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog and show the product list
    Browse {
        /// Search query (defaults to `CART_SEARCH_QUERY`)
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Look up an item and add it to the cart
    Add {
        /// Catalog item id
        item_id: Sku,
    },
    /// Remove every cart line with this sku
    Remove {
        /// Sku of the lines to remove
        sku: Sku,
    },
    /// Remove every cart line
    Empty,
    /// Show the cart lines and total
    Show,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_tracing(
        "shopping_cart_cli=info,shopping_cart_widget=info",
        cli.log_json,
    );

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = WidgetConfig::from_env()?;
    let mut session = commands::Session::open(&config);

    match cli.command {
        Commands::Browse { query } => commands::browse::run(&mut session, query.as_deref()).await?,
        Commands::Add { item_id } => commands::cart::add(&mut session, item_id).await?,
        Commands::Remove { sku } => commands::cart::remove(&mut session, sku).await?,
        Commands::Empty => commands::cart::empty(&mut session).await?,
        Commands::Show => {}
    }

    commands::cart::print_cart(&session);
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from(["cart", "add", "MLB1"]).expect("valid args");
        assert!(matches!(cli.command, Commands::Add { item_id } if item_id.as_str() == "MLB1"));
    }

    #[test]
    fn test_parse_rejects_blank_sku() {
        assert!(Cli::try_parse_from(["cart", "remove", " "]).is_err());
    }
}
