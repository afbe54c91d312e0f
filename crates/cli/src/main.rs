//! TechStore cart CLI - Local cart management and storefront cart sync.
//!
//! # Usage
//!
//! ```bash
//! # Show the local cart
//! techstore-cart show
//!
//! # Add two units of product 42 to the local cart and sync
//! techstore-cart add 42 -q 2
//!
//! # Add through the storefront API (requires TECHSTORE_COOKIE for a session)
//! techstore-cart add-to-cart 42
//!
//! # Start checkout for one product
//! techstore-cart buy-now 42 -q 1
//! ```
//!
//! # Commands
//!
//! - `show`, `count` - Inspect the local cart
//! - `add`, `remove`, `set`, `clear` - Edit the local cart (each ends with a sync)
//! - `sync` - Reconcile the local cart with the server
//! - `logout` - Drop the local cart
//! - `add-to-cart`, `buy-now` - Server-backed actions with user feedback

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use techstore_cart::config::CartConfig;
use techstore_core::{ProductId, Quantity, QuantityStepper};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "techstore-cart")]
#[command(author, version, about = "TechStore cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the lines of the local cart
    Show,
    /// Show the total quantity of the local cart
    Count,
    /// Add a product to the local cart
    Add {
        product: ProductId,
        /// Number of units to add
        #[arg(short, long, default_value = "1", value_parser = parse_quantity)]
        quantity: Quantity,
    },
    /// Remove a product from the local cart
    Remove { product: ProductId },
    /// Set a product's quantity in the local cart (0 removes it)
    Set { product: ProductId, quantity: u32 },
    /// Delete the local cart
    Clear,
    /// Reconcile the local cart with the server
    Sync,
    /// Drop the local cart after logging out
    Logout,
    /// Add a product through the storefront API
    AddToCart {
        product: ProductId,
        /// Number of units to add, read like the product page input
        #[arg(short, long, default_value = "1", value_parser = parse_picker_quantity)]
        quantity: Quantity,
    },
    /// Start checkout for a single product
    BuyNow {
        product: ProductId,
        /// Number of units to buy, read like the product page input
        #[arg(short, long, default_value = "1", value_parser = parse_picker_quantity)]
        quantity: Quantity,
    },
}

fn parse_quantity(s: &str) -> Result<Quantity, String> {
    let n = s.trim().parse::<u32>().map_err(|e| e.to_string())?;
    Quantity::new(n).map_err(|e| e.to_string())
}

/// Read a quantity the way the product page picker does: anything that is
/// not a positive integer becomes one, and the value is capped at the
/// picker's maximum.
#[allow(clippy::unnecessary_wraps)] // clap value parsers return Result
fn parse_picker_quantity(s: &str) -> Result<Quantity, String> {
    Ok(QuantityStepper::with_default_max(Quantity::parse_or_one(s)).value())
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &CartConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let config = match CartConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt::init();
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "techstore_cart=info,techstore_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli, &config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &CartConfig) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = commands::Context::from_config(config)?;

    match cli.command {
        Commands::Show => commands::cart::show(&ctx),
        Commands::Count => commands::cart::count(&ctx),
        Commands::Add { product, quantity } => commands::cart::add(&ctx, product, quantity).await?,
        Commands::Remove { product } => commands::cart::remove(&ctx, product).await?,
        Commands::Set { product, quantity } => {
            commands::cart::set(&ctx, product, quantity).await?;
        }
        Commands::Clear => commands::cart::clear(&ctx).await?,
        Commands::Sync => commands::cart::sync(&ctx).await,
        Commands::Logout => commands::cart::logout(&ctx).await?,
        Commands::AddToCart { product, quantity } => {
            commands::checkout::add_to_cart(&ctx, product, quantity).await?;
        }
        Commands::BuyNow { product, quantity } => {
            commands::checkout::buy_now(&ctx, product, quantity).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3").unwrap().get(), 3);
        assert!(parse_quantity("0").is_err());
        assert!(parse_quantity("-1").is_err());
        assert!(parse_quantity("many").is_err());
    }

    #[test]
    fn test_parse_picker_quantity() {
        assert_eq!(parse_picker_quantity("3").unwrap().get(), 3);
        assert_eq!(parse_picker_quantity("0").unwrap(), Quantity::ONE);
        assert_eq!(parse_picker_quantity("abc").unwrap(), Quantity::ONE);
        assert_eq!(parse_picker_quantity(" 2 units").unwrap().get(), 2);
        assert_eq!(parse_picker_quantity("5000").unwrap().get(), 999);
    }

    #[test]
    fn test_cli_buy_now_reads_loose_quantity() {
        let cli = Cli::try_parse_from(["techstore-cart", "buy-now", "7", "-q", "0"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::BuyNow { quantity, .. } if quantity == Quantity::ONE
        ));

        let cli =
            Cli::try_parse_from(["techstore-cart", "add-to-cart", "7", "-q", "1200"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::AddToCart { quantity, .. } if quantity.get() == 999
        ));
    }

    #[test]
    fn test_cli_parses_add() {
        let cli = Cli::try_parse_from(["techstore-cart", "add", "42", "-q", "2"]).unwrap();
        match cli.command {
            Commands::Add { product, quantity } => {
                assert_eq!(product, ProductId::new(42));
                assert_eq!(quantity.get(), 2);
            }
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn test_cli_quantity_defaults_to_one() {
        let cli = Cli::try_parse_from(["techstore-cart", "buy-now", "7"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::BuyNow { quantity, .. } if quantity == Quantity::ONE
        ));
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
