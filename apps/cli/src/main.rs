//! # Checkout CLI
//!
//! ```text
//! $ checkout scan GR1 SR1 GR1 GR1 CF1
//! +--------------+--------+----------+
//! | Item         | Price  | Quantity |
//! +--------------+--------+----------+
//! | Green Tea    |  £3.11 |        3 |
//! | Strawberries |  £5.00 |        1 |
//! | Coffee       | £11.23 |        1 |
//! +--------------+--------+----------+
//! | Subtotal     | £25.56 |          |
//! | Discount     |  £3.11 |          |
//! | Total        | £22.45 |          |
//! +--------------+--------+----------+
//!
//! $ checkout rules          # active rules as JSON
//! ```
//!
//! Receipts and rule listings go to stdout, logs to stderr.

mod settings;

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use checkout_rules::DiscountEngine;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::settings::CliSettings;

#[derive(Debug, Parser)]
#[command(name = "checkout", version, about = "Price a basket against promotional rules")]
struct Cli {
    /// Rules file (overrides settings and CHECKOUT_RULES_PATH)
    #[arg(long, global = true, value_name = "PATH")]
    rules: Option<PathBuf>,

    /// Settings file (TOML)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Scan SKUs in order and print the receipt
    Scan {
        #[arg(required = true, value_name = "SKU")]
        skus: Vec<String>,
    },

    /// List the active rules as JSON
    Rules,
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let mut settings = CliSettings::load(cli.config).context("Failed to load settings")?;
    if let Some(path) = cli.rules {
        settings.rules_path = path;
    }

    let engine = DiscountEngine::new(&settings.rules_path).with_context(|| {
        format!("Failed to load rules from {}", settings.rules_path.display())
    })?;

    match cli.command {
        Command::Scan { skus } => println!("{}", scan(&engine, &settings, &skus)?),
        Command::Rules => println!("{}", serde_json::to_string_pretty(engine.rules())?),
    }

    Ok(())
}

fn scan(engine: &DiscountEngine, settings: &CliSettings, skus: &[String]) -> anyhow::Result<String> {
    let mut checkout = engine.checkout();

    for sku in skus {
        let product = settings
            .find_product(sku)
            .ok_or_else(|| anyhow!("Unknown SKU: {sku}"))?;
        checkout.scan(product);
    }

    let order = checkout.finalize_order();
    info!(
        order_id = %order.id,
        lines = order.items.len(),
        total_cents = order.total_cents,
        "Order finalized"
    );

    Ok(order.render_receipt(&settings.currency_symbol))
}

/// Installs the stderr log subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show skipped rules and config fallbacks
/// - Default: warnings, plus info from the checkout crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,checkout=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
