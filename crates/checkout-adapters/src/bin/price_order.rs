//! # Order Pricing Tool
//!
//! Prices one order request against a `checkout.toml` store for development.
//!
//! ## Usage
//! ```bash
//! # Price an order with the default config location
//! cargo run -p checkout-adapters --bin price-order -- order.json
//!
//! # Use an explicit config file
//! cargo run -p checkout-adapters --bin price-order -- order.json --config ./checkout.toml
//!
//! # Show pipeline details
//! RUST_LOG=checkout_core=debug cargo run -p checkout-adapters --bin price-order -- order.json
//! ```
//!
//! ## Order File
//! ```json
//! {
//!   "region": "JP",
//!   "roundingMode": "HALF_UP",
//!   "lines": [{ "productId": "COKE-330", "qty": 12 }]
//! }
//! ```
//!
//! The `OrderResult` is printed to stdout as JSON; logs go to stderr.
//! Rejected orders exit with status 1; usage errors (no order file,
//! `--config` without a path) exit with status 2.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use checkout_adapters::{build_service, CheckoutConfig};
use checkout_core::OrderRequest;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// What the command line asks for.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Price {
        order_path: PathBuf,
        config_path: Option<PathBuf>,
    },
    Help,
    /// Malformed arguments; carries the message for stderr.
    Usage(String),
}

fn parse_args(args: &[String]) -> Command {
    let mut order_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let Some(path) = args.get(i + 1) else {
                    return Command::Usage("--config requires a path".to_string());
                };
                config_path = Some(PathBuf::from(path));
                i += 1;
            }
            "--help" | "-h" => return Command::Help,
            other => order_path = Some(PathBuf::from(other)),
        }
        i += 1;
    }

    match order_path {
        Some(order_path) => Command::Price {
            order_path,
            config_path,
        },
        None => Command::Usage("missing order file".to_string()),
    }
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let (order_path, config_path) = match parse_args(&args) {
        Command::Price {
            order_path,
            config_path,
        } => (order_path, config_path),
        Command::Help => {
            print_help();
            return Ok(ExitCode::SUCCESS);
        }
        Command::Usage(message) => {
            eprintln!("{}", message);
            print_help();
            return Ok(ExitCode::from(2));
        }
    };

    let config = CheckoutConfig::load(config_path)?;
    let service = build_service(&config);

    let contents = std::fs::read_to_string(&order_path)?;
    let request: OrderRequest = serde_json::from_str(&contents)?;

    match service.place_order(&request) {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!(error = %e, "Order could not be placed");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_help() {
    println!("Checkout Order Pricing");
    println!();
    println!("Usage: price-order <ORDER.json> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>  checkout.toml path (default: platform config dir)");
    println!("  -h, --help           Show this help message");
}

/// Logs to stderr so stdout stays pure JSON.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show pipeline stages
/// - Default: INFO level, debug for the checkout crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,checkout_core=debug,checkout_adapters=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("price-order")
            .chain(list.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_order_and_config() {
        assert_eq!(
            parse_args(&args(&["order.json", "--config", "store.toml"])),
            Command::Price {
                order_path: PathBuf::from("order.json"),
                config_path: Some(PathBuf::from("store.toml")),
            }
        );
        assert_eq!(
            parse_args(&args(&["-c", "store.toml", "order.json"])),
            Command::Price {
                order_path: PathBuf::from("order.json"),
                config_path: Some(PathBuf::from("store.toml")),
            }
        );
    }

    #[test]
    fn test_config_without_path_is_a_usage_error() {
        assert!(matches!(
            parse_args(&args(&["order.json", "--config"])),
            Command::Usage(_)
        ));
        assert!(matches!(
            parse_args(&args(&["order.json", "-c"])),
            Command::Usage(_)
        ));
    }

    #[test]
    fn test_missing_order_and_help() {
        assert!(matches!(parse_args(&args(&[])), Command::Usage(_)));
        assert_eq!(parse_args(&args(&["order.json", "--help"])), Command::Help);
    }
}
