//! # mesa
//!
//! Prints a sample restaurant receipt and a few shape measurements.
//!
//! ## Usage
//! ```bash
//! # Human-readable output with default settings
//! cargo run -p mesa-cli --bin mesa
//!
//! # Custom discount policy / tolerance
//! cargo run -p mesa-cli --bin mesa -- --config ./mesa.toml
//!
//! # Machine-readable output
//! cargo run -p mesa-cli --bin mesa -- --json
//! ```
//!
//! ## Log Levels
//! - `MESA_LOG=warn` or `RUST_LOG=warn` - only lenient geometry warnings
//! - Default: `info,mesa=debug`

mod config;
mod demo;

use std::env;
use std::path::PathBuf;
use std::rc::Rc;

use mesa_billing::{OrderSummary, Payment, PaymentReceipt};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::reload;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::config::{startup_log_filter, MesaConfig};
use crate::demo::ShapeReport;

/// Everything the binary prints with `--json`.
#[derive(Debug, Serialize)]
struct Report {
    order: OrderSummary,
    payment: PaymentReceipt,
    shapes: Vec<ShapeReport>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--json" | "-j" => json = true,
            "--help" | "-h" => {
                println!("Mesa billing and geometry demo");
                println!();
                println!("Usage: mesa [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>  TOML config file (default: $MESA_CONFIG)");
                println!("  -j, --json           Print the report as JSON");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    let log_filter = init_tracing(&startup_log_filter(|key| env::var(key).ok()));
    let config = MesaConfig::load(config_path)?;
    apply_log_filter(&log_filter, &config.log_filter)?;
    info!(
        tolerance = config.geometry.tolerance,
        require_closed_chain = config.geometry.require_closed_chain,
        "Configuration loaded"
    );

    // Billing
    let order = Rc::new(demo::sample_order()?);
    let payment = Payment::new(Rc::clone(&order), Box::new(demo::sample_card()?));
    let receipt = payment.make_payment_with(&config.billing);
    let summary = order.summary(&config.billing);

    // Geometry
    let shapes: Vec<ShapeReport> = demo::sample_shapes(&config.geometry)
        .iter_mut()
        .map(ShapeReport::measure)
        .collect();

    if json {
        let report = Report {
            order: summary,
            payment: receipt,
            shapes,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Order #{}", summary.order_number);
    println!("Items:");
    for item in &summary.items {
        println!(" - {}", item);
    }
    println!("{}", summary.message);
    println!("Total after discount: {}", summary.outcome.total);
    println!("{}", receipt);
    println!();

    for shape in &shapes {
        println!("{}", shape.kind);
        println!("  area:         {}", format_measure(shape.area));
        println!("  perimeter:    {}", format_measure(shape.perimeter));
        match &shape.inner_angles {
            Some(angles) => println!("  inner angles: {:.2?}", angles),
            None => println!("  inner angles: n/a"),
        }
        for warning in &shape.warnings {
            println!("  warning:      {}", warning);
        }
    }

    Ok(())
}

fn format_measure(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.4}", v))
}

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Initializes the tracing subscriber for structured logging.
///
/// Runs before the config is loaded so that loading itself is logged.
/// `RUST_LOG` wins when set; otherwise `initial_filter` is used until
/// [`apply_log_filter`] swaps in the configured one.
fn init_tracing(initial_filter: &str) -> FilterHandle {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(initial_filter));
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    handle
}

/// Replaces the startup filter with the configured one unless `RUST_LOG` is set.
fn apply_log_filter(handle: &FilterHandle, configured: &str) -> Result<(), reload::Error> {
    if env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        return Ok(());
    }
    handle.reload(EnvFilter::new(configured))
}
