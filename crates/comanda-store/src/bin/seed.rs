//! # Demo Data Seeder
//!
//! Populates a data directory with the demo customers, restaurants and menus.
//!
//! ## Usage
//! ```bash
//! # Seed the platform data directory (or $COMANDA_DATA_DIR)
//! cargo run -p comanda-store --bin seed
//!
//! # Seed a specific directory
//! cargo run -p comanda-store --bin seed -- --dir ./data
//!
//! # Wipe and seed again
//! cargo run -p comanda-store --bin seed -- --dir ./data --reset
//! ```
//!
//! ## Demo Accounts
//! - Customers: `joao@email.com` / `senha123`, `maria@email.com` / `senha456`
//! - Restaurants: `pizza@email.com` / `senha123`, `burger@email.com` / `senha456`,
//!   `arabe@email.com` / `senha789`

use std::env;

use comanda_store::{bootstrap, OrderManager, SnapshotStore, StoreConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    dir: Option<String>,
    reset: bool,
    help: bool,
}

/// Parses arguments after the program name.
fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut args = args.iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--dir" | "-d" => match args.next() {
                Some(dir) => options.dir = Some(dir.clone()),
                None => return Err(format!("{} requires a path", arg)),
            },
            "--reset" | "-r" => options.reset = true,
            "--help" | "-h" => options.help = true,
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(options)
}

fn print_help() {
    println!("Comanda Demo Data Seeder");
    println!();
    println!("Usage: seed [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -d, --dir <PATH>   Data directory (default: $COMANDA_DATA_DIR or platform data dir)");
    println!("  -r, --reset        Delete existing data before seeding");
    println!("  -h, --help         Show this help message");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let Options { dir, reset, help } = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!("Run with --help for usage.");
            std::process::exit(2);
        }
    };
    if help {
        print_help();
        return Ok(());
    }

    let config = match dir {
        Some(dir) => StoreConfig::new(dir),
        None => StoreConfig::from_env()?,
    };

    println!("Comanda Demo Data Seeder");
    println!("========================");
    println!("Data directory: {}", config.base_dir().display());
    println!();

    let store = SnapshotStore::new(config);
    if reset {
        bootstrap::reset(&store);
        println!("✓ Existing data removed");
    }

    let mut manager = OrderManager::open(store)?;
    if bootstrap::initialize(&mut manager)? {
        println!(
            "✓ Seeded {} customers, {} restaurants",
            manager.all_customers().len(),
            manager.all_restaurants().len()
        );
    } else {
        println!("⚠ Data directory already initialized");
        println!("  Run with --reset to seed again.");
    }

    info!("Seed complete");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,comanda=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();
}
