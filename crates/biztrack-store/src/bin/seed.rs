//! # Seed Data Generator
//!
//! Populates a data directory with the demo owner and catalog for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed the default data directory (./data)
//! cargo run -p biztrack-store --bin seed
//!
//! # Specify a data directory
//! cargo run -p biztrack-store --bin seed -- --data ./my-shop
//!
//! # Or via environment
//! BIZTRACK_DATA=./my-shop cargo run -p biztrack-store --bin seed
//! ```
//!
//! Seeding is idempotent per collection; running it against a populated
//! store changes nothing.

use std::env;

use tracing::info;

use biztrack_store::seed::seed_demo_data;
use biztrack_store::Database;

fn data_dir() -> String {
    // --data <dir> wins over BIZTRACK_DATA, which wins over ./data
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--data" {
            if let Some(dir) = args.next() {
                return dir;
            }
        }
    }

    env::var("BIZTRACK_DATA").unwrap_or_else(|_| "./data".to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let dir = data_dir();
    info!(dir = %dir, "Seeding demo data");

    let db = Database::open(&dir)?;
    seed_demo_data(&db)?;

    info!("Done");
    Ok(())
}
