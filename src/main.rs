//! Rent Ledger CLI
//!
//! Command-line interface for tracking tenants, rent accrual and payments.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- add Alice 555-0100 --last-rent-date 2024-03-01
//! cargo run -- pay Alice 500
//! cargo run -- increment Alice 200
//! cargo run -- status Alice
//! cargo run -- export tenants.csv
//! cargo run -- --data-dir /var/lib/rent import tenants.csv
//! cargo run                      # pending rent report
//! ```
//!
//! Tenants are persisted to `tenants.json` in the data directory. Logs go to
//! stderr and are controlled by `RUST_LOG` (default `warn`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (unknown tenant, invalid input, unreadable file, etc.)

use rent_ledger::cli;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Parse command-line arguments using clap
    let args = cli::parse_args();

    // Command output goes to stdout
    let mut output = std::io::stdout();
    if let Err(e) = cli::run(&args, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
