//! Checkout simulator CLI.
//!
//! # Usage
//!
//! ```bash
//! checkout-sim run scenario.toml
//! checkout-sim run scenario.toml --registers 3 --json
//! checkout-sim settle --amount 12 5 10 2
//! checkout-sim config --config ./checkout.toml
//! ```
//!
//! Reports go to stdout and logs to stderr (`RUST_LOG` to adjust).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (bad config or scenario, unreadable file, etc.)

use std::process;

use checkout_sim::cli::Cli;
use clap::Parser;
use tracing::error;

fn main() {
    let cli = Cli::parse();
    checkout_sim::init_tracing();

    let stdout = std::io::stdout();
    if let Err(e) = checkout_sim::execute(cli, &mut stdout.lock()) {
        error!(input_error = e.is_input_error(), "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
