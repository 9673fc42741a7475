//! Reward Points CLI
//!
//! Reads a JSON array of purchase transactions and prints reward points per
//! transaction, per customer per month, and per customer as CSV sections.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- transactions.json                        # last three months
//! cargo run -- transactions.json 2025-01-01             # 2025-01-01 to today
//! cargo run -- transactions.json 2025-01-01 2025-03-31
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use chrono::{Local, NaiveDate};
use log::info;
use reward_points::{parse_date_argument, DateWindow, RewardsEngine, RewardsError, Result};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(RewardsError::MissingArgument);
    }

    let today = Local::now().date_naive();
    let window = date_window(&args[2..], today)?;

    let input_path = &args[1];
    info!(
        "Reading {} for purchases between {} and {}",
        input_path, window.from, window.to
    );
    let file = File::open(input_path)?;
    let reader = BufReader::new(file);

    let mut engine = RewardsEngine::new();
    engine.load_json(reader)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    engine.write_report(&window, handle)?;

    Ok(())
}

/// Builds the reporting window from the optional FROM and TO arguments.
fn date_window(args: &[String], today: NaiveDate) -> Result<DateWindow> {
    match args {
        [] => Ok(DateWindow::last_three_months(today)),
        [from] => DateWindow::new(parse_date_argument(from)?, today),
        [from, to, ..] => DateWindow::new(parse_date_argument(from)?, parse_date_argument(to)?),
    }
}
