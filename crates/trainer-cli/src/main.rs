//! `trainer-slots` CLI — query a trainer's open slots and book appointments.
//!
//! ## Usage
//!
//! ```sh
//! # Open 30-minute slots for trainer 1 over a day
//! trainer-slots available --trainer 1 \
//!   --from 2026-01-12T08:00:00-08:00 --to 2026-01-12T17:00:00-08:00
//!
//! # Book a slot for user 2
//! trainer-slots book --trainer 1 --user 2 --at 2026-01-12T09:30:00-08:00
//!
//! # List what trainer 1 already has booked
//! trainer-slots scheduled --trainer 1
//!
//! # Use another data file
//! trainer-slots --data /srv/appointments.json scheduled --trainer 1
//! ```
//!
//! Results are printed to stdout as `{"data": ...}`. Logs go to stderr and are
//! filtered with `RUST_LOG`.

mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use trainer_engine::{JsonFileStore, Scheduler};

use crate::config::{AppConfig, CONFIG_FILE};

#[derive(Parser)]
#[command(
    name = "trainer-slots",
    version,
    about = "Query and book trainer appointment slots"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Appointment data file (overrides store.path from the config)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Configuration file
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// List open slots for a trainer between two times
    Available {
        #[arg(short, long)]
        trainer: u64,
        /// Range start (RFC 3339, e.g. 2026-01-12T08:00:00-08:00)
        #[arg(long, value_parser = parse_timestamp)]
        from: DateTime<FixedOffset>,
        /// Range end (RFC 3339)
        #[arg(long, value_parser = parse_timestamp)]
        to: DateTime<FixedOffset>,
    },
    /// Book the slot starting at the given time
    Book {
        #[arg(short, long)]
        trainer: u64,
        #[arg(short, long)]
        user: u64,
        /// Slot start (RFC 3339)
        #[arg(long, value_parser = parse_timestamp)]
        at: DateTime<FixedOffset>,
    },
    /// List a trainer's booked appointments
    Scheduled {
        #[arg(short, long)]
        trainer: u64,
    },
}

#[derive(Serialize)]
struct Data<T> {
    data: T,
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    let config = AppConfig::load_from(&cli.config).context("Failed to load configuration")?;
    let rules = config
        .hours
        .to_rules()
        .context("Invalid operating hours configuration")?;
    let path = cli.data.unwrap_or(config.store.path);

    let store = JsonFileStore::new(path, rules.timezone());
    let scheduler = Scheduler::open(rules, store).context("Failed to load appointments")?;

    match cli.command {
        Commands::Available { trainer, from, to } => {
            print_data(&scheduler.available(trainer, from, to))?;
        }
        Commands::Book { trainer, user, at } => match scheduler.book(trainer, user, at) {
            Ok(appointment) => print_data(&appointment)?,
            Err(err) => {
                // Saved or not, a committed booking is reported to the caller.
                if let Some(appointment) = err.committed() {
                    print_data(appointment)?;
                }
                return Err(err).context("Booking failed");
            }
        },
        Commands::Scheduled { trainer } => {
            print_data(&scheduler.scheduled(trainer))?;
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map_err(|e| format!("'{}' is not a valid RFC 3339 timestamp: {}", raw, e))
}

fn print_data<T: Serialize>(data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(&Data { data })?;
    println!("{}", json);
    Ok(())
}
