//! `slots` CLI — inspect appointment start/end candidates and clinic working
//! hours from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Start times for a date, 30-minute calendar preset, no free-slot data yet
//! slots starts --date 2026-03-16
//!
//! # Start times from a settings file and the free slots reported for the doctor
//! slots starts -c clinic.json --date 2026-03-16 --free free.json --now 2026-03-16T10:00
//!
//! # Free slots piped from the availability endpoint
//! curl ... | slots starts -c clinic.json --date 2026-03-16 --free -
//!
//! # End times once a start is chosen, as JSON
//! slots ends -c clinic.json --date 2026-03-16 --free free.json --start 11:00 --json
//!
//! # Working-hours windows a clinic's opening hours produce for a date
//! slots windows --hours hours.json --date 2026-03-21
//! ```
//!
//! Set `RUST_LOG=debug` to trace how candidates were derived.

use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use slot_engine::{
    clock, ClinicHours, EngineConfig, FreeSlotSet, SchedulerSettings, TimeCandidate,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Appointment time-slot candidates for clinic booking"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List selectable start times for a date
    Starts {
        #[command(flatten)]
        query: QueryArgs,
    },
    /// List selectable end times for a chosen start
    Ends {
        #[command(flatten)]
        query: QueryArgs,
        /// Chosen start time (HH:MM)
        #[arg(long)]
        start: String,
        /// Shortest appointment in minutes (defaults to one slot)
        #[arg(long)]
        min_duration: Option<u32>,
        /// Longest appointment in minutes (defaults to 180)
        #[arg(long)]
        max_duration: Option<u32>,
    },
    /// Show the working-hours windows clinic hours produce for a date
    Windows {
        /// Clinic hours JSON file
        #[arg(long)]
        hours: String,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct QueryArgs {
    /// Date being scheduled (YYYY-MM-DD)
    #[arg(long)]
    date: NaiveDate,
    /// Scheduler settings JSON file
    #[arg(short, long, conflicts_with = "preset")]
    config: Option<String>,
    /// Built-in settings preset (used when no --config is given)
    #[arg(long, value_enum)]
    preset: Option<Preset>,
    /// JSON array of free-slot timestamps ("-" reads stdin); omitted means no data
    #[arg(long)]
    free: Option<String>,
    /// Current local wall clock (YYYY-MM-DDTHH:MM[:SS]); defaults to the system clock
    #[arg(long)]
    now: Option<String>,
    /// IANA timezone of the clinic, used when --now is omitted
    #[arg(long)]
    timezone: Option<String>,
    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    /// 30-minute slots, 08:00-17:00
    Scheduler,
    /// 5-minute slots, 07:00-20:00
    BookingDialog,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Starts { query } => {
            let (config, free, now) = resolve_query(&query)?;
            let candidates =
                slot_engine::generate_start_candidates(&config, query.date, &free, now);
            print_candidates(&candidates, query.json)?;
        }
        Commands::Ends {
            query,
            start,
            min_duration,
            max_duration,
        } => {
            let (mut config, free, now) = resolve_query(&query)?;
            if let Some(minutes) = min_duration {
                config = config.with_min_duration(minutes);
            }
            if let Some(minutes) = max_duration {
                config = config.with_max_duration(minutes);
            }
            let start = clock::parse_hhmm(&start).context("Invalid --start")?;
            let candidates =
                slot_engine::generate_end_candidates(&config, query.date, &free, now, start);
            print_candidates(&candidates, query.json)?;
        }
        Commands::Windows {
            hours: path,
            date,
            json,
        } => {
            let raw = read_input(Some(path.as_str()))?;
            let hours = ClinicHours::from_json(&raw)
                .with_context(|| format!("Failed to parse clinic hours file: {}", path))?;
            let windows = hours.windows_for(date);
            if json {
                println!("{}", serde_json::to_string_pretty(&windows)?);
            } else if windows.is_empty() {
                eprintln!("Clinic closed on {}", date);
            } else {
                for w in &windows {
                    println!(
                        "{}-{}",
                        clock::format_hhmm(clock::time_from_minute(w.start_minute())),
                        clock::format_hhmm(clock::time_from_minute(w.end_minute()))
                    );
                }
            }
        }
    }

    Ok(())
}

/// Engine configuration, free-slot set and `now` for a candidate query.
fn resolve_query(query: &QueryArgs) -> Result<(EngineConfig, FreeSlotSet, NaiveDateTime)> {
    let settings = match (&query.config, query.preset) {
        (Some(path), _) => {
            let raw = read_input(Some(path.as_str()))?;
            SchedulerSettings::from_json(&raw)
                .with_context(|| format!("Failed to parse settings file: {}", path))?
        }
        (None, Some(Preset::BookingDialog)) => SchedulerSettings::booking_dialog(),
        (None, Some(Preset::Scheduler) | None) => SchedulerSettings::scheduler(),
    };
    let config = settings.engine_config_for(query.date);

    let free = match query.free.as_deref() {
        Some(source) => {
            let path = (source != "-").then_some(source);
            let raw = read_input(path)?;
            let timestamps: Vec<String> =
                serde_json::from_str(&raw).context("Free slots must be a JSON array of timestamps")?;
            FreeSlotSet::parse(query.date, timestamps.as_slice())
                .context("Failed to parse free slots")?
        }
        None => FreeSlotSet::new(),
    };

    let now = match (&query.now, &query.timezone) {
        (Some(raw), _) => parse_now(raw)?,
        (None, Some(tz)) => clock::local_now(Utc::now(), tz)?,
        (None, None) => Local::now().naive_local(),
    };

    debug!(
        date = %query.date,
        %now,
        windows = config.windows.len(),
        free_slots = free.len(),
        "resolved query"
    );
    Ok((config, free, now))
}

fn parse_now(raw: &str) -> Result<NaiveDateTime> {
    let trimmed = raw.trim();
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .with_context(|| format!("Invalid --now: {}", raw))
}

fn print_candidates(candidates: &[TimeCandidate], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(candidates)?);
        return Ok(());
    }
    if candidates.is_empty() {
        eprintln!("No time slots for this date");
    }
    for c in candidates {
        let status = if c.is_available { "available" } else { "unavailable" };
        println!("{}  {}", clock::format_hhmm(c.time), status);
    }
    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
