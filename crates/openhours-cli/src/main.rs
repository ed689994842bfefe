//! `openhours` CLI -- query a weekly opening-hours schedule from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # List the canonical windows
//! openhours --hours "mo-fr 09:00-12:00,13:00-17:00" show
//!
//! # Is it open right now in London?
//! openhours --hours "mo-fr 09:00-17:00" --tz Europe/London check
//!
//! # When does the state next change, as JSON
//! openhours --hours "su 03:00-05:00" --tz Europe/London --json next --at 2019-03-31T00:00
//!
//! # Earliest start for a 90 minute job
//! openhours --hours "mo 10:00-15:00" when --minutes 90 --at 2019-03-11T14:00
//! ```
//!
//! `--hours` and `--tz` can also come from `OPENHOURS` and `OPENHOURS_TZ`.
//! Diagnostics go to stderr; `-v` enables debug logging, `RUST_LOG` overrides.

use anyhow::{Context, Result};
use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use openhours::{parse_local_datetime, parse_timezone, Schedule};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "openhours",
    version,
    about = "Query weekly opening-hours schedules"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Schedule definition, e.g. "mo-fr 09:00-17:00; sa 10:00-14:00"
    #[arg(short = 'H', long, env = "OPENHOURS")]
    hours: String,

    /// IANA timezone used for --at and for printed timestamps
    #[arg(long, env = "OPENHOURS_TZ", default_value = "UTC")]
    tz: String,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List the open windows, one per line
    Show,
    /// Report whether the schedule is open at a given time
    Check {
        /// Timestamp to check (RFC 3339 or local YYYY-MM-DDTHH:MM[:SS]); defaults to now
        #[arg(long)]
        at: Option<String>,
    },
    /// Report the current state and when it next changes
    Next {
        /// Timestamp to start from; defaults to now
        #[arg(long)]
        at: Option<String>,
    },
    /// Find the earliest start that fits a duration in one open window
    When {
        /// Required duration in minutes
        #[arg(long)]
        minutes: u32,
        /// Timestamp to search from; defaults to now
        #[arg(long)]
        at: Option<String>,
    },
}

#[derive(Serialize)]
struct CheckOutput {
    at: String,
    open: bool,
}

#[derive(Serialize)]
struct NextOutput {
    at: String,
    open: bool,
    next_change: Option<String>,
    minutes: Option<i64>,
}

#[derive(Serialize)]
struct WhenOutput {
    at: String,
    minutes: u32,
    start: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let schedule = Schedule::parse(&cli.hours)
        .with_context(|| format!("Failed to parse schedule: {}", cli.hours))?;
    let tz = parse_timezone(&cli.tz).context("Failed to load timezone")?;
    debug!(windows = schedule.windows().len(), tz = %tz, "schedule loaded");

    match cli.command {
        Commands::Show => {
            if cli.json {
                print_json(&schedule.windows())?;
            } else {
                for line in schedule.lines() {
                    println!("{}", line);
                }
            }
        }
        Commands::Check { at } => {
            let t = resolve_time(at.as_deref(), &tz)?;
            let open = schedule.is_open(&t);
            if cli.json {
                print_json(&CheckOutput {
                    at: t.to_rfc3339(),
                    open,
                })?;
            } else {
                println!("{}", state(open));
            }
        }
        Commands::Next { at } => {
            let t = resolve_time(at.as_deref(), &tz)?;
            let open = schedule.is_open(&t);
            let change = schedule.next_transition(&t);
            if cli.json {
                print_json(&NextOutput {
                    at: t.to_rfc3339(),
                    open,
                    next_change: change.map(|c| (t + c.after).to_rfc3339()),
                    minutes: change.map(|c| c.after.num_minutes()),
                })?;
            } else {
                match change {
                    Some(c) => println!(
                        "{} until {} (in {})",
                        state(open),
                        (t + c.after).to_rfc3339(),
                        human_duration(c.after)
                    ),
                    None => println!("always {}", state(open)),
                }
            }
        }
        Commands::When { minutes, at } => {
            let t = resolve_time(at.as_deref(), &tz)?;
            let start = schedule.when(&t, TimeDelta::minutes(i64::from(minutes)));
            if cli.json {
                print_json(&WhenOutput {
                    at: t.to_rfc3339(),
                    minutes,
                    start: start.map(|s| s.to_rfc3339()),
                })?;
            } else {
                match start {
                    Some(s) => println!("{}", s.to_rfc3339()),
                    None => println!("none"),
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

/// Parse `--at` in the selected zone, or take the current time.
fn resolve_time(at: Option<&str>, tz: &Tz) -> Result<DateTime<Tz>> {
    match at {
        Some(text) => parse_local_datetime(text, tz)
            .with_context(|| format!("Failed to parse --at: {}", text)),
        None => Ok(Utc::now().with_timezone(tz)),
    }
}

fn state(open: bool) -> &'static str {
    if open {
        "open"
    } else {
        "closed"
    }
}

/// `"1d 2h 30m"`, dropping leading zero units.
fn human_duration(d: TimeDelta) -> String {
    let total = d.num_minutes();
    let (days, hours, minutes) = (total / 1440, total % 1440 / 60, total % 60);
    match (days, hours) {
        (0, 0) => format!("{}m", minutes),
        (0, _) => format!("{}h {}m", hours, minutes),
        _ => format!("{}d {}h {}m", days, hours, minutes),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
