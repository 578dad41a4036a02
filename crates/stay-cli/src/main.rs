//! `stays` CLI — check a stay history against the 90/180 rolling-window rule.
//!
//! ## Usage
//!
//! ```sh
//! # Merge a JSON history into a disjoint set (stdin → stdout)
//! echo '[{"entry":"2024-01-01","exit":"2024-01-05"}]' | stays normalize
//!
//! # Convert a free-text list of stays to JSON
//! stays import -i trips.txt -o trips.json
//!
//! # Days used in the window ending on a date
//! stays used --on 2024-06-01 -i trips.json
//!
//! # Plan a trip, optionally checking a proposed exit
//! stays plan --entry 2024-07-01 --exit 2024-08-15 -i trips.json
//!
//! # Status while already inside (today defaults to the current UTC date)
//! stays inside --entry 2024-05-20 -i trips.json
//!
//! # When consumed days age out
//! stays schedule --on 2024-06-01 --limit 5 -i trips.json
//! ```

mod config;
mod import;
mod logging;

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use stay_engine::{
    aging_out_schedule, already_inside, days_used_in_window, normalize_stays, plan_trip,
    trip_status, NormalizeResult, RawStay,
};
use tracing::info;

use crate::config::StaysConfig;

#[derive(Parser)]
#[command(
    name = "stays",
    version,
    about = "Rolling-window (90/180) stay compliance calculator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    compact: bool,
}

/// Where the stay history comes from.
#[derive(Args)]
struct InputArgs {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,

    /// Treat the input as free text, one `<date> to <date>` per line
    /// (implied for `.txt` files)
    #[arg(long)]
    text: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and merge stays into a disjoint set
    Normalize {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Convert a free-text stay list to JSON
    Import {
        /// Input text file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Days used in the window ending on a date
    Used {
        #[command(flatten)]
        input: InputArgs,
        /// Reference date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        on: NaiveDate,
    },
    /// Plan a trip from an entry date
    Plan {
        #[command(flatten)]
        input: InputArgs,
        /// Planned entry date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        entry: NaiveDate,
        /// Proposed exit date, checked day by day
        #[arg(long)]
        exit: Option<String>,
    },
    /// Status while already inside the area
    Inside {
        #[command(flatten)]
        input: InputArgs,
        /// Actual entry date of the current stay (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        entry: NaiveDate,
        /// Override today's date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        today: Option<NaiveDate>,
    },
    /// Dates on which consumed days age out of the window
    Schedule {
        #[command(flatten)]
        input: InputArgs,
        /// Reference date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        on: NaiveDate,
        /// Maximum number of events (0 = all; defaults to the config value)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Combined status for a planning form
    Status {
        #[command(flatten)]
        input: InputArgs,
        /// Planned entry date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        entry: Option<NaiveDate>,
        /// Planned exit date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date, requires = "entry")]
        exit: Option<NaiveDate>,
        /// Override today's date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        today: Option<NaiveDate>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = StaysConfig::load(cli.config.as_deref())?;
    let pretty = config.output.pretty && !cli.compact;

    match cli.command {
        Commands::Normalize { input } => {
            // Dropped records were already reported on stderr by the normalizer.
            let normalized = load_stays(&input, &config)?;
            info!(
                kept = normalized.stays.len(),
                dropped = normalized.diagnostics.len(),
                "normalized stays"
            );
            print_json(&normalized.stays, pretty)?;
        }
        Commands::Import { input, output } => {
            let text = read_input(input.as_deref())?;
            let stays = import::parse_text(&text, config.import.separators.as_slice());
            info!(imported = stays.len(), "imported stays");
            write_output(output.as_deref(), &to_json(&stays, pretty)?)?;
        }
        Commands::Used { input, on } => {
            let normalized = load_stays(&input, &config)?;
            let used = days_used_in_window(&normalized.stays, on);
            print_json(&serde_json::json!({ "reference": on, "used": used }), pretty)?;
        }
        Commands::Plan { input, entry, exit } => {
            let normalized = load_stays(&input, &config)?;
            let plan = plan_trip(&normalized.stays, entry, exit.as_deref());
            print_json(&plan, pretty)?;
        }
        Commands::Inside {
            input,
            entry,
            today,
        } => {
            let normalized = load_stays(&input, &config)?;
            let today = today.unwrap_or_else(today_utc);
            let status = already_inside(&normalized.stays, entry, today);
            print_json(&status, pretty)?;
        }
        Commands::Schedule { input, on, limit } => {
            let normalized = load_stays(&input, &config)?;
            let mut events = aging_out_schedule(&normalized.stays, on);
            let limit = limit.unwrap_or(config.schedule.limit);
            if limit > 0 {
                events.truncate(limit);
            }
            print_json(&events, pretty)?;
        }
        Commands::Status {
            input,
            entry,
            exit,
            today,
        } => {
            let normalized = load_stays(&input, &config)?;
            let today = today.unwrap_or_else(today_utc);
            let status = trip_status(&normalized.stays, today, entry, exit);
            print_json(&status, pretty)?;
        }
    }

    Ok(())
}

/// The wall-clock date. Only the CLI reads the clock; the engine takes it as input.
fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    stay_engine::parse_iso_date(s).map_err(|e| e.to_string())
}

/// Read, parse and normalize the stay history named by `args`.
fn load_stays(args: &InputArgs, config: &StaysConfig) -> Result<NormalizeResult> {
    let content = read_input(args.input.as_deref())?;
    let is_text = args.text
        || args
            .input
            .as_deref()
            .is_some_and(|p| Path::new(p).extension().is_some_and(|ext| ext == "txt"));

    let raw: Vec<RawStay> = if is_text {
        import::parse_text(&content, config.import.separators.as_slice())
    } else {
        serde_json::from_str(&content).context("Failed to parse stays JSON")?
    };

    Ok(normalize_stays(&raw))
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    println!("{}", to_json(value, pretty)?);
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

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
