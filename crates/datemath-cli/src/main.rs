//! Command-line boundary for the datemath engine.
//!
//! The core library never reads a clock; this layer is the injection point
//! for the reference time. `--now` accepts an ISO 8601 civil timestamp
//! (`2021-07-01T15:00:00`) and defaults to the current system time.

use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use serde_json::json;

#[derive(Parser)]
#[command(
    name = "datemath",
    version,
    about = "Resolve date-math expressions like now-1d/y"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve an expression against the reference time
    Parse {
        /// Date-math expression, e.g. now-1d/y
        expression: String,
        /// Reference timestamp; defaults to the current system time
        #[arg(long)]
        now: Option<NaiveDateTime>,
        /// Emit a JSON object instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Render the difference between a target timestamp and the reference
    /// as an expression
    Stringify {
        /// Target timestamp, e.g. 2021-07-01T15:00:00
        target: NaiveDateTime,
        /// Reference timestamp; defaults to the current system time
        #[arg(long)]
        now: Option<NaiveDateTime>,
        /// Emit a JSON object instead of plain text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Parse {
            expression,
            now,
            json,
        } => {
            let reference = reference_time(now);
            let resolved = datemath::parse(&expression, reference)?;
            if json {
                println!(
                    "{}",
                    json!({ "input": expression, "now": reference, "result": resolved })
                );
            } else {
                println!("{}", resolved.format("%Y-%m-%dT%H:%M:%S%.f"));
            }
        }
        Command::Stringify { target, now, json } => {
            let reference = reference_time(now);
            let rendered = datemath::stringify(target, reference);
            if json {
                println!(
                    "{}",
                    json!({ "input": target, "now": reference, "result": rendered })
                );
            } else {
                println!("{rendered}");
            }
        }
    }
    Ok(())
}

/// The only place a clock is read: absent `--now`, anchor on system time.
fn reference_time(now: Option<NaiveDateTime>) -> NaiveDateTime {
    now.unwrap_or_else(|| Local::now().naive_local())
}
