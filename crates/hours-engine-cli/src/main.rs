use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveTime;
use clap::{Parser, Subcommand};
use hours_engine::{
    format_week_time, parse_day_interval, week_offset, DayIndex, IntervalSet, Seconds, Timezones,
    WorkingHours, WEEK,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hours", version, about = "Inspect and edit weekly business hours")]
struct Cli {
    /// Log filter, e.g. `debug` or `hours_engine=trace`
    #[arg(long, global = true, env = "HOURS_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the hours in canonical form
    Normalize {
        /// Working hours JSON file (use - for stdin)
        file: PathBuf,
    },
    /// Print one day's intervals, one per line
    Day {
        /// Working hours JSON file (use - for stdin)
        file: PathBuf,
        /// Day: 0-6 or mon..sun
        day: DayIndex,
    },
    /// Replace one day's intervals and print the result
    SetDay {
        /// Working hours JSON file (use - for stdin)
        file: PathBuf,
        /// Day: 0-6 or mon..sun
        day: DayIndex,
        /// Ranges like 09:00-18:00; ends up to 30:00 run past midnight
        #[arg(required = true)]
        ranges: Vec<String>,
    },
    /// Close one day and print the result
    ClearDay {
        /// Working hours JSON file (use - for stdin)
        file: PathBuf,
        /// Day: 0-6 or mon..sun
        day: DayIndex,
    },
    /// Report whether the business is open at a given day and time
    Status {
        /// Working hours JSON file (use - for stdin)
        file: PathBuf,
        /// Day: 0-6 or mon..sun
        day: DayIndex,
        /// Local time, HH:MM
        time: String,
    },
    /// Check the timezone id against a catalog and print its label
    Timezone {
        /// Working hours JSON file (use - for stdin)
        file: PathBuf,
        /// Timezone catalog JSON file: [{"id", "name", "utc_offset"}, ...]
        catalog: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Command::Normalize { file } => {
            let hours = load(&file)?;
            println!("{}", hours.to_json()?);
        }
        Command::Day { file, day } => {
            let hours = load(&file)?;
            for interval in hours.day(day).iter() {
                println!("{}", interval.shifted(day.start()));
            }
        }
        Command::SetDay { file, day, ranges } => {
            let hours = load(&file)?;
            let replacement = ranges
                .iter()
                .map(|range| parse_day_interval(range))
                .collect::<Result<IntervalSet, _>>()
                .context("invalid range")?;
            println!("{}", hours.with_day(day, replacement).to_json()?);
        }
        Command::ClearDay { file, day } => {
            let hours = load(&file)?;
            println!("{}", hours.without_day(day).to_json()?);
        }
        Command::Status { file, day, time } => {
            let hours = load(&file)?;
            let time = NaiveTime::parse_from_str(&time, "%H:%M")
                .with_context(|| format!("invalid time '{time}'"))?;
            let at = week_offset(day.weekday(), time);
            if hours.is_open_at(at) {
                println!("open");
                match hours.next_close(at) {
                    Some(close) => println!("closes {}", format_week_offset(close)),
                    None => println!("open around the clock"),
                }
            } else {
                println!("closed");
                if let Some(open) = hours.next_open(at) {
                    println!("opens {}", format_week_offset(open));
                }
            }
        }
        Command::Timezone { file, catalog } => {
            let hours = load(&file)?;
            let catalog: Timezones = serde_json::from_str(&read_input(&catalog)?)
                .with_context(|| format!("failed to load timezones from {}", catalog.display()))?;
            let timezone = hours.validate(&catalog)?;
            println!("{}", timezone.label());
        }
    }
    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

fn load(path: &Path) -> Result<WorkingHours> {
    let json = read_input(path)?;
    let hours = WorkingHours::from_json(&json)
        .with_context(|| format!("failed to load working hours from {}", path.display()))?;
    tracing::debug!(timezone_id = %hours.timezone_id, intervals = hours.intervals.len(), "loaded");
    Ok(hours)
}

/// `Mon 09:00`, with `(next week)` when `t` falls in a later cycle.
fn format_week_offset(t: Seconds) -> String {
    if t >= WEEK {
        format!("{} (next week)", format_week_time(t))
    } else {
        format_week_time(t)
    }
}
