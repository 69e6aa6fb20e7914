//! Command line view of a branch's schedule.
//!
//! Prints the resolved slots of a month or a single day and edits single
//! days through the same API the dashboard uses.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clinicdesk_client::{
    load_month_view, revert_day, save_day, ClientConfig, MonthView, ScheduleClient,
};
use clinicdesk_core::{
    models::daily_override::parse_date_key,
    month::YearMonth,
    resolver::{DaySchedule, SlotSource},
    time::TimeOfDay,
};
use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "schedule-preview", about = "Preview and edit branch reservation slots")]
struct Cli {
    /// Branch slug, e.g. `gangnam`
    #[arg(long, short)]
    branch: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every day of a month
    Month {
        /// Month as YYYY-MM, defaults to the current month in CLINICDESK_TIMEZONE
        #[arg(long)]
        month: Option<YearMonth>,
    },
    /// Print the slots of one day
    Day {
        #[arg(long, value_parser = parse_date_arg)]
        date: NaiveDate,
    },
    /// Replace the slots of one day, e.g. `--slots 10:00,10:30`
    SetDay {
        #[arg(long, value_parser = parse_date_arg)]
        date: NaiveDate,
        #[arg(long, value_delimiter = ',', required = true)]
        slots: Vec<String>,
    },
    /// Close one day
    Close {
        #[arg(long, value_parser = parse_date_arg)]
        date: NaiveDate,
    },
    /// Drop the override of one day so the template applies again
    Revert {
        #[arg(long, value_parser = parse_date_arg)]
        date: NaiveDate,
    },
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_date_key(raw).map_err(|err| err.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env()?;
    let client = ScheduleClient::new(&config)?;
    let branch = cli.branch.as_str();

    match cli.command {
        Command::Month { month } => {
            let month = month.unwrap_or_else(|| YearMonth::of(config.today()));
            let view = load_month_view(&client, branch, month).await;
            print_month(&view);
        }
        Command::Day { date } => {
            let view = load_month_view(&client, branch, YearMonth::of(date)).await;
            if let Some(day) = view.day(date) {
                println!("{}", format_day(day));
            }
        }
        Command::SetDay { date, slots } => {
            let view = load_month_view(&client, branch, YearMonth::of(date)).await;
            let mut editor = view.open_day(date);
            editor.clear();
            for slot in &slots {
                editor.add_slot(slot)?;
            }
            let saved = save_day(&client, branch, &mut editor)
                .await
                .wrap_err_with(|| format!("Failed to save {}", date))?;
            println!("{} now has {} slot(s)", date, saved.time_slots.len());
        }
        Command::Close { date } => {
            let view = load_month_view(&client, branch, YearMonth::of(date)).await;
            let mut editor = view.open_day(date);
            editor.clear();
            save_day(&client, branch, &mut editor)
                .await
                .wrap_err_with(|| format!("Failed to close {}", date))?;
            println!("{} is closed", date);
        }
        Command::Revert { date } => {
            if revert_day(&client, branch, date).await? {
                println!("{} follows the weekly template again", date);
            } else {
                println!("{} had no override", date);
            }
        }
    }

    Ok(())
}

fn print_month(view: &MonthView) {
    println!("{} {}", view.branch_slug, view.month);
    if !view.template_configured {
        println!("(no saved template, showing defaults)");
    }
    for day in &view.days {
        println!("{}", format_day(day));
    }
}

fn format_day(day: &DaySchedule) -> String {
    let label = match day.source {
        SlotSource::Override if day.slots.is_empty() => "closed",
        SlotSource::Override => "custom",
        SlotSource::WeeklyHoliday => "holiday",
        SlotSource::Template => "template",
    };

    format!(
        "{} {} {:<8} {}",
        day.date,
        day.weekday().short_name(),
        label,
        join_slots(&day.slots)
    )
}

fn join_slots(slots: &[TimeOfDay]) -> String {
    slots
        .iter()
        .map(TimeOfDay::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
