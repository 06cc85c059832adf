mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use datebook_core::config::DatebookConfig;
use datebook_core::storage::FileStore;
use datebook_core::{BookingStore, DateKey};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "datebook")]
#[command(about = "Book calendar dates with a short reason")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month with its bookings
    Show {
        /// Year to show (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Month to show, 1-12 (defaults to the current month)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
    /// Book a date, replacing any existing booking for it
    Book {
        /// Date as YEAR-MONTH-DAY without zero-padding (e.g. 2023-1-5), or "today"
        #[arg(value_parser = parse_date)]
        date: DateKey,

        /// Reason for the booking. An empty reason removes the booking.
        #[arg(num_args = 0.., trailing_var_arg = true)]
        reason: Vec<String>,
    },
    /// Remove the booking for a date
    Unbook {
        #[arg(value_parser = parse_date)]
        date: DateKey,
    },
    /// Print the reason booked for a date
    Get {
        #[arg(value_parser = parse_date)]
        date: DateKey,
    },
    /// List every booking
    List,
    /// Pick days interactively and book, change or remove them
    Pick {
        #[arg(short, long)]
        year: Option<i32>,

        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
    /// Show config and storage paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { year, month } => commands::show::run(open_store()?, year, month),
        Commands::Book { date, reason } => {
            commands::book::run(&mut open_store()?, date, &reason.join(" "))
        }
        Commands::Unbook { date } => commands::unbook::run(&mut open_store()?, date),
        Commands::Get { date } => commands::get::run(&open_store()?, date),
        Commands::List => commands::list::run(&open_store()?),
        Commands::Pick { year, month } => commands::pick::run(open_store()?, year, month),
        Commands::Config => commands::config::run(),
    }
}

fn open_store() -> Result<BookingStore<FileStore>> {
    let config = DatebookConfig::load()?;
    let backend = config.file_store();
    tracing::debug!(path = %backend.path().display(), "opening booking store");
    Ok(BookingStore::load(backend))
}

fn parse_date(s: &str) -> Result<DateKey, String> {
    if s == "today" {
        return DateKey::from_date(chrono::Local::now().date_naive()).map_err(|e| e.to_string());
    }
    DateKey::parse(s).map_err(|e| e.to_string())
}
