use anyhow::{anyhow, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use marquee_client::api::{BookingApi, HttpBookingApi};
use marquee_client::form::{BookingForm, LastBookingView, SubmitOutcome, SEAT_ERROR_MESSAGE};
use marquee_client::runtime::CountdownTicker;
use marquee_client::storage::FileSelectionStore;
use marquee_core::booking::SeatLabel;
use marquee_core::catalog;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "marquee", about = "Book that show!!", version)]
struct Cli {
    /// Base URL of the booking service
    #[arg(long, default_value = "http://localhost:8080")]
    api_url: String,

    /// File holding the persisted selections between runs
    #[arg(long, default_value = "marquee-state.json")]
    state_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the most recently stored booking
    Latest,
    /// Show the current selection, price, and countdown
    Status,
    /// Select a movie (replaces any previous selection)
    Movie { name: String },
    /// Select a time slot (replaces any previous selection)
    Slot { label: String },
    /// Set seat counts, e.g. A1=2 D2=1
    Seats { counts: Vec<String> },
    /// Submit the current selection as a booking
    Book,
    /// Copy the last stored booking back into the selection
    BookAgain,
    /// Toggle the dark-mode preference
    Theme,
    /// Print the countdown every minute until interrupted
    Watch,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "marquee_client=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let store = Arc::new(FileSelectionStore::open(&cli.state_file));
    let mut form = BookingForm::restore(store);
    let api = HttpBookingApi::new(cli.api_url.as_str());

    match cli.command {
        Command::Latest => {
            form.apply_latest(api.latest().await);
            print_last_booking(&form);
        }
        Command::Status => print_status(&form),
        Command::Movie { name } => {
            if !catalog::is_listed_movie(&name) {
                bail!("unknown movie {:?}; pick one of: {}", name, catalog::MOVIES.join(", "));
            }
            form.select_movie(&name);
            println!("Movie: {}", name);
        }
        Command::Slot { label } => {
            if !catalog::is_listed_slot(&label) {
                bail!("unknown slot {:?}; pick one of: {}", label, catalog::SLOTS.join(", "));
            }
            form.select_slot(&label);
            println!("Slot: {}", label);
            if let Some(countdown) = form.countdown(Local::now().naive_local()) {
                println!("{}", countdown);
            }
        }
        Command::Seats { counts } => {
            for entry in counts {
                let (label, count) = entry
                    .split_once('=')
                    .ok_or_else(|| anyhow!("expected LABEL=COUNT, got {:?}", entry))?;
                let label: SeatLabel = label.parse()?;
                form.set_seat_count(label, count);
            }
            print_status(&form);
        }
        Command::Book => match form.submit(&api).await {
            SubmitOutcome::Booked => println!("Booking successful!"),
            SubmitOutcome::Invalid => {
                // One-shot run, so clear the transient flag here instead of
                // through the 4 s timer an embedded UI would use.
                form.clear_seat_error();
                println!("{}", SEAT_ERROR_MESSAGE);
            }
            SubmitOutcome::Failed(err) => {
                tracing::error!("Submit failed: {}", err);
                println!("Booking failed. Please try again.");
            }
        },
        Command::BookAgain => {
            form.apply_latest(api.latest().await);
            if form.book_again() {
                print_status(&form);
            } else {
                println!("No previous booking to copy.");
            }
        }
        Command::Theme => {
            form.toggle_dark_mode();
            println!("Dark mode: {}", if form.dark_mode() { "on" } else { "off" });
        }
        Command::Watch => {
            if form.slot().is_none() {
                bail!("select a slot first");
            }
            let form = Arc::new(Mutex::new(form));
            let ticker = CountdownTicker::start(form, |countdown| {
                if let Some(countdown) = countdown {
                    println!("{}", countdown);
                }
            });
            tokio::signal::ctrl_c().await?;
            ticker.stop();
        }
    }

    Ok(())
}

fn print_status(form: &BookingForm) {
    println!("Movie: {}", form.movie().unwrap_or("(none)"));
    println!("Slot:  {}", form.slot().unwrap_or("(none)"));
    for (label, count) in form.seats().iter() {
        println!("  {}: {}", label, count);
    }
    let total = form.total_seats();
    if total > 0 {
        println!("Total: \u{20b9}{} ({} seat{})", form.total_price(), total, if total > 1 { "s" } else { "" });
    } else {
        println!("Total: \u{20b9}0");
    }
    if let Some(countdown) = form.countdown(Local::now().naive_local()) {
        println!("{}", countdown);
    }
}

fn print_last_booking(form: &BookingForm) {
    match form.last_booking() {
        LastBookingView::Loading => println!("Loading last booking..."),
        LastBookingView::Message(message) => println!("{}", message),
        LastBookingView::Booking(summary) => {
            println!("seats:");
            for (label, count) in summary.seats.iter() {
                println!("  {}: {}", label, count);
            }
            println!("slot: {}", summary.slot);
            println!("movie: {}", summary.movie);
        }
    }
}
