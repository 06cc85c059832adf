use anyhow::Result;
use datebook_core::app::CalendarApp;
use datebook_core::storage::KeyValueStore;
use datebook_core::{BookingStore, DatebookError};
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;

use super::open_app;
use crate::render::render_month;

const MONTH_ACTIONS: [&str; 4] = ["Pick a day", "Next month", "Previous month", "Quit"];
const BOOKING_ACTIONS: [&str; 3] = ["Submit", "Delete", "Cancel"];

pub fn run<S: KeyValueStore>(
    store: BookingStore<S>,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<()> {
    let mut app = open_app(store, year, month)?;

    loop {
        let rows = app.annotated_grid()?;
        println!();
        println!("{}", render_month(&app.header(), &rows, app.selected()));
        println!();

        let action = Select::new()
            .with_prompt("  What next?")
            .items(&MONTH_ACTIONS)
            .default(0)
            .interact()?;

        match action {
            0 => pick_day(&mut app)?,
            1 => app.next_month()?,
            2 => app.previous_month()?,
            _ => return Ok(()),
        }
    }
}

/// Select a day, then submit, delete or cancel a booking for it.
fn pick_day<S: KeyValueStore>(app: &mut CalendarApp<S>) -> Result<()> {
    let day_count = app.month().day_count;

    let key = loop {
        let day: u32 = Input::new()
            .with_prompt(format!("  Day (1-{day_count})"))
            .interact_text()?;
        match app.select(day) {
            Ok(key) => break key,
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    };

    let current = app.selected_reason().unwrap_or_default().to_string();
    let reason: String = Input::new()
        .with_prompt(format!("  Reason for {key}"))
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;

    let choice = Select::new()
        .items(&BOOKING_ACTIONS)
        .default(0)
        .interact()?;

    let result = match choice {
        0 => app.submit(&reason).map(|_| ()),
        1 => app.delete_selected().map(|_| ()),
        _ => {
            app.cancel();
            Ok(())
        }
    };

    match result {
        Ok(()) => Ok(()),
        // Keep the session going; the booking is held in memory
        Err(e @ DatebookError::StorageWrite(_)) => {
            eprintln!("  {}", e.to_string().yellow());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
