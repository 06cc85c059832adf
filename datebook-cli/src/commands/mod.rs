pub mod book;
pub mod config;
pub mod get;
pub mod list;
pub mod pick;
pub mod show;
pub mod unbook;

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use datebook_core::app::CalendarApp;
use datebook_core::storage::KeyValueStore;
use datebook_core::BookingStore;

/// Open the controller on the requested month, defaulting to today's.
/// `month` is 1-based, as typed on the command line.
pub fn open_app<S: KeyValueStore>(
    store: BookingStore<S>,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<CalendarApp<S>> {
    open_app_on(store, Local::now().date_naive(), year, month)
}

/// A lone `year` keeps today's month, a lone `month` keeps today's year.
fn open_app_on<S: KeyValueStore>(
    store: BookingStore<S>,
    today: NaiveDate,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<CalendarApp<S>> {
    let mut app = CalendarApp::new(store, today)?;

    if year.is_some() || month.is_some() {
        let year = year.unwrap_or(today.year());
        let month_index = month.map(|m| m - 1).unwrap_or(today.month0());
        app.navigate(year, month_index)?;
    }

    Ok(app)
}
