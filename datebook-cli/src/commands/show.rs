use anyhow::Result;
use datebook_core::storage::KeyValueStore;
use datebook_core::BookingStore;

use super::open_app;
use crate::render::{render_agenda, render_month};

pub fn run<S: KeyValueStore>(
    store: BookingStore<S>,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<()> {
    let app = open_app(store, year, month)?;
    let rows = app.annotated_grid()?;

    println!("{}", render_month(&app.header(), &rows, None));
    println!();

    let month = app.month();
    let bookings = app.store().bookings_in_month(month.year, month.month_index);
    println!("{}", render_agenda(&bookings));

    Ok(())
}
