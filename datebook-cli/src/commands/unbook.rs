use anyhow::Result;
use datebook_core::storage::KeyValueStore;
use datebook_core::{BookingStore, DateKey};
use owo_colors::OwoColorize;

pub fn run<S: KeyValueStore>(store: &mut BookingStore<S>, date: DateKey) -> Result<()> {
    let previous = store.lookup(&date).map(str::to_string);

    if store.delete(&date)? {
        let reason = previous.unwrap_or_default();
        println!("{}", format!("  Removed: {date} ({reason})").red());
    } else {
        println!("{}", format!("  Nothing booked on {date}").dimmed());
    }

    Ok(())
}
