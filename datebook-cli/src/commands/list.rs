use anyhow::Result;
use datebook_core::storage::KeyValueStore;
use datebook_core::{BookingEntry, BookingStore};

use crate::render::render_agenda;

pub fn run<S: KeyValueStore>(store: &BookingStore<S>) -> Result<()> {
    let mut entries: Vec<&BookingEntry> = store.entries().iter().collect();
    entries.sort_by_key(|entry| entry.date);

    println!("{}", render_agenda(&entries));
    Ok(())
}
