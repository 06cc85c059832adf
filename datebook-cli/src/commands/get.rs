use anyhow::Result;
use datebook_core::storage::KeyValueStore;
use datebook_core::{BookingStore, DateKey};

pub fn run<S: KeyValueStore>(store: &BookingStore<S>, date: DateKey) -> Result<()> {
    match store.lookup(&date) {
        Some(reason) => {
            println!("{reason}");
            Ok(())
        }
        None => anyhow::bail!("No booking on {date}"),
    }
}
