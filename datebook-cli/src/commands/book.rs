use anyhow::Result;
use datebook_core::storage::KeyValueStore;
use datebook_core::{BookingStore, DateKey};
use owo_colors::OwoColorize;

pub fn run<S: KeyValueStore>(
    store: &mut BookingStore<S>,
    date: DateKey,
    reason: &str,
) -> Result<()> {
    let previous = store.upsert(date, reason)?;

    if reason.trim().is_empty() {
        match previous {
            Some(old) => println!("{}", format!("  Removed: {date} ({old})").red()),
            None => println!("{}", format!("  Nothing booked on {date}").dimmed()),
        }
        return Ok(());
    }

    println!("{}", format!("  Booked: {date} {reason}").green());
    if let Some(old) = previous {
        println!("  {}", format!("replaced: {old}").dimmed());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use datebook_core::booking::STORAGE_KEY;
    use datebook_core::storage::MemoryStore;

    #[test]
    fn test_book_replaces_then_blank_reason_removes() {
        let date = DateKey::parse("2023-1-1").unwrap();
        let mut store = BookingStore::load(MemoryStore::new());

        run(&mut store, date, "Meeting").unwrap();
        run(&mut store, date, "Team lunch").unwrap();
        assert_eq!(store.lookup(&date), Some("Team lunch"));
        assert_eq!(store.len(), 1);

        run(&mut store, date, "  ").unwrap();
        assert_eq!(store.lookup(&date), None);
        assert_eq!(store.backend().get(STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_book_blank_reason_on_free_date_is_noop() {
        let date = DateKey::parse("2023-1-2").unwrap();
        let mut store = BookingStore::load(MemoryStore::new());

        run(&mut store, date, "").unwrap();
        assert!(store.is_empty());
    }
}
