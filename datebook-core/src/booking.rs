//! Booking store: at most one reason per date, mirrored to key-value storage.

use serde::{Deserialize, Serialize};

use crate::date_key::DateKey;
use crate::error::{DatebookError, DatebookResult};
use crate::storage::KeyValueStore;

/// Storage key the bookings live under. Existing save data uses this key.
pub const STORAGE_KEY: &str = "save";

/// A reason attached to a date.
///
/// Serialized as a two-element array `[date, reason]`, the shape existing
/// save data is stored in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(DateKey, String)", into = "(DateKey, String)")]
pub struct BookingEntry {
    pub date: DateKey,
    pub reason: String,
}

impl From<(DateKey, String)> for BookingEntry {
    fn from((date, reason): (DateKey, String)) -> Self {
        BookingEntry { date, reason }
    }
}

impl From<BookingEntry> for (DateKey, String) {
    fn from(entry: BookingEntry) -> Self {
        (entry.date, entry.reason)
    }
}

/// The single writable copy of the bookings.
///
/// Every mutation is written through to the backing store before it returns.
/// If that write fails the in-memory change is kept and the caller gets a
/// `StorageWrite` error, so it can warn that the change may not survive a
/// reload.
pub struct BookingStore<S: KeyValueStore> {
    entries: Vec<BookingEntry>,
    backend: S,
}

impl<S: KeyValueStore> BookingStore<S> {
    /// Load bookings from `backend`. Missing or unreadable data starts an
    /// empty store.
    pub fn load(backend: S) -> Self {
        let mut store = BookingStore {
            entries: Vec::new(),
            backend,
        };
        store.reload();
        store
    }

    /// Re-read the backing store, discarding in-memory state.
    pub fn reload(&mut self) {
        self.entries = match self.backend.get(STORAGE_KEY) {
            Ok(Some(raw)) => decode_entries(&raw),
            Ok(None) => {
                tracing::debug!("no saved bookings, starting empty");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not read saved bookings, starting empty");
                Vec::new()
            }
        };
        tracing::debug!(count = self.entries.len(), "loaded bookings");
    }

    /// Write every entry to the backing store.
    pub fn persist(&mut self) -> DatebookResult<()> {
        let json = serde_json::to_string(&self.entries)
            .map_err(|e| DatebookError::Serialization(e.to_string()))?;

        self.backend.set(STORAGE_KEY, &json).map_err(|e| match e {
            DatebookError::StorageWrite(_) => e,
            other => DatebookError::StorageWrite(other.to_string()),
        })?;

        tracing::debug!(count = self.entries.len(), "persisted bookings");
        Ok(())
    }

    /// Book `date` for `reason`, replacing any existing booking for that date.
    ///
    /// A blank reason removes the booking instead, so a booking always has
    /// text to show. Returns the reason that was replaced, if any.
    pub fn upsert(&mut self, date: DateKey, reason: &str) -> DatebookResult<Option<String>> {
        let previous = self.remove_all(&date);

        if reason.trim().is_empty() {
            tracing::debug!(%date, "blank reason, removing booking");
        } else {
            self.entries.push(BookingEntry {
                date,
                reason: reason.to_string(),
            });
        }

        self.persist()?;
        Ok(previous)
    }

    /// Remove the booking for `date`. Returns whether one existed.
    pub fn delete(&mut self, date: &DateKey) -> DatebookResult<bool> {
        let removed = self.remove_all(date).is_some();
        self.persist()?;
        Ok(removed)
    }

    pub fn lookup(&self, date: &DateKey) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| &entry.date == date)
            .map(|entry| entry.reason.as_str())
    }

    pub fn contains(&self, date: &DateKey) -> bool {
        self.lookup(date).is_some()
    }

    /// Entries in the order they were booked.
    pub fn entries(&self) -> &[BookingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bookings in the given month (zero-based index), earliest first.
    pub fn bookings_in_month(&self, year: i32, month_index: u32) -> Vec<&BookingEntry> {
        let mut found: Vec<&BookingEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.date.year() == year && entry.date.month_index() == month_index)
            .collect();
        found.sort_by_key(|entry| entry.date);
        found
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Drop every entry for `date`, returning the most recent reason.
    fn remove_all(&mut self, date: &DateKey) -> Option<String> {
        let mut previous = None;
        self.entries.retain(|entry| {
            if &entry.date == date {
                previous = Some(entry.reason.clone());
                false
            } else {
                true
            }
        });
        previous
    }
}

/// Decode saved `[[date, reason], ...]` data.
///
/// Pairs that don't decode are skipped. Older data can hold several pairs
/// for one date; the last one wins, as it did when rendered.
fn decode_entries(raw: &str) -> Vec<BookingEntry> {
    let pairs: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(pairs) => pairs,
        Err(e) => {
            tracing::warn!(error = %e, "saved bookings are not a JSON array, starting empty");
            return Vec::new();
        }
    };

    let mut entries: Vec<BookingEntry> = Vec::with_capacity(pairs.len());
    for pair in pairs {
        match serde_json::from_value::<BookingEntry>(pair.clone()) {
            Ok(entry) => {
                entries.retain(|existing| existing.date != entry.date);
                entries.push(entry);
            }
            Err(e) => tracing::warn!(error = %e, %pair, "skipping unreadable booking"),
        }
    }
    entries
}
