//! Calendar controller.
//!
//! Owns the displayed month, the selected date and the booking store. A
//! rendering surface reads `header`/`annotated_grid`, and drives the one
//! set of prompt actions (`submit`, `delete_selected`, `cancel`) which act
//! on whatever date is currently selected.

use chrono::NaiveDate;

use crate::booking::BookingStore;
use crate::date_key::DateKey;
use crate::error::{DatebookError, DatebookResult};
use crate::grid::{self, CalendarMonth, Cell, Grid};
use crate::storage::KeyValueStore;

/// A grid cell paired with the booking shown in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotatedCell<'a> {
    Empty,
    Day {
        day: u32,
        key: DateKey,
        reason: Option<&'a str>,
    },
}

pub struct CalendarApp<S: KeyValueStore> {
    month: CalendarMonth,
    selected: Option<DateKey>,
    store: BookingStore<S>,
}

impl<S: KeyValueStore> CalendarApp<S> {
    /// Start on the month containing `today`.
    pub fn new(store: BookingStore<S>, today: NaiveDate) -> DatebookResult<Self> {
        Ok(CalendarApp {
            month: CalendarMonth::containing(today)?,
            selected: None,
            store,
        })
    }

    pub fn month(&self) -> &CalendarMonth {
        &self.month
    }

    pub fn store(&self) -> &BookingStore<S> {
        &self.store
    }

    /// Show `month_index` (0 is January) of `year`. Clears the selection.
    pub fn navigate(&mut self, year: i32, month_index: u32) -> DatebookResult<()> {
        self.month = CalendarMonth::new(year, month_index)?;
        self.selected = None;
        Ok(())
    }

    pub fn next_month(&mut self) -> DatebookResult<()> {
        self.month = self.month.next()?;
        self.selected = None;
        Ok(())
    }

    pub fn previous_month(&mut self) -> DatebookResult<()> {
        self.month = self.month.previous()?;
        self.selected = None;
        Ok(())
    }

    /// "January, 2023"
    pub fn header(&self) -> String {
        format!("{}, {}", self.month.month_name(), self.month.year)
    }

    pub fn grid(&self) -> DatebookResult<Grid> {
        grid::layout(self.month.year, self.month.month_index)
    }

    /// Rows of the current grid with each day's booking attached.
    pub fn annotated_grid(&self) -> DatebookResult<Vec<Vec<AnnotatedCell<'_>>>> {
        let grid = self.grid()?;
        let rows = grid
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Cell::Empty => AnnotatedCell::Empty,
                        Cell::Day { day, key } => AnnotatedCell::Day {
                            day: *day,
                            key: *key,
                            reason: self.store.lookup(key),
                        },
                    })
                    .collect()
            })
            .collect();
        Ok(rows)
    }

    /// Select `day` of the displayed month.
    pub fn select(&mut self, day: u32) -> DatebookResult<DateKey> {
        let key = self.month.date_key(day).ok_or_else(|| DatebookError::InvalidDay {
            day,
            month: self.header(),
            day_count: self.month.day_count,
        })?;
        self.selected = Some(key);
        Ok(key)
    }

    pub fn selected(&self) -> Option<&DateKey> {
        self.selected.as_ref()
    }

    /// Reason already booked on the selected date, to prefill a prompt.
    pub fn selected_reason(&self) -> Option<&str> {
        self.selected.as_ref().and_then(|key| self.store.lookup(key))
    }

    /// Book the selected date. Returns the reason it replaced.
    pub fn submit(&mut self, reason: &str) -> DatebookResult<Option<String>> {
        let key = self.selected.take().ok_or(DatebookError::NoSelection)?;
        tracing::debug!(date = %key, "submitting booking");
        self.store.upsert(key, reason)
    }

    /// Remove the booking on the selected date. Returns whether one existed.
    pub fn delete_selected(&mut self) -> DatebookResult<bool> {
        let key = self.selected.take().ok_or(DatebookError::NoSelection)?;
        tracing::debug!(date = %key, "deleting booking");
        self.store.delete(&key)
    }

    /// Drop the selection without touching the store.
    pub fn cancel(&mut self) {
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn app_on(year: i32, month: u32, day: u32) -> CalendarApp<MemoryStore> {
        let store = BookingStore::load(MemoryStore::new());
        CalendarApp::new(store, NaiveDate::from_ymd_opt(year, month, day).unwrap()).unwrap()
    }

    fn key(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    #[test]
    fn test_starts_on_todays_month() {
        let app = app_on(2023, 1, 15);
        assert_eq!(app.header(), "January, 2023");
        assert_eq!(app.grid().unwrap().rows.len(), 5);
        assert!(app.selected().is_none());
    }

    #[test]
    fn test_select_submit_then_grid_shows_booking() {
        let mut app = app_on(2023, 1, 15);
        assert_eq!(app.select(1).unwrap(), key("2023-1-1"));
        app.submit("Meeting").unwrap();
        assert!(app.selected().is_none());

        let rows = app.annotated_grid().unwrap();
        assert_eq!(
            rows[0][0],
            AnnotatedCell::Day {
                day: 1,
                key: key("2023-1-1"),
                reason: Some("Meeting")
            }
        );
        assert_eq!(
            rows[0][1],
            AnnotatedCell::Day {
                day: 2,
                key: key("2023-1-2"),
                reason: None
            }
        );
    }

    #[test]
    fn test_resubmit_replaces_and_prefills() {
        let mut app = app_on(2023, 1, 15);
        app.select(10).unwrap();
        app.submit("X").unwrap();

        app.select(10).unwrap();
        assert_eq!(app.selected_reason(), Some("X"));
        let previous = app.submit("Y").unwrap();

        assert_eq!(previous.as_deref(), Some("X"));
        assert_eq!(app.store().lookup(&key("2023-1-10")), Some("Y"));
        assert_eq!(app.store().len(), 1);
    }

    #[test]
    fn test_delete_selected() {
        let mut app = app_on(2023, 1, 15);
        app.select(3).unwrap();
        app.submit("Trip").unwrap();

        app.select(3).unwrap();
        assert!(app.delete_selected().unwrap());
        assert!(app.store().is_empty());

        app.select(3).unwrap();
        assert!(!app.delete_selected().unwrap());
    }

    #[test]
    fn test_cancel_leaves_store_untouched() {
        let mut app = app_on(2023, 1, 15);
        app.select(3).unwrap();
        app.cancel();

        assert!(app.selected().is_none());
        assert!(app.store().is_empty());
        assert!(matches!(app.submit("late"), Err(DatebookError::NoSelection)));
        assert!(matches!(app.delete_selected(), Err(DatebookError::NoSelection)));
    }

    #[test]
    fn test_select_rejects_days_outside_month() {
        let mut app = app_on(2023, 2, 1);
        assert!(matches!(app.select(29), Err(DatebookError::InvalidDay { day: 29, .. })));
        assert!(matches!(app.select(0), Err(DatebookError::InvalidDay { day: 0, .. })));
        assert!(app.select(28).is_ok());
    }

    #[test]
    fn test_selection_follows_displayed_month() {
        let mut app = app_on(2023, 1, 15);
        app.navigate(2024, 1).unwrap();
        assert_eq!(app.header(), "February, 2024");
        assert_eq!(app.select(29).unwrap(), key("2024-2-29"));

        app.next_month().unwrap();
        assert!(app.selected().is_none());
        assert_eq!(app.header(), "March, 2024");
        assert_eq!(app.select(29).unwrap(), key("2024-3-29"));
    }

    #[test]
    fn test_navigation_wraps_and_validates() {
        let mut app = app_on(2023, 1, 15);
        app.previous_month().unwrap();
        assert_eq!(app.header(), "December, 2022");
        app.next_month().unwrap();
        assert_eq!(app.header(), "January, 2023");

        assert!(matches!(app.navigate(2023, 12), Err(DatebookError::InvalidMonth(12))));
        assert!(matches!(app.navigate(-1, 0), Err(DatebookError::InvalidYear(-1))));
        assert_eq!(app.header(), "January, 2023");
    }
}
