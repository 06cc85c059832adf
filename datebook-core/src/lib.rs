//! Core types for datebook.
//!
//! - `booking`: the booking store, one reason per date, persisted through a
//!   `storage::KeyValueStore`
//! - `grid`: month grid layout
//! - `app`: the controller tying the displayed month, the selected date and
//!   the store together

pub mod app;
pub mod booking;
pub mod config;
pub mod date_key;
pub mod error;
pub mod grid;
pub mod storage;

pub use booking::{BookingEntry, BookingStore};
pub use date_key::DateKey;
pub use error::{DatebookError, DatebookResult};
