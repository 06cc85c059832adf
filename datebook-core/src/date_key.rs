//! Canonical date identifiers.
//!
//! A `DateKey` is the string form a booking is stored under: `Y-M-D` with a
//! 1-based month and day and no zero-padding (`2023-1-1`). The format is the
//! one existing save data already uses, so it is parsed strictly and always
//! rendered back the same way.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{DatebookError, DatebookResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Build a key from a 1-based month and day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> DatebookResult<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            DatebookError::InvalidDateKey {
                key: format!("{year}-{month}-{day}"),
                reason: "no such date".into(),
            }
        })?;
        Self::from_date(date)
    }

    pub fn from_date(date: NaiveDate) -> DatebookResult<Self> {
        if date.year() < 0 {
            return Err(DatebookError::InvalidDateKey {
                key: date.to_string(),
                reason: "negative years are not supported".into(),
            });
        }
        Ok(DateKey(date))
    }

    pub fn parse(s: &str) -> DatebookResult<Self> {
        let invalid = |reason: &str| DatebookError::InvalidDateKey {
            key: s.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = s.split('-').collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(invalid("expected YEAR-MONTH-DAY"));
        };

        let year = parse_component(year).map_err(|e| invalid(&format!("year {e}")))?;
        let month = parse_component(month).map_err(|e| invalid(&format!("month {e}")))?;
        let day = parse_component(day).map_err(|e| invalid(&format!("day {e}")))?;

        let year = i32::try_from(year).map_err(|_| invalid("year out of range"))?;

        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| invalid("no such date"))?;
        Self::from_date(date)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// 1-based month.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Zero-based month, as used by the grid model.
    pub fn month_index(&self) -> u32 {
        self.0.month0()
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

/// Parse one unpadded decimal component.
fn parse_component(s: &str) -> Result<u32, &'static str> {
    if s.is_empty() {
        return Err("is empty");
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err("must be decimal digits");
    }
    if s.len() > 1 && s.starts_with('0') {
        return Err("must not be zero-padded");
    }
    s.parse().map_err(|_| "out of range")
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}-{}", self.year(), self.month(), self.day())
    }
}

impl FromStr for DateKey {
    type Err = DatebookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateKey::parse(s)
    }
}

impl TryFrom<String> for DateKey {
    type Error = DatebookError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        DateKey::parse(&s)
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_legacy_format() {
        let key = DateKey::parse("2023-1-1").unwrap();
        assert_eq!((key.year(), key.month(), key.day()), (2023, 1, 1));
        assert_eq!(key.month_index(), 0);
        assert_eq!(key.to_string(), "2023-1-1");

        let key: DateKey = "2024-12-31".parse().unwrap();
        assert_eq!(key.to_string(), "2024-12-31");
    }

    #[test]
    fn test_parse_rejects_zero_padding() {
        let err = DateKey::parse("2023-01-01").unwrap_err();
        assert!(err.to_string().contains("zero-padded"), "got: {err}");
        assert!(DateKey::parse("2023-1-01").is_err());
        assert!(DateKey::parse("02023-1-1").is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        let inputs = [
            "",
            "2023",
            "2023-1",
            "2023-1-1-1",
            "2023/1/1",
            "-2023-1-1",
            "2023-+1-1",
            "abcd-1-1",
            "2023-1- 1",
        ];
        for input in inputs {
            assert!(DateKey::parse(input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn test_parse_rejects_nonexistent_dates() {
        assert!(DateKey::parse("2023-2-29").is_err());
        assert!(DateKey::parse("2023-13-1").is_err());
        assert!(DateKey::parse("2023-4-31").is_err());
        assert!(DateKey::parse("2023-1-0").is_err());
        assert!(DateKey::parse("2024-2-29").is_ok());
    }

    #[test]
    fn test_from_ymd_matches_parse() {
        let built = DateKey::from_ymd(2023, 7, 4).unwrap();
        assert_eq!(built, DateKey::parse("2023-7-4").unwrap());
        assert!(DateKey::from_ymd(2023, 2, 30).is_err());
    }

    #[test]
    fn test_ordering_is_chronological() {
        let mut keys: Vec<DateKey> = ["2023-10-1", "2023-2-15", "2022-12-31", "2023-2-3"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        keys.sort();
        let rendered: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        assert_eq!(rendered, ["2022-12-31", "2023-2-3", "2023-2-15", "2023-10-1"]);
    }

    #[test]
    fn test_serde_as_plain_string() {
        let key = DateKey::parse("2023-3-9").unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2023-3-9\"");
        let back: DateKey = serde_json::from_str("\"2023-3-9\"").unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<DateKey>("\"2023-03-09\"").is_err());
    }
}
