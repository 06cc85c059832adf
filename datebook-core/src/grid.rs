//! Month grid layout.
//!
//! Lays a month out in week rows of seven cells, Sunday first. Rows are only
//! emitted while a day of the month remains to be placed, so a month takes
//! four to six rows.

use chrono::{Datelike, Month, NaiveDate};

use crate::date_key::DateKey;
use crate::error::{DatebookError, DatebookResult};

pub const DAYS_PER_WEEK: usize = 7;
pub const MAX_ROWS: usize = 6;

/// Short weekday labels in column order.
pub const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] =
    ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A month of the proleptic Gregorian calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMonth {
    pub year: i32,
    /// Zero-based: 0 is January.
    pub month_index: u32,
    /// Weekday of the 1st, 0 is Sunday.
    pub start_weekday: u32,
    pub day_count: u32,
}

impl CalendarMonth {
    pub fn new(year: i32, month_index: u32) -> DatebookResult<Self> {
        if year < 0 {
            return Err(DatebookError::InvalidYear(year));
        }
        if month_index > 11 {
            return Err(DatebookError::InvalidMonth(month_index));
        }

        let first = first_of_month(year, month_index + 1)?;
        let (next_year, next_month) = if month_index == 11 {
            (year + 1, 1)
        } else {
            (year, month_index + 2)
        };
        let next_first = first_of_month(next_year, next_month)?;

        Ok(CalendarMonth {
            year,
            month_index,
            start_weekday: first.weekday().num_days_from_sunday(),
            day_count: (next_first - first).num_days() as u32,
        })
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> DatebookResult<Self> {
        Self::new(date.year(), date.month0())
    }

    /// "January" through "December".
    pub fn month_name(&self) -> &'static str {
        month_name(self.month_index)
    }

    pub fn next(&self) -> DatebookResult<Self> {
        if self.month_index == 11 {
            Self::new(self.year + 1, 0)
        } else {
            Self::new(self.year, self.month_index + 1)
        }
    }

    pub fn previous(&self) -> DatebookResult<Self> {
        if self.month_index == 0 {
            Self::new(self.year - 1, 11)
        } else {
            Self::new(self.year, self.month_index - 1)
        }
    }

    /// Key for `day` of this month, if the month has that day.
    pub fn date_key(&self, day: u32) -> Option<DateKey> {
        if day == 0 || day > self.day_count {
            return None;
        }
        DateKey::from_ymd(self.year, self.month_index + 1, day).ok()
    }

    /// Number of week rows the month occupies.
    pub fn row_count(&self) -> usize {
        let cells = (self.start_weekday + self.day_count) as usize;
        cells.div_ceil(DAYS_PER_WEEK).min(MAX_ROWS)
    }
}

pub fn month_name(month_index: u32) -> &'static str {
    u8::try_from(month_index + 1)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("")
}

fn first_of_month(year: i32, month: u32) -> DatebookResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| DatebookError::InvalidDateKey {
        key: format!("{year}-{month}-1"),
        reason: "year out of range".into(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Day { day: u32, key: DateKey },
}

impl Cell {
    pub fn date_key(&self) -> Option<&DateKey> {
        match self {
            Cell::Empty => None,
            Cell::Day { key, .. } => Some(key),
        }
    }
}

pub type Row = [Cell; DAYS_PER_WEEK];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub month: CalendarMonth,
    pub rows: Vec<Row>,
}

impl Grid {
    pub fn start_weekday(&self) -> u32 {
        self.month.start_weekday
    }

    pub fn day_count(&self) -> u32 {
        self.month.day_count
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Every day cell as `(row, col, day, key)`, in calendar order.
    pub fn day_cells(&self) -> impl Iterator<Item = (usize, usize, u32, DateKey)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| match cell {
                Cell::Day { day, key } => Some((row, col, *day, *key)),
                Cell::Empty => None,
            })
        })
    }
}

/// Lay out the month `month_index` (0 is January) of `year`.
pub fn layout(year: i32, month_index: u32) -> DatebookResult<Grid> {
    let month = CalendarMonth::new(year, month_index)?;
    let start = month.start_weekday as usize;

    let mut rows = Vec::with_capacity(MAX_ROWS);
    let mut next_day = 1;

    for i in 0..MAX_ROWS {
        if next_day > month.day_count {
            break;
        }

        let mut row = [Cell::Empty; DAYS_PER_WEEK];
        for (j, cell) in row.iter_mut().enumerate() {
            if j + DAYS_PER_WEEK * i >= start && next_day <= month.day_count {
                let key = DateKey::from_ymd(year, month_index + 1, next_day)?;
                *cell = Cell::Day { day: next_day, key };
                next_day += 1;
            }
        }
        rows.push(row);
    }

    Ok(Grid { month, rows })
}
