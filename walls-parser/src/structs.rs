use std::collections::BTreeSet;

use chrono::NaiveDateTime;

/// One closure row of the schedule. `start` and `end` fall on the same day and
/// `start < end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub summary: String,
}

/// Year context carried from one line to the next while parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserState {
    pub current_year: Option<i32>,
    seen_years: BTreeSet<i32>,
}

impl ParserState {
    /// Returns the state after encountering `year`, or `None` if that year was
    /// already recorded as a context.
    #[must_use]
    pub fn with_year(&self, year: i32) -> Option<Self> {
        if self.seen_years.contains(&year) {
            return None;
        }

        let mut seen_years = self.seen_years.clone();
        seen_years.insert(year);

        Some(Self {
            current_year: Some(year),
            seen_years,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub index: usize,
    pub stamp: NaiveDateTime,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    pub product_id: String,
    pub version: String,
    pub events: Vec<CalendarEvent>,
}
