use chrono::NaiveDateTime;
use ics::{
    escape_text,
    properties::{DtEnd, DtStart, Summary},
    ICalendar,
};

use crate::{Calendar, CalendarEvent, Result, ScheduleEntry};

pub const PRODUCT_ID: &str = "-//walls-closed//antoneri.github.io//";
pub const VERSION: &str = "2.0";

fn format_date_time(date_time: &NaiveDateTime) -> String {
    date_time.format("%Y%m%dT%H%M%S").to_string()
}

impl CalendarEvent {
    /// `index` is the position of `entry` in the schedule and keeps identical
    /// rows apart.
    #[must_use]
    pub fn new(index: usize, entry: &ScheduleEntry) -> Self {
        Self {
            index,
            stamp: entry.start,
            start: entry.start,
            end: entry.end,
            title: entry.summary.clone(),
        }
    }
}

impl Calendar {
    /// One event per entry, in the order given.
    #[must_use]
    pub fn build(entries: &[ScheduleEntry]) -> Self {
        Self {
            product_id: PRODUCT_ID.to_string(),
            version: VERSION.to_string(),
            events: entries
                .iter()
                .enumerate()
                .map(|(index, entry)| CalendarEvent::new(index, entry))
                .collect(),
        }
    }

    #[must_use]
    pub fn to_ics(&self) -> ICalendar<'_> {
        let mut icalendar = ICalendar::new(self.version.as_str(), self.product_id.as_str());

        for event in &self.events {
            icalendar.add_event(event.to_ics());
        }

        icalendar
    }

    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.to_ics().write(&mut bytes)?;
        Ok(bytes)
    }
}

impl CalendarEvent {
    #[must_use]
    pub fn to_ics(&self) -> ics::Event<'_> {
        let start = format_date_time(&self.start);
        let end = format_date_time(&self.end);

        let id = format!("{}-{}-{}@walls-closed", self.index, start, end);

        let mut ics_event = ics::Event::new(id, format_date_time(&self.stamp));

        ics_event.push(DtStart::new(start));
        ics_event.push(DtEnd::new(end));
        ics_event.push(Summary::new(escape_text(self.title.as_str())));

        ics_event
    }
}
