use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::{Error, ParserState, Result, ScheduleEntry};

macro_rules! regex {
    ($pattern:expr) => {{
        static REGEX: Lazy<Regex> = Lazy::new(|| Regex::new($pattern).unwrap());
        &REGEX
    }};
}

/// Swedish month abbreviations as they appear on the schedule page.
const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "maj", "jun", "jul", "aug", "sep", "okt", "nov", "dec",
];

/// Maps a month abbreviation to its ordinal, ignoring case.
#[must_use]
pub fn month_number(token: &str) -> Option<u32> {
    let token = token.to_lowercase();
    MONTHS
        .iter()
        .zip(1..)
        .find_map(|(name, number)| (*name == token).then_some(number))
}

/// Parses closure rows out of the text lines of the schedule page.
///
/// Rows only count once a year has been seen; a month token outside of
/// the Swedish abbreviations aborts the whole parse, since that means the page
/// layout changed.
pub fn parse_schedule<I, S>(lines: I) -> Result<Vec<ScheduleEntry>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut state = ParserState::default();
    let mut entries = Vec::new();

    for (idx, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        let line_number = idx + 1;

        if let Some(next) = year_token(line).and_then(|year| state.with_year(year)) {
            debug!(year = next.current_year, line = line_number, "entering year");
            state = next;
            continue;
        }

        if let Some(entry) = parse_entry(line, line_number, &state)? {
            entries.push(entry);
        }
    }

    Ok(entries)
}

fn year_token(line: &str) -> Option<i32> {
    regex!(r"\b(20\d\d)\b")
        .captures(line)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}

fn parse_entry(
    line: &str,
    line_number: usize,
    state: &ParserState,
) -> Result<Option<ScheduleEntry>> {
    let Some(captures) = regex!(
        r"(?P<day>\d{1,2})\s*(?P<month>\p{L}+)\s*(?P<start>\d{1,2}:\d\d)\s*-\s*(?P<end>\d{1,2}:\d\d)\s*(?P<summary>\S.*)"
    )
    .captures(line) else {
        return Ok(None);
    };

    let token = &captures["month"];
    let month = month_number(token).ok_or_else(|| Error::UnknownMonth {
        line: line_number,
        token: token.to_string(),
    })?;

    let Some(year) = state.current_year else {
        trace!(line = line_number, "skipping row before any year");
        return Ok(None);
    };

    // one or two digits always fit, and day 0 is rejected as a date below
    let day = captures["day"].parse::<u32>().unwrap_or(0);

    let at = |time: &str| {
        date_time(year, month, day, time).ok_or_else(|| Error::InvalidDate {
            line: line_number,
            year,
            month,
            day,
            time: time.to_string(),
        })
    };

    let start = at(&captures["start"])?;
    let end = at(&captures["end"])?;

    if end <= start {
        return Err(Error::InvertedRange {
            line: line_number,
            start: captures["start"].to_string(),
            end: captures["end"].to_string(),
        });
    }

    Ok(Some(ScheduleEntry {
        start,
        end,
        summary: captures["summary"].trim().to_string(),
    }))
}

fn date_time(year: i32, month: u32, day: u32, time: &str) -> Option<NaiveDateTime> {
    let (hour, minute) = time.split_once(':')?;

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(
        hour.parse().ok()?,
        minute.parse().ok()?,
        0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn parses_row_in_year_context() {
        let entries = parse_schedule(["2019", "3 jan 07:00-21:00 Climbing wall closed"]).unwrap();

        assert_eq!(
            entries,
            vec![ScheduleEntry {
                start: at(2019, 1, 3, 7, 0),
                end: at(2019, 1, 3, 21, 0),
                summary: "Climbing wall closed".to_string(),
            }]
        );
    }

    #[test]
    fn maps_every_month() {
        for (idx, name) in MONTHS.iter().enumerate() {
            assert_eq!(month_number(name), Some(idx as u32 + 1));
        }

        assert_eq!(month_number("Maj"), Some(5));
        assert_eq!(month_number("may"), None);
        assert_eq!(month_number(""), None);
    }

    #[test]
    fn skips_rows_before_year() {
        let entries = parse_schedule([
            "Stängt för underhåll",
            "3 jan 07:00-21:00 Väggen stängd",
            "2020",
            "4 feb 10:00-12:00 Kurs",
        ])
        .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].start, at(2020, 2, 4, 10, 0));
    }

    #[test]
    fn unknown_month_fails_without_year() {
        let err = parse_schedule(["5 xyz 07:00-21:00 Closed"]).unwrap_err();

        assert!(matches!(&err, Error::UnknownMonth { line: 1, token } if token == "xyz"));
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn unknown_month_fails_with_year() {
        let err = parse_schedule(["2019", "3 jan 07:00-21:00 Ok", "5 xyz 07:00-21:00 Closed"])
            .unwrap_err();

        assert!(matches!(err, Error::UnknownMonth { line: 3, .. }));
    }

    #[test]
    fn repeated_year_is_not_a_new_context() {
        let entries = parse_schedule([
            "2019",
            "3 jan 07:00-21:00 A",
            "2020",
            "4 jan 07:00-21:00 B",
            "2019",
            "5 jan 07:00-21:00 C",
        ])
        .unwrap();

        let years = entries.iter().map(|e| e.start.format("%Y").to_string()).collect::<Vec<_>>();
        assert_eq!(years, ["2019", "2020", "2020"]);
    }

    #[test]
    fn repeated_year_line_is_read_as_row() {
        let entries = parse_schedule(["2019", "3 jan 07:00-21:00 Stängt 2019"]).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].summary, "Stängt 2019");
    }

    #[test]
    fn state_records_each_year_once() {
        let state = ParserState::default();
        let state = state.with_year(2019).unwrap();

        assert_eq!(state.current_year, Some(2019));
        assert!(state.with_year(2019).is_none());
        assert_eq!(state.with_year(2020).unwrap().current_year, Some(2020));
    }

    #[test]
    fn keeps_same_day_rows() {
        let entries = parse_schedule([
            "2021",
            "12 mar 07:00-10:00 Morgon",
            "12 mar 18:00-21:00 Kväll",
        ])
        .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].summary, "Morgon");
        assert_eq!(entries[1].summary, "Kväll");
    }

    #[test]
    fn tolerates_loose_spacing() {
        let entries = parse_schedule(["2022", "Obs: 9okt 7:30 - 9:00   Tävling  "]).unwrap();

        assert_eq!(entries[0].start, at(2022, 10, 9, 7, 30));
        assert_eq!(entries[0].end, at(2022, 10, 9, 9, 0));
        assert_eq!(entries[0].summary, "Tävling");
    }

    #[test]
    fn rejects_impossible_dates() {
        let err = parse_schedule(["2019", "30 feb 07:00-21:00 Stängt"]).unwrap_err();
        assert!(matches!(err, Error::InvalidDate { line: 2, day: 30, month: 2, .. }));
        assert_eq!(err.kind(), ErrorKind::Date);

        let err = parse_schedule(["2019", "3 jan 07:00-25:00 Stängt"]).unwrap_err();
        assert!(matches!(err, Error::InvalidDate { time, .. } if time == "25:00"));

        let err = parse_schedule(["2019", "3 jan 07:61-08:00 Stängt"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Date);
    }

    #[test]
    fn rejects_inverted_range() {
        let err = parse_schedule(["2019", "3 jan 21:00-07:00 Stängt"]).unwrap_err();

        assert!(matches!(err, Error::InvertedRange { line: 2, .. }));
        assert_eq!(err.kind(), ErrorKind::Date);
    }

    #[test]
    fn ignores_unrelated_lines() {
        let entries = parse_schedule([
            "Klättring",
            "2019",
            "Öppettider",
            "Mån-fre 07:00-21:00",
            "3 jan 07:00-21:00 Stängt",
        ])
        .unwrap();

        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn empty_input_is_empty_schedule() {
        let entries = parse_schedule(Vec::<String>::new()).unwrap();
        assert!(entries.is_empty());
    }
}
