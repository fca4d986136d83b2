//! Turns the climbing wall closure schedule of a web page into an iCalendar
//! document.

mod error;
mod ics;
mod lines;
mod parser;
mod structs;

pub use error::{Error, ErrorKind, Result};
pub use crate::ics::{PRODUCT_ID, VERSION};
pub use lines::extract_lines;
pub use parser::{month_number, parse_schedule};
pub use structs::{Calendar, CalendarEvent, ParserState, ScheduleEntry};
