use std::io;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("line {line}: unknown month `{token}`, page format changed?")]
    UnknownMonth { line: usize, token: String },

    #[error("line {line}: {year}-{month:02}-{day} {time} is not a valid date and time")]
    InvalidDate {
        line: usize,
        year: i32,
        month: u32,
        day: u32,
        time: String,
    },

    #[error("line {line}: closing time {end} is not after opening time {start}")]
    InvertedRange {
        line: usize,
        start: String,
        end: String,
    },

    #[error("page has no element matching `{0}`")]
    MissingContent(String),

    #[error("invalid content selector `{0}`")]
    InvalidSelector(String),

    #[error("serializing calendar: {0}")]
    Serialization(#[from] io::Error),
}

/// Coarse classification used when reporting failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Format,
    Date,
    Serialization,
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownMonth { .. } | Self::MissingContent(_) | Self::InvalidSelector(_) => {
                ErrorKind::Format
            }
            Self::InvalidDate { .. } | Self::InvertedRange { .. } => ErrorKind::Date,
            Self::Serialization(_) => ErrorKind::Serialization,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
