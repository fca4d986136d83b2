use tracing::{debug, info};
use walls_parser::{parse_schedule, Calendar};

use crate::error::{Error, Result};
use crate::source::LineSource;

/// Fetch, parse and serialize, start to finish.
pub struct Pipeline<S> {
    source: S,
}

impl<S: LineSource + Sync> Pipeline<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn run(&self) -> Result<Vec<u8>> {
        let lines = self.source.lines().await?;

        let entries = parse_schedule(&lines)?;
        if entries.is_empty() {
            return Err(Error::NoEntries);
        }

        info!(entries = entries.len(), "parsed closures");

        let bytes = Calendar::build(&entries).serialize()?;
        debug!(bytes = bytes.len(), "serialized calendar");

        Ok(bytes)
    }
}
