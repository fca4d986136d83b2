use scraper::{Html, Selector};

use crate::{Error, Result};

/// Collects the trimmed, non-empty text nodes below the first element matching
/// `selector`, in document order.
pub fn extract_lines<S: AsRef<str>>(html: S, selector: &str) -> Result<Vec<String>> {
    let parsed = Selector::parse(selector).map_err(|_| Error::InvalidSelector(selector.to_string()))?;
    let html = Html::parse_document(html.as_ref());

    let content = html
        .select(&parsed)
        .next()
        .ok_or_else(|| Error::MissingContent(selector.to_string()))?;

    Ok(content
        .text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .collect())
}
