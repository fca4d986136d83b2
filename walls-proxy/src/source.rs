use std::future::Future;

use tokio::time::Duration;
use tracing::debug;
use walls_parser::extract_lines;

use crate::error::{Error, Result};

/// Something that yields the trimmed text lines of the schedule page.
pub trait LineSource {
    fn lines(&self) -> impl Future<Output = Result<Vec<String>>> + Send;
}

pub struct HttpSource {
    client: reqwest::Client,
    url: String,
    selector: String,
}

impl HttpSource {
    pub fn new(url: String, selector: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| Error::Fetch {
                url: url.clone(),
                source,
            })?;

        Ok(Self {
            client,
            url,
            selector,
        })
    }

    async fn fetch_html(&self) -> reqwest::Result<String> {
        self.client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

impl LineSource for HttpSource {
    fn lines(&self) -> impl Future<Output = Result<Vec<String>>> + Send {
        async move {
            debug!(url = %self.url, "fetching page");

            let html = self.fetch_html().await.map_err(|source| Error::Fetch {
                url: self.url.clone(),
                source,
            })?;

            let lines = extract_lines(&html, &self.selector)?;
            debug!(lines = lines.len(), selector = %self.selector, "extracted page text");

            Ok(lines)
        }
    }
}
