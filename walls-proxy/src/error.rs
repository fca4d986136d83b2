#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("fetching {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error(transparent)]
    Parse(#[from] walls_parser::Error),

    #[error("no closures found on the page, page format changed?")]
    NoEntries,
}

pub type Result<T> = std::result::Result<T, Error>;
