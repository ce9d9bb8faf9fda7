use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The selector used to scrape the feed is invalid. Selector: {0}")]
    BadSelector(String),

    #[error("Malformed feed row: {0}")]
    MalformedRow(&'static str),

    #[error("Couldn't parse activity date {raw:?}: {source}")]
    BadDate {
        raw: String,
        source: chrono::ParseError,
    },

    #[error("Activity feed returned {status} for page {page}")]
    FetchStatus { page: u32, status: StatusCode },

    #[error("Download of {name} returned {status}")]
    DownloadStatus { name: String, status: StatusCode },

    #[error("Refusing to write an index with zero images")]
    EmptyIndex,

    #[error("Index file is malformed: {0}")]
    IndexFormat(#[from] serde_json::Error),

    #[error("{failed} of {total} downloads failed")]
    Downloads { failed: usize, total: usize },

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
