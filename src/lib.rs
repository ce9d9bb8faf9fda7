//! Scrapes a classroom activity feed and archives every photo it links to.
//!
//! The feed is a paginated HTML table behind a session cookie. Crawling walks
//! the pages until one comes back empty, the discovered images are persisted
//! to a JSON index so a later run can resume without re-scraping, and the
//! signed links are downloaded with a bounded worker pool.

pub mod commands;
pub mod crawl;
pub mod download;
pub mod error;
pub mod fetch;
pub mod index;
mod macros;
pub mod model;
mod parse;

pub use error::{Error, Result};

/// Base URL of the activity feed; the account id is appended per request.
pub const ACTIVITY_FEED_ROOT: &str = "https://classroom.kindercare.com/accounts";
/// Cookie that carries the session. Its value is supplied by the caller.
pub const SESSION_COOKIE_NAME: &str = "_himama_session";
/// Page numbering starts here; the first page is served unparameterized.
pub const FIRST_PAGE: u32 = 1;
pub const DEFAULT_WORKERS: usize = 10;
pub const DEFAULT_IMAGE_DIR: &str = "downloads";
pub const DEFAULT_INDEX_FILE: &str = "index.json";
