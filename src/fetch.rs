use reqwest::{header, Client};

use crate::{
    model::Image, parse::parse_feed, Error, Result, ACTIVITY_FEED_ROOT, FIRST_PAGE,
    SESSION_COOKIE_NAME,
};

/// Authenticated access to one account's activity feed.
///
/// The underlying `Client` pools connections, so one `Fetcher` should serve
/// the whole crawl.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    feed_root: String,
    account: String,
    session_value: String,
}

impl Fetcher {
    pub fn new(account: impl Into<String>, session_value: impl Into<String>) -> Self {
        Self::with_feed_root(ACTIVITY_FEED_ROOT, account, session_value)
    }

    /// Same as [`Fetcher::new`] but against a different feed root. Lets tests
    /// point the crawl at a local server.
    pub fn with_feed_root(
        feed_root: impl Into<String>,
        account: impl Into<String>,
        session_value: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            feed_root: feed_root.into(),
            account: account.into(),
            session_value: session_value.into(),
        }
    }

    /// Fetches one feed page and parses it into images.
    ///
    /// The first page is requested without a `page` parameter, matching how
    /// the feed serves it; later pages go through `?page=<n>`. An empty
    /// result means the crawl ran past the last page. Any non-success status
    /// (expired session included) is fatal.
    pub async fn fetch_page(&self, page: u32) -> Result<Vec<Image>> {
        let url = format!("{}/{}/activities", self.feed_root, self.account);
        let mut request = self.client.get(&url).header(
            header::COOKIE,
            format!("{SESSION_COOKIE_NAME}={}", self.session_value),
        );
        if page != FIRST_PAGE {
            request = request.query(&[("page", page)]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Error::FetchStatus {
                page,
                status: response.status(),
            });
        }

        let html = response.text().await?;
        parse_feed(&html)
    }
}
