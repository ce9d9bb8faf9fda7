use std::future::Future;

use crate::{echo, model::Image, Result};

/// Hitting `end_page` stops the crawl after fetching that page, and that
/// page's rows are dropped. Long-standing behavior callers may rely on;
/// flip with care.
const DISCARD_END_PAGE_ROWS: bool = true;

/// Walks feed pages from `start_page` until one comes back empty or
/// `end_page` is reached, accumulating images in fetch order.
///
/// Pages must be fetched one at a time: whether the crawl is done can only be
/// seen from the page just fetched. `fetch_page` is any async page source;
/// production wires in [`crate::fetch::Fetcher::fetch_page`], tests stub it.
/// A fetch error aborts the crawl and discards everything accumulated.
pub async fn crawl<F, Fut>(
    start_page: u32,
    end_page: Option<u32>,
    mut fetch_page: F,
) -> Result<Vec<Image>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<Image>>>,
{
    let mut images = Vec::new();
    for page in start_page.. {
        echo!("Fetching images from page {}", page);
        let page_images = fetch_page(page).await?;
        if page_images.is_empty() {
            echo!("Page {} had no images, assuming done.", page);
            break;
        }
        if end_page == Some(page) {
            echo!("Hit end page {}", page);
            if !DISCARD_END_PAGE_ROWS {
                images.extend(page_images);
            }
            break;
        }
        images.extend(page_images);
    }
    Ok(images)
}
