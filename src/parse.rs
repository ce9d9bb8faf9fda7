use chrono::NaiveDate;
use scraper::{Html, Selector};

use crate::{model::Image, Error, Result};

/// Date format the feed renders into the table, e.g. `01/15/23`.
const FEED_DATE_FORMAT: &str = "%m/%d/%y";

/// Extracts every image row from one page of the activity feed.
///
/// The feed serves a single table; each body row is one activity. Cell 1
/// holds the date and the last cell holds the download anchor, whose `href`
/// is the signed link and whose `download` attribute is the filename. A page
/// past the end of the feed has no table at all, which parses as an empty
/// list rather than an error.
///
/// A malformed row (missing cells, missing anchor, unparsable date) aborts
/// the whole page: the feed's schema drifting is something we want to hear
/// about, not skip past.
pub(crate) fn parse_feed(html: &str) -> Result<Vec<Image>> {
    let doc = Html::parse_document(html);

    let table_selector = selector("table")?;
    let row_selector = selector("table tbody tr")?;
    let cell_selector = selector("td")?;
    let anchor_selector = selector("a")?;

    if doc.select(&table_selector).next().is_none() {
        // Past the last page the feed renders a "no activities" blurb.
        return Ok(Vec::new());
    }

    let mut images = Vec::new();
    for row in doc.select(&row_selector) {
        let cells = row.select(&cell_selector).collect::<Vec<_>>();

        let date_text = cells
            .get(1)
            .ok_or(Error::MalformedRow("row has no date cell"))?
            .text()
            .collect::<String>();
        let date_text = date_text.trim();
        let date = NaiveDate::parse_from_str(date_text, FEED_DATE_FORMAT).map_err(|source| {
            Error::BadDate {
                raw: date_text.to_owned(),
                source,
            }
        })?;

        let anchor = cells
            .last()
            .ok_or(Error::MalformedRow("row has no cells"))?
            .select(&anchor_selector)
            .next()
            .ok_or(Error::MalformedRow("row has no download anchor"))?;
        let link = anchor
            .value()
            .attr("href")
            .ok_or(Error::MalformedRow("anchor has no href"))?;
        let name = anchor
            .value()
            .attr("download")
            .ok_or(Error::MalformedRow("anchor has no download attribute"))?;

        images.push(Image::new(date, name, link));
    }
    Ok(images)
}

#[inline]
fn selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::BadSelector(sel_str.into()))
}
