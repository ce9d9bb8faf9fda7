use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One photo discovered in the activity feed.
///
/// `link` is a pre-signed URL and is only good for a few hours after the
/// crawl, so downloads should follow promptly. `name` comes straight from the
/// feed's `download` attribute and is used verbatim when building paths; a
/// hostile filename containing separators can escape the output root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Activity date, serialized as an ISO calendar date (`2023-01-15`).
    pub date: NaiveDate,
    pub name: String,
    pub link: String,
}

impl Image {
    pub fn new(date: NaiveDate, name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
            link: link.into(),
        }
    }

    /// Where the image lands under `root`. Flattened mode ignores the date;
    /// otherwise files partition into `root/<year>/<month>/`, both segments
    /// unpadded decimals.
    pub fn destination(&self, root: &Path, flatten: bool) -> PathBuf {
        if flatten {
            root.join(&self.name)
        } else {
            root.join(self.date.year().to_string())
                .join(self.date.month().to_string())
                .join(&self.name)
        }
    }

    /// Unix timestamp of the activity date at midnight UTC, used to restore
    /// file modification times after download.
    pub fn timestamp(&self) -> i64 {
        self.date.and_time(NaiveTime::MIN).and_utc().timestamp()
    }
}
