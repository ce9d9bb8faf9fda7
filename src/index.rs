use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::{model::Image, Error, Result};

/// On-disk snapshot of a crawl, so downloads can resume without re-scraping.
/// `earliest`/`latest` are derived from `images` at write time; the signed
/// links inside expire a few hours after the crawl that produced them.
#[derive(Debug, Serialize, Deserialize)]
pub struct Index {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
    pub images: Vec<Image>,
}

/// Serializes `images` to `path`, bounds recomputed from scratch.
///
/// The JSON lands in a sibling temp file first and is renamed into place, so
/// a crash mid-write can't leave a truncated index behind. Writing an empty
/// crawl is refused: an index without images has no bounds and nothing to
/// resume.
pub async fn write_index(path: &Path, images: &[Image]) -> Result<()> {
    let earliest = images.iter().map(|i| i.date).min().ok_or(Error::EmptyIndex)?;
    let latest = images.iter().map(|i| i.date).max().ok_or(Error::EmptyIndex)?;
    let index = Index {
        earliest,
        latest,
        images: images.to_vec(),
    };

    let json = serde_json::to_string(&index)?;
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, json).await?;
    fs::rename(&temp_path, path).await?;
    Ok(())
}

/// Reads a previously written index back into images.
pub async fn read_index(path: &Path) -> Result<Vec<Image>> {
    let raw = fs::read_to_string(path).await?;
    let index: Index = serde_json::from_str(&raw)?;
    Ok(index.images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn image(date: &str, name: &str) -> Image {
        Image::new(
            date.parse::<NaiveDate>().unwrap(),
            name,
            format!("https://cdn.test/{name}"),
        )
    }

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.json");
        let images = vec![
            image("2023-03-01", "a.jpg"),
            image("2022-11-20", "b.jpg"),
            image("2023-01-15", "c.jpg"),
        ];

        write_index(&path, &images).await.unwrap();
        let read_back = read_index(&path).await.unwrap();
        assert_eq!(read_back, images);

        // Bounds are the true min/max over the images, not insertion order.
        let raw = std::fs::read_to_string(&path).unwrap();
        let index: Index = serde_json::from_str(&raw).unwrap();
        assert_eq!(index.earliest, NaiveDate::from_ymd_opt(2022, 11, 20).unwrap());
        assert_eq!(index.latest, NaiveDate::from_ymd_opt(2023, 3, 1).unwrap());
    }

    #[tokio::test]
    async fn empty_write_is_refused() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.json");
        let result = write_index(&path, &[]).await;
        assert!(matches!(result, Err(Error::EmptyIndex)));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn malformed_json_is_a_format_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            read_index(&path).await,
            Err(Error::IndexFormat(_))
        ));
    }

    #[tokio::test]
    async fn missing_images_key_is_a_format_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.json");
        std::fs::write(&path, r#"{"earliest":"2023-01-01","latest":"2023-01-02"}"#).unwrap();
        assert!(matches!(
            read_index(&path).await,
            Err(Error::IndexFormat(_))
        ));
    }

    #[tokio::test]
    async fn no_temp_file_left_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.json");
        write_index(&path, &[image("2023-01-15", "a.jpg")]).await.unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }
}
