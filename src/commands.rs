//! Orchestration behind the two CLI subcommands.

use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::{
    crawl::crawl,
    download::download_all,
    echo,
    fetch::Fetcher,
    index::{read_index, write_index},
    model::Image,
    Error, Result,
};

pub struct CrawlOptions {
    pub start_page: u32,
    pub end_page: Option<u32>,
    pub account: String,
    pub session_value: String,
    pub index_file: PathBuf,
    pub index_only: bool,
    pub batch: BatchOptions,
}

pub struct BatchOptions {
    pub image_dir: PathBuf,
    pub flatten: bool,
    pub workers: usize,
}

/// Full pipeline: crawl the feed, write the index, then download everything
/// unless `index_only` asked for the index alone.
pub async fn run_download(opts: CrawlOptions) -> Result<()> {
    let start = Local::now();
    let fetcher = Fetcher::new(&opts.account, &opts.session_value);
    let images = crawl(opts.start_page, opts.end_page, |page| {
        let fetcher = fetcher.clone();
        async move { fetcher.fetch_page(page).await }
    })
    .await?;

    write_index(&opts.index_file, &images).await?;
    echo!(
        "Wrote index file to {} with {} images",
        opts.index_file.display(),
        images.len()
    );

    if opts.index_only {
        echo!("Skipping download due to index-only");
        return Ok(());
    }

    download_batch(&images, &opts.batch, start).await
}

/// Resume pipeline: read an index written earlier and download from it.
/// Signed links expire a few hours after the crawl, so stale indexes mostly
/// produce per-item failures.
pub async fn run_resume(index_file: PathBuf, batch: BatchOptions) -> Result<()> {
    let start = Local::now();
    let images = read_index(&index_file).await?;
    echo!("Read {} images from {}", images.len(), index_file.display());
    download_batch(&images, &batch, start).await
}

async fn download_batch(
    images: &[Image],
    batch: &BatchOptions,
    start: DateTime<Local>,
) -> Result<()> {
    let outcomes = download_all(images, &batch.image_dir, batch.flatten, batch.workers).await?;
    let failed = outcomes.iter().filter(|o| o.is_failed()).count();
    echo!(
        start,
        "Downloaded {} images, {} failed",
        outcomes.len() - failed,
        failed
    );
    if failed > 0 {
        return Err(Error::Downloads {
            failed,
            total: outcomes.len(),
        });
    }
    Ok(())
}
