use std::path::Path;
use std::sync::Arc;

use filetime::FileTime;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tokio::{fs, io::AsyncWriteExt, sync::Semaphore, task::JoinSet};

use crate::{model::Image, Error, Result};

/// What happened to one image of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Saved { name: String },
    Failed { name: String, reason: String },
}

impl Outcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

/// Downloads every image with at most `workers` in flight, returning one
/// outcome per input in completion order.
///
/// This is a best-effort batch: a failed item is reported and counted, never
/// aborts its siblings. The progress bar advances on every completion,
/// success or failure alike. Existing files at a destination path are
/// overwritten without warning.
pub async fn download_all(
    images: &[Image],
    root: &Path,
    flatten: bool,
    workers: usize,
) -> Result<Vec<Outcome>> {
    let client = Client::new();

    let bar = ProgressBar::new(images.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{elapsed_precise}] {bar:40.cyan/blue} {pos:>5}/{len:5}")
            .expect("progress bar template is valid")
            .progress_chars("##-"),
    );
    bar.set_message(format!("Downloading {} images", images.len()));

    let semaphore = Arc::new(Semaphore::new(workers));
    let mut tasks = JoinSet::new();
    for image in images.iter().cloned() {
        // Client uses Arc internally so cloning per task is cheap.
        let client = client.clone();
        let semaphore = Arc::clone(&semaphore);
        let root = root.to_path_buf();
        tasks.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .expect("download semaphore never closes");
            match download_image(&client, &image, &root, flatten).await {
                Ok(()) => Outcome::Saved { name: image.name },
                Err(err) => Outcome::Failed {
                    name: image.name,
                    reason: err.to_string(),
                },
            }
        });
    }

    let mut outcomes = Vec::with_capacity(images.len());
    while let Some(joined) = tasks.join_next().await {
        let outcome = joined?;
        if let Outcome::Failed { name, reason } = &outcome {
            bar.println(format!("Image was not downloaded successfully: {name} ({reason})"));
        }
        bar.inc(1);
        outcomes.push(outcome);
    }
    bar.finish();

    Ok(outcomes)
}

/// Fetches one signed link and writes it to the image's destination path,
/// then stamps the file's access and modification times with the activity
/// date. Signed links need no session cookie.
async fn download_image(client: &Client, image: &Image, root: &Path, flatten: bool) -> Result<()> {
    let mut response = client.get(&image.link).send().await?;
    if !response.status().is_success() {
        return Err(Error::DownloadStatus {
            name: image.name.clone(),
            status: response.status(),
        });
    }

    let path = image.destination(root, flatten);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let mut file = fs::File::create(&path).await?;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    drop(file);

    let stamp = FileTime::from_unix_time(image.timestamp(), 0);
    filetime::set_file_times(&path, stamp, stamp)?;
    Ok(())
}
