use std::path::PathBuf;

use clap::{Parser, Subcommand};
use classgrab::{
    commands::{run_download, run_resume, BatchOptions, CrawlOptions},
    DEFAULT_IMAGE_DIR, DEFAULT_INDEX_FILE, DEFAULT_WORKERS, FIRST_PAGE,
};

#[derive(Debug, Parser)]
#[command(name = "classgrab")]
#[command(about = "Archives photos from a classroom activity feed", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Crawl the activity feed, write the index and download every image.
    Download {
        /// What page number to start at.
        #[arg(long, default_value_t = FIRST_PAGE)]
        start_page: u32,

        /// What page number to end at.
        #[arg(long)]
        end_page: Option<u32>,

        /// The account number to fetch.
        #[arg(long)]
        account: String,

        /// The session cookie value to authenticate with.
        #[arg(long)]
        session_value: String,

        /// Where the resumable index file is written.
        #[arg(long, default_value = DEFAULT_INDEX_FILE)]
        index_file: PathBuf,

        /// Skip downloading images and only write the index file.
        #[arg(long)]
        index_only: bool,

        /// Save images directly under the image dir instead of year/month folders.
        #[arg(long)]
        flatten: bool,

        /// Number of parallel download workers.
        #[arg(long, default_value_t = DEFAULT_WORKERS)]
        workers: usize,

        /// Directory the images are saved under.
        #[arg(long, default_value = DEFAULT_IMAGE_DIR)]
        image_dir: PathBuf,
    },

    /// Download from a previously written index instead of re-crawling.
    Resume {
        /// Index file written by a previous download run.
        #[arg(long, default_value = DEFAULT_INDEX_FILE)]
        index_file: PathBuf,

        /// Save images directly under the image dir instead of year/month folders.
        #[arg(long)]
        flatten: bool,

        /// Number of parallel download workers.
        #[arg(long, default_value_t = DEFAULT_WORKERS)]
        workers: usize,

        /// Directory the images are saved under.
        #[arg(long, default_value = DEFAULT_IMAGE_DIR)]
        image_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("classgrab error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> classgrab::Result<()> {
    match Cli::parse().command {
        CliCommand::Download {
            start_page,
            end_page,
            account,
            session_value,
            index_file,
            index_only,
            flatten,
            workers,
            image_dir,
        } => {
            run_download(CrawlOptions {
                start_page,
                end_page,
                account,
                session_value,
                index_file,
                index_only,
                batch: BatchOptions {
                    image_dir,
                    flatten,
                    workers,
                },
            })
            .await
        }
        CliCommand::Resume {
            index_file,
            flatten,
            workers,
            image_dir,
        } => run_resume(index_file, BatchOptions { image_dir, flatten, workers }).await,
    }
}
