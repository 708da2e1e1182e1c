mod cli;
mod downloader;
mod extractor;
mod headers;
mod manifest;
mod models;

use anyhow::Result;
use clap::Parser;
use uuid::Uuid;

use crate::cli::Args;
use crate::downloader::{Downloader, HttpFetcher};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let image_urls = extractor::extract(&args.input)?;
    println!(
        "Loaded {} image URLs from {}",
        image_urls.len(),
        args.input.display()
    );

    let fetcher = HttpFetcher::new(headers::feed_headers()?)?;
    let downloader = Downloader::new(fetcher, args.output_dir()).with_manifest(args.manifest);

    if !image_urls.is_empty() {
        println!("Saving to {}", downloader.output_dir().display());
    }

    downloader.fetch_all(&image_urls, Uuid::new_v4).await?;

    Ok(())
}
