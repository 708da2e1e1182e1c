use crate::manifest::ManifestStore;
use crate::models::{DownloadRecord, FetchOutcome};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use uuid::Uuid;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const FILE_EXTENSION: &str = "webp";

/// One GET per call. Implementations never return errors: every failure is
/// folded into the outcome so the batch can move on.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn fetch(&self, url: &str) -> FetchOutcome;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(headers: HeaderMap) -> Result<Self> {
        Self::with_timeout(headers, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(headers: HeaderMap, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return FetchOutcome::Failed(e.to_string()),
        };

        if response.status() != StatusCode::OK {
            return FetchOutcome::Rejected(response.status().as_u16());
        }

        match response.bytes().await {
            Ok(body) => FetchOutcome::Fetched(body.to_vec()),
            Err(e) => FetchOutcome::Failed(e.to_string()),
        }
    }
}

pub const NO_URLS_MESSAGE: &str = "No image URLs provided.";

fn rejected_message(url: &str, status: u16) -> String {
    format!("Failed to download {} - Status code: {}", url, status)
}

fn failed_message(url: &str, reason: &str) -> String {
    format!("An error occurred while downloading {}: {}", url, reason)
}

pub struct Downloader<F> {
    fetcher: F,
    output_dir: PathBuf,
    manifest: Option<ManifestStore>,
}

impl<F: Fetch> Downloader<F> {
    pub fn new(fetcher: F, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            output_dir: output_dir.into(),
            manifest: None,
        }
    }

    pub fn with_manifest(mut self, enabled: bool) -> Self {
        self.manifest = enabled.then(|| ManifestStore::new(&self.output_dir));
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Downloads `urls` one after another into the output directory.
    ///
    /// `next_id` names each saved file and is called once per successful
    /// download. Bad statuses and transport errors are printed and skipped;
    /// only local filesystem failures end the batch early.
    pub async fn fetch_all(&self, urls: &[String], mut next_id: impl FnMut() -> Uuid) -> Result<()> {
        if urls.is_empty() {
            println!("{}", NO_URLS_MESSAGE);
            return Ok(());
        }

        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("Failed to create output directory {}", self.output_dir.display())
        })?;

        let pb = ProgressBar::new(urls.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg} {bar:40} {pos}/{len}")?
                .progress_chars("=>-"),
        );
        pb.set_message("Downloading");

        for url in urls {
            match self.fetcher.fetch(url).await {
                FetchOutcome::Fetched(body) => {
                    let file_name = format!("{}.{}", next_id(), FILE_EXTENSION);
                    let output_path = self.output_dir.join(&file_name);

                    fs::write(&output_path, &body).with_context(|| {
                        format!("Failed to write {}", output_path.display())
                    })?;

                    if let Some(store) = &self.manifest {
                        store.append(&DownloadRecord {
                            url: url.clone(),
                            file_name,
                        })?;
                    }
                }
                FetchOutcome::Rejected(status) => {
                    pb.suspend(|| println!("{}", rejected_message(url, status)))
                }
                FetchOutcome::Failed(reason) => {
                    pb.suspend(|| println!("{}", failed_message(url, &reason)))
                }
            }
            pb.inc(1);
        }

        pb.finish();

        Ok(())
    }
}
