use crate::models::DownloadRecord;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "manifest.jsonl";

/// Sidecar file mapping each saved file back to the URL it came from.
///
/// One JSON object per line, appended as soon as the image is on disk, so
/// an interrupted run still lists everything it saved.
pub struct ManifestStore {
    path: PathBuf,
}

impl ManifestStore {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            path: output_dir.join(MANIFEST_FILE),
        }
    }

    pub fn append(&self, record: &DownloadRecord) -> Result<()> {
        let mut line = serde_json::to_string(record).context("Failed to serialize manifest record")?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open manifest {}", self.path.display()))?;
        file.write_all(line.as_bytes())
            .with_context(|| format!("Failed to append to manifest {}", self.path.display()))
    }

    pub fn records(&self) -> Result<Vec<DownloadRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).context("Failed to read manifest file")?;

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str(line)
                    .with_context(|| format!("Failed to parse manifest line {}", idx + 1))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str, file_name: &str) -> DownloadRecord {
        DownloadRecord {
            url: url.to_string(),
            file_name: file_name.to_string(),
        }
    }

    #[test]
    fn missing_manifest_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ManifestStore::new(dir.path());

        assert!(store.records().unwrap().is_empty());
    }

    #[test]
    fn appended_records_read_back_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = ManifestStore::new(dir.path());
        let first = record("https://cdn.midjourney.com/a/0_0.webp", "one.webp");
        let second = record("https://cdn.midjourney.com/a/0_0.webp", "two.webp");

        store.append(&first).unwrap();
        store.append(&second).unwrap();

        let content = fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert_eq!(store.records().unwrap(), vec![first, second]);
    }

    #[test]
    fn append_keeps_lines_from_earlier_stores() {
        let dir = tempfile::tempdir().unwrap();
        ManifestStore::new(dir.path())
            .append(&record("u1", "a.webp"))
            .unwrap();
        ManifestStore::new(dir.path())
            .append(&record("u2", "b.webp"))
            .unwrap();

        let records = ManifestStore::new(dir.path()).records().unwrap();
        assert_eq!(records, vec![record("u1", "a.webp"), record("u2", "b.webp")]);
    }

    #[test]
    fn corrupt_line_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(MANIFEST_FILE),
            "{\"url\":\"u1\",\"file_name\":\"a.webp\"}\n{not json\n",
        )
        .unwrap();

        let err = ManifestStore::new(dir.path()).records().unwrap_err();
        assert!(err.to_string().contains("Failed to parse manifest line 2"));
    }
}
