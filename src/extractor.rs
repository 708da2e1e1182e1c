use anyhow::{Context, Result};
use regex::Regex;
use scraper::Html;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// CDN image link: fixed host, a UUID path segment, anything up to the
/// last `.webp` before a space.
static IMAGE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"https://cdn\.midjourney\.com/[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}/[^ ]+\.webp",
    )
    .expect("image URL pattern is valid")
});

/// Reads a saved feed page and returns every image link in document order.
pub fn extract(path: &Path) -> Result<Vec<String>> {
    let markup = fs::read_to_string(path)
        .with_context(|| format!("Failed to read feed page {}", path.display()))?;
    Ok(extract_from_markup(&markup))
}

/// Parses `markup` leniently, re-serializes it and scans the text.
/// Duplicates are kept; nothing is normalized.
pub fn extract_from_markup(markup: &str) -> Vec<String> {
    let text = Html::parse_document(markup).html();
    IMAGE_URL
        .find_iter(&text)
        .map(|m| m.as_str().to_string())
        .collect()
}
