use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Browser-like headers sent unchanged with every image request.
pub const FEED_HEADERS: &[(&str, &str)] = &[
    (
        "user-agent",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    ),
    (
        "accept",
        "image/avif,image/webp,image/apng,image/svg+xml,image/*,*/*;q=0.8",
    ),
    ("accept-language", "en-US,en;q=0.9"),
    ("referer", "https://www.midjourney.com/"),
    ("origin", "https://www.midjourney.com"),
    ("sec-fetch-dest", "image"),
    ("sec-fetch-mode", "no-cors"),
    ("sec-fetch-site", "same-site"),
];

pub fn feed_headers() -> Result<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(FEED_HEADERS.len());
    for (name, value) in FEED_HEADERS {
        let name = HeaderName::from_static(name);
        let value = HeaderValue::from_str(value)
            .with_context(|| format!("Invalid value for header {}", name))?;
        headers.insert(name, value);
    }
    Ok(headers)
}
