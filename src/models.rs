use serde::{Deserialize, Serialize};

/// Result of a single request; the batch loop only logs the failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Status 200 with the full body.
    Fetched(Vec<u8>),
    /// Any other status code.
    Rejected(u16),
    /// Transport failure: connect, DNS, TLS, timeout or broken body.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRecord {
    pub url: String,
    pub file_name: String,
}
