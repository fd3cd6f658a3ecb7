use serde::{Deserialize, Serialize};

/// One scraped job announcement row.
///
/// `symbol` is the requisition code and the posting's identity; two postings
/// with the same symbol are the same posting regardless of the other fields.
/// Dates are kept as the display strings shown on the listing page.
#[derive(Debug, Clone, PartialEq)]
pub struct JobPosting {
    pub symbol: String,
    pub title: String,
    pub jurisdiction: String,
    pub link: String,
    pub issue_date: String,
    pub closing_date: String,
}

/// On-disk shape of the processed-jobs history.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct HistoryFile {
    pub processed_jobs: Vec<String>,
}
