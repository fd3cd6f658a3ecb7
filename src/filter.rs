use std::collections::HashSet;

use crate::types::JobPosting;

/// Keep postings that have not been notified before and whose title
/// contains at least one keyword, case-insensitively.
///
/// Pure and order-preserving. An empty keyword list matches nothing.
pub fn filter_jobs(
    jobs: &[JobPosting],
    keywords: &[String],
    history: &HashSet<String>,
) -> Vec<JobPosting> {
    jobs.iter()
        .filter(|job| !history.contains(&job.symbol))
        .filter(|job| {
            let title = job.title.to_lowercase();
            keywords.iter().any(|kw| title.contains(&kw.to_lowercase()))
        })
        .cloned()
        .collect()
}
