//! NJ Civil Service Commission job list scraper.
//!
//! Fetches the announcement listing page and extracts one [`JobPosting`]
//! per table row. Failures never reach the caller: transport errors, a
//! missing table, and malformed rows all degrade to fewer (or zero) results.

use std::time::Duration;

use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::{error, info, warn};
use url::Url;

use crate::types::JobPosting;

const BASE_URL: &str = "https://info.csc.nj.gov";
const JOB_LIST_URL: &str =
    "https://info.csc.nj.gov/jobannouncements/DefaultJobAnnouncement/JobList";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/91.0.4472.124 Safari/537.36";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Scrapes job listings from the NJ CSC website.
pub struct JobScraper {
    client: reqwest::blocking::Client,
}

impl JobScraper {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client })
    }

    /// Fetch the job list page and parse it. Any fetch failure is logged
    /// and yields an empty list.
    pub fn fetch_jobs(&self) -> Vec<JobPosting> {
        info!("fetching job list");

        let response = self
            .client
            .get(JOB_LIST_URL)
            .send()
            .and_then(|resp| resp.error_for_status());

        let body = match response.and_then(|resp| resp.text()) {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, "failed to fetch job list");
                return Vec::new();
            }
        };

        parse_jobs(&body)
    }
}

/// Extract job postings from the listing page HTML, in document order.
///
/// Rows with fewer than 8 cells are skipped silently; a row that fails
/// extraction is skipped with a warning and the rest still parse.
pub fn parse_jobs(html: &str) -> Vec<JobPosting> {
    let document = Html::parse_document(html);

    let (Ok(table_sel), Ok(row_sel), Ok(cell_sel), Ok(anchor_sel)) = (
        Selector::parse("table#RecordsSearched"),
        Selector::parse("tbody tr"),
        Selector::parse("td"),
        Selector::parse("a"),
    ) else {
        return Vec::new();
    };

    let Some(table) = document.select(&table_sel).next() else {
        error!("could not find job table with id 'RecordsSearched'");
        return Vec::new();
    };

    let Ok(base) = Url::parse(BASE_URL) else {
        return Vec::new();
    };

    let rows: Vec<_> = table.select(&row_sel).collect();
    info!(rows = rows.len(), "found rows in job table");

    let mut jobs = Vec::new();
    for row in rows {
        let cells: Vec<_> = row.select(&cell_sel).collect();
        if cells.len() < 8 {
            continue;
        }

        match parse_row(&cells, &anchor_sel, &base) {
            Ok(job) => jobs.push(job),
            Err(e) => warn!(error = %e, "error parsing row"),
        }
    }

    info!(jobs = jobs.len(), "successfully parsed jobs");
    jobs
}

/// Column layout of the announcements table:
/// col 0 holds the detail link, col 1 the symbol, col 2 the title,
/// col 3 the jurisdiction, cols 6 and 7 the issue and closing dates.
fn parse_row(cells: &[ElementRef], anchor_sel: &Selector, base: &Url) -> Result<JobPosting> {
    let link = match cells[0]
        .select(anchor_sel)
        .next()
        .and_then(|a| a.value().attr("href"))
    {
        Some(href) => base
            .join(href)
            .map_err(|e| anyhow!("bad link href {href:?}: {e}"))?
            .to_string(),
        None => String::new(),
    };

    Ok(JobPosting {
        symbol: cell_text(&cells[1]),
        title: cell_text(&cells[2]),
        jurisdiction: cell_text(&cells[3]),
        link,
        issue_date: cell_text(&cells[6]),
        closing_date: cell_text(&cells[7]),
    })
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<Vec<_>>().join(" ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING_HTML: &str = r#"
    <html>
        <body>
            <table id="RecordsSearched">
                <tbody>
                    <tr>
                        <td><a href="/ViewJob?id=123">View</a></td>
                        <td>M1234</td>
                        <td>Software Developer</td>
                        <td>Trenton</td>
                        <td>Dept of Tech</td>
                        <td>Residents</td>
                        <td>01/01/2026</td>
                        <td>01/31/2026</td>
                    </tr>
                    <tr>
                        <td><a href="/ViewJob?id=456">View</a></td>
                        <td>P5678</td>
                        <td>Systems Analyst</td>
                        <td>Newark</td>
                        <td>Dept of Labor</td>
                        <td>Residents</td>
                        <td>01/05/2026</td>
                        <td>02/15/2026</td>
                    </tr>
                </tbody>
            </table>
        </body>
    </html>
    "#;

    #[test]
    fn parse_listing_page() {
        let jobs = parse_jobs(LISTING_HTML);
        assert_eq!(jobs.len(), 2);

        let job1 = &jobs[0];
        assert_eq!(job1.symbol, "M1234");
        assert_eq!(job1.title, "Software Developer");
        assert_eq!(job1.jurisdiction, "Trenton");
        assert_eq!(job1.issue_date, "01/01/2026");
        assert_eq!(job1.closing_date, "01/31/2026");
        assert_eq!(job1.link, "https://info.csc.nj.gov/ViewJob?id=123");

        let job2 = &jobs[1];
        assert_eq!(job2.symbol, "P5678");
        assert_eq!(job2.title, "Systems Analyst");
    }

    #[test]
    fn page_without_table_yields_nothing() {
        let jobs = parse_jobs("<html><body></body></html>");
        assert!(jobs.is_empty());
    }

    #[test]
    fn short_row_is_skipped_but_others_parse() {
        let html = r#"
        <table id="RecordsSearched">
            <tbody>
                <tr><td>only</td><td>three</td><td>cells</td></tr>
                <tr>
                    <td><a href="/ViewJob?id=9">View</a></td>
                    <td>X9</td>
                    <td>Network Engineer</td>
                    <td>Camden</td>
                    <td>-</td>
                    <td>-</td>
                    <td>02/01/2026</td>
                    <td>03/01/2026</td>
                </tr>
            </tbody>
        </table>
        "#;

        let jobs = parse_jobs(html);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].symbol, "X9");
    }

    #[test]
    fn header_rows_are_excluded() {
        let html = r#"
        <table id="RecordsSearched">
            <thead>
                <tr>
                    <th>Link</th><th>Symbol</th><th>Title</th><th>Jurisdiction</th>
                    <th>a</th><th>b</th><th>Issue</th><th>Closing</th>
                </tr>
            </thead>
            <tbody>
                <tr>
                    <td></td>
                    <td>Z1</td>
                    <td>Clerk</td>
                    <td>Trenton</td>
                    <td>-</td>
                    <td>-</td>
                    <td>01/01/2026</td>
                    <td>01/15/2026</td>
                </tr>
            </tbody>
        </table>
        "#;

        let jobs = parse_jobs(html);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].symbol, "Z1");
    }

    #[test]
    fn row_without_anchor_gets_empty_link() {
        let html = r#"
        <table id="RecordsSearched">
            <tbody>
                <tr>
                    <td>no link here</td>
                    <td>N1</td>
                    <td>Data Analyst</td>
                    <td>Newark</td>
                    <td>-</td>
                    <td>-</td>
                    <td>01/01/2026</td>
                    <td>01/15/2026</td>
                </tr>
            </tbody>
        </table>
        "#;

        let jobs = parse_jobs(html);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].link, "");
    }

    #[test]
    fn cell_text_is_trimmed() {
        let html = r#"
        <table id="RecordsSearched">
            <tbody>
                <tr>
                    <td></td>
                    <td>  T1  </td>
                    <td>
                        Staff Engineer
                    </td>
                    <td>Trenton</td>
                    <td>-</td>
                    <td>-</td>
                    <td>01/01/2026</td>
                    <td>01/15/2026</td>
                </tr>
            </tbody>
        </table>
        "#;

        let jobs = parse_jobs(html);
        assert_eq!(jobs[0].symbol, "T1");
        assert_eq!(jobs[0].title, "Staff Engineer");
    }
}
