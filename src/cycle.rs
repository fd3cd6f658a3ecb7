//! Cycle orchestration: fetch, filter, notify, persist.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use tracing::{error, info, warn};

use crate::config::Settings;
use crate::filter::filter_jobs;
use crate::notify::EmailNotifier;
use crate::scraper::JobScraper;
use crate::storage::JobHistory;

/// Run one fetch → filter → notify → persist pass.
///
/// Delivery and persistence failures are logged and do not abort the
/// cycle; the history update runs whether or not the email went out.
/// A dry run stops after filtering and touches nothing.
pub fn run_cycle(
    scraper: &JobScraper,
    history: &JobHistory,
    notifier: &EmailNotifier,
    settings: &Settings,
    dry_run: bool,
) -> Result<()> {
    info!("starting scrape cycle");

    let all_jobs = scraper.fetch_jobs();
    if all_jobs.is_empty() {
        info!("no jobs fetched");
        return Ok(());
    }

    let processed = history.load();
    let new_jobs = filter_jobs(&all_jobs, &settings.keywords, &processed);
    info!(count = new_jobs.len(), "new jobs matching keywords");

    if new_jobs.is_empty() {
        info!("no new matching jobs to send");
        return Ok(());
    }

    if dry_run {
        for job in &new_jobs {
            info!(symbol = %job.symbol, title = %job.title, "dry run: would notify");
        }
        info!("dry run: skipping delivery and history update");
        return Ok(());
    }

    if let Err(e) = notifier.send(&new_jobs) {
        warn!(error = %e, "notification not delivered");
    }

    let new_symbols: Vec<String> = new_jobs.iter().map(|job| job.symbol.clone()).collect();
    if let Err(e) = history.update(&new_symbols) {
        error!(error = %e, "failed to persist history");
    }

    Ok(())
}

/// Run cycles forever, sleeping the configured interval between passes.
/// An error escaping a cycle is logged and the loop continues.
pub fn run_loop(
    scraper: &JobScraper,
    history: &JobHistory,
    notifier: &EmailNotifier,
    settings: &Settings,
    dry_run: bool,
) -> ! {
    let interval = Duration::from_secs(settings.schedule_interval_hours * 3600);
    info!(
        hours = settings.schedule_interval_hours,
        "running in loop mode"
    );

    loop {
        if let Err(e) = run_cycle(scraper, history, notifier, settings, dry_run) {
            error!(error = %e, "unexpected error in cycle");
        }

        info!(seconds = interval.as_secs(), "sleeping until next cycle");
        thread::sleep(interval);
    }
}
