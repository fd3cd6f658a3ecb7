use clap::Parser;
use tracing::info;

use jobwatch::config::Settings;
use jobwatch::cycle;
use jobwatch::notify::EmailNotifier;
use jobwatch::scraper::JobScraper;
use jobwatch::storage::JobHistory;

/// NJ Civil Service Commission job watcher.
#[derive(Parser, Debug)]
#[command(name = "jobwatch", version, about)]
struct Cli {
    /// Run one cycle and exit.
    #[arg(long)]
    once: bool,

    /// Fetch and filter, but skip email delivery and the history write.
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env();

    let scraper = JobScraper::new()?;
    let history = JobHistory::new();
    let notifier = EmailNotifier::new(&settings);

    info!("application started");

    if cli.once {
        cycle::run_cycle(&scraper, &history, &notifier, &settings, cli.dry_run)?;
        info!("run once completed, exiting");
        return Ok(());
    }

    cycle::run_loop(&scraper, &history, &notifier, &settings, cli.dry_run)
}
