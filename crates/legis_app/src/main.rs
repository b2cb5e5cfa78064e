mod config;
mod logging;

use std::path::PathBuf;

use anyhow::bail;
use chrono::Local;
use legis_engine::{scraper_for, JsonDirSink, ScrapeRunner, Scraper};
use scrape_logging::{scrape_error, scrape_info, scrape_warn};

use crate::config::{AppConfig, DEFAULT_CONFIG_PATH};

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = AppConfig::load(&config_path)?;
    logging::initialize(config.log, config.log_level());

    let started = Local::now();
    scrape_info!(
        "Run started at {}, output to {}",
        started.to_rfc3339(),
        config.output_dir.display()
    );

    let mut scrapers: Vec<Box<dyn Scraper>> = Vec::new();
    for name in config.selected_jurisdictions() {
        match scraper_for(&name, config.session.as_deref()) {
            Some(scraper) => scrapers.push(scraper),
            None => scrape_warn!("Unknown jurisdiction {:?}, skipping", name),
        }
    }
    if scrapers.is_empty() {
        bail!("no known jurisdictions configured");
    }

    let runner = ScrapeRunner::with_settings(config.fetch_settings(), config.retry_policy())?;
    let mut sink = JsonDirSink::new(config.output_dir.clone())?;
    let summaries = runner.run_all(&scrapers, &mut sink);

    let mut failed = Vec::new();
    for summary in &summaries {
        match &summary.result {
            Ok(report) => scrape_info!(
                "{}: {} records written, {} pages skipped",
                summary.name,
                report.emitted,
                report.skipped_pages
            ),
            Err(err) => {
                scrape_error!("{}: {}", summary.name, err);
                failed.push(summary.name.as_str());
            }
        }
    }

    let elapsed = Local::now() - started;
    scrape_info!(
        "Run finished in {}s, {} files written",
        elapsed.num_seconds(),
        sink.written().len()
    );

    if !failed.is_empty() {
        bail!("failed jurisdictions: {}", failed.join(", "));
    }
    Ok(())
}
