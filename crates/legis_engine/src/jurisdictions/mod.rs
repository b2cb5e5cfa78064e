//! Per-jurisdiction scrapers. Each is an independent struct behind [`Scraper`].
mod ca_bills;
mod il_events;

pub use ca_bills::CaliforniaBillScraper;
pub use il_events::IllinoisEventScraper;

use crate::{RecordSink, ScrapeContext, ScrapeError, ScrapeReport};

/// A jurisdiction-specific scraper.
///
/// Runs are single-threaded, so the futures need not be `Send`; parsed pages
/// may be held across awaits.
#[async_trait::async_trait(?Send)]
pub trait Scraper {
    /// Short label used in logs and configuration, e.g. `"ca-bills"`.
    fn name(&self) -> &str;

    async fn scrape(
        &self,
        ctx: &ScrapeContext,
        sink: &mut dyn RecordSink,
    ) -> Result<ScrapeReport, ScrapeError>;
}

pub fn available_jurisdictions() -> &'static [&'static str] {
    &["ca-bills", "il-events"]
}

/// Builds the scraper registered under `name`, or `None` if there is none.
pub fn scraper_for(name: &str, session: Option<&str>) -> Option<Box<dyn Scraper>> {
    match name {
        "ca-bills" => Some(Box::new(CaliforniaBillScraper::new(
            session.unwrap_or(CaliforniaBillScraper::DEFAULT_SESSION),
        ))),
        "il-events" => Some(Box::new(IllinoisEventScraper::new())),
        _ => None,
    }
}
