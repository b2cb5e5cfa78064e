use std::sync::Arc;

use scrape_logging::{scrape_error, scrape_info, JurisdictionScope};
use tokio::runtime::{Builder, Runtime};

use crate::jurisdictions::Scraper;
use crate::{
    FetchSettings, RecordSink, ReqwestFetcher, RetryPolicy, ScrapeContext, ScrapeError,
    ScrapeReport,
};

/// Outcome of one jurisdiction in a batch run.
#[derive(Debug)]
pub struct RunSummary {
    pub name: String,
    pub result: Result<ScrapeReport, ScrapeError>,
}

impl RunSummary {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Drives scrapers to completion on a single-threaded runtime, one at a time.
pub struct ScrapeRunner {
    ctx: ScrapeContext,
    runtime: Runtime,
}

impl ScrapeRunner {
    pub fn new(ctx: ScrapeContext) -> Result<Self, ScrapeError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { ctx, runtime })
    }

    pub fn with_settings(settings: FetchSettings, retry: RetryPolicy) -> Result<Self, ScrapeError> {
        let fetcher = Arc::new(ReqwestFetcher::new(settings));
        Self::new(ScrapeContext::new(fetcher, retry))
    }

    pub fn context(&self) -> &ScrapeContext {
        &self.ctx
    }

    /// Runs one scraper; every log line it emits is labelled with its name.
    pub fn run(
        &self,
        scraper: &dyn Scraper,
        sink: &mut dyn RecordSink,
    ) -> Result<ScrapeReport, ScrapeError> {
        let _scope = JurisdictionScope::enter(scraper.name());
        scrape_info!("Starting scrape");
        let result = self.runtime.block_on(scraper.scrape(&self.ctx, sink));
        match &result {
            Ok(report) => scrape_info!(
                "Finished: {} records, {} pages skipped",
                report.emitted,
                report.skipped_pages
            ),
            Err(err) => scrape_error!("Aborted: {}", err),
        }
        result
    }

    /// Runs each scraper in turn. A failing jurisdiction does not stop the others.
    pub fn run_all(
        &self,
        scrapers: &[Box<dyn Scraper>],
        sink: &mut dyn RecordSink,
    ) -> Vec<RunSummary> {
        scrapers
            .iter()
            .map(|scraper| RunSummary {
                name: scraper.name().to_string(),
                result: self.run(scraper.as_ref(), sink),
            })
            .collect()
    }
}
